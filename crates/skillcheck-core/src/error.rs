//! Error kinds shared by the catalog builder, validator and subset generator

use std::path::PathBuf;

/// Result alias used across the core library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP request failed or returned a non-success status
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// A response body or file could not be parsed
    #[error("failed to decode {source_name}: {message}")]
    Decode {
        source_name: String,
        message: String,
    },

    /// A value could not be serialized for writing
    #[error("failed to encode {target}: {message}")]
    Encode { target: String, message: String },

    /// A validation task panicked or was cancelled
    #[error("validation task aborted: {0}")]
    Task(String),

    /// The remote source returned no record for a unit
    #[error("no unit record found for {0:?}")]
    NotFound(String),

    /// Reading or writing a local file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file unreadable or invalid
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn transport(url: impl Into<String>, message: impl ToString) -> Self {
        Error::Transport {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn decode(source_name: impl Into<String>, message: impl ToString) -> Self {
        Error::Decode {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    pub fn encode(target: impl Into<String>, message: impl ToString) -> Self {
        Error::Encode {
            target: target.into(),
            message: message.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Only transport failures are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    /// Short kind label for logs and reports
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Transport { .. } => "transport",
            Error::Decode { .. } => "decode",
            Error::Encode { .. } => "encode",
            Error::Task(_) => "task",
            Error::NotFound(_) => "not_found",
            Error::Io { .. } => "io",
            Error::Config(_) => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_is_retryable() {
        assert!(Error::transport("http://x", "timed out").is_retryable());
        assert!(!Error::decode("page 0", "eof").is_retryable());
        assert!(!Error::NotFound("Alfonse: Prince of Askr".into()).is_retryable());
        let io = Error::io(
            "missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(!io.is_retryable());
        assert_eq!(io.kind(), "io");
    }

    #[test]
    fn encode_failures_have_their_own_kind() {
        let err = Error::encode("dump.json", "key must be a string");
        assert_eq!(err.kind(), "encode");
        assert!(!err.is_retryable());
        assert_eq!(
            err.to_string(),
            "failed to encode dump.json: key must be a string"
        );
    }

    #[test]
    fn io_error_mentions_path() {
        let err = Error::io(
            "data/movesets/Marth_Altean Prince.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("Marth_Altean Prince.json"));
    }
}
