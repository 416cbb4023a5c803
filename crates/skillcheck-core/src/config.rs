//! Configuration loading
//!
//! Reads `skillcheck.toml` from the working directory, or an explicit path.
//! Every key is optional and falls back to the defaults below.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::remote::RetryConfig;

/// Config file looked up in the working directory when no path is given
pub const CONFIG_FILE_NAME: &str = "skillcheck.toml";

/// Default Cargo query endpoint
pub const DEFAULT_API_URL: &str = "https://feheroes.fandom.com/api.php";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cargo query endpoint (`api.php`)
    pub api_url: String,
    /// Where the skill catalog snapshot is written and read
    pub snapshot_path: PathBuf,
    /// Expected-subset JSON array
    pub subset_path: PathBuf,
    /// Directory holding one moveset file per unit
    pub movesets_dir: PathBuf,
    pub request_timeout_secs: u64,
    /// Upper bound on in-flight unit validations
    pub max_concurrency: usize,
    pub user_agent: String,
    pub retry: RetrySection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            snapshot_path: PathBuf::from("dump.json"),
            subset_path: PathBuf::from("subset.json"),
            movesets_dir: PathBuf::from("../../data/movesets"),
            request_timeout_secs: 30,
            max_concurrency: 8,
            user_agent: format!("skillcheck/{}", env!("CARGO_PKG_VERSION")),
            retry: RetrySection::default(),
        }
    }
}

/// `[retry]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrySection {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetrySection {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 500,
            max_delay_ms: 8000,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `skillcheck.toml` in
    /// `working_dir` is used when present, otherwise defaults.
    pub fn load(working_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = working_dir.join(CONFIG_FILE_NAME);
                if !candidate.exists() {
                    tracing::debug!("No {} found at {:?}", CONFIG_FILE_NAME, candidate);
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let config = Self::parse(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        tracing::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Parse TOML text, filling in defaults for absent keys
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(content)?;
        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        if self.max_concurrency == 0 {
            self.max_concurrency = 1;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.retry.max_retries,
            initial_delay: Duration::from_millis(self.retry.initial_delay_ms),
            max_delay: Duration::from_millis(self.retry.max_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = tempdir().unwrap();
        let config = Config::load(temp.path(), None).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.snapshot_path, PathBuf::from("dump.json"));
        assert_eq!(config.max_concurrency, 8);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempdir().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "movesets_dir = \"data/movesets\"\n[retry]\nmax_retries = 1\n",
        )
        .unwrap();

        let config = Config::load(temp.path(), None).unwrap();
        assert_eq!(config.movesets_dir, PathBuf::from("data/movesets"));
        assert_eq!(config.retry.max_retries, 1);
        assert_eq!(config.retry.initial_delay_ms, 500);
        assert_eq!(config.subset_path, PathBuf::from("subset.json"));
    }

    #[test]
    fn explicit_path_must_exist() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("nope.toml");
        let err = Config::load(temp.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("bad.toml");
        std::fs::write(&path, "max_concurrency = \"lots\"").unwrap();
        let err = Config::load(temp.path(), Some(&path)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn zero_concurrency_is_clamped() {
        let config = Config::parse("max_concurrency = 0").unwrap();
        assert_eq!(config.max_concurrency, 1);
    }
}
