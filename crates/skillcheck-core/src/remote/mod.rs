//! Remote wiki data source
//!
//! The catalog builder and validator only talk to [`CargoSource`]; the
//! production implementation is [`CargoClient`], tests substitute
//! in-memory sources.

mod client;
mod query;
mod retry;

use async_trait::async_trait;

use crate::error::Result;

pub use client::CargoClient;
pub use query::{decode_rows, CargoQuery, SkillRow, UnitType, PAGE_SIZE};
pub use retry::{with_retry, RetryConfig};

/// Paginated skill rows plus per-unit type lookup
#[async_trait]
pub trait CargoSource: Send + Sync {
    /// One page of non-exclusive skill rows starting at `offset`
    async fn skill_page(&self, offset: usize) -> Result<Vec<SkillRow>>;

    /// All unit records whose page name equals `display_name`
    async fn unit_types(&self, display_name: &str) -> Result<Vec<UnitType>>;
}
