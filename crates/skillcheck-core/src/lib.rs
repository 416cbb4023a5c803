//! skillcheck core library
//!
//! Fetches skill compatibility data from the wiki's Cargo API into a local
//! catalog, then checks hand-authored moveset files against it:
//!
//! - [`catalog`]: paginated catalog build and JSON snapshot
//! - [`moveset`]: moveset files and skill aggregation
//! - [`subset`]: the expected-subset list and its generation
//! - [`validate`]: per-unit checks and the concurrent runner
//! - [`remote`]: the Cargo query client behind the [`remote::CargoSource`] trait

pub mod catalog;
pub mod config;
pub mod error;
pub mod moveset;
pub mod remote;
pub mod subset;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::{build_catalog, Catalog, CatalogBuild, SkillCompat};
pub use config::Config;
pub use error::{Error, Result};
pub use moveset::Moveset;
pub use subset::{generate_subset, ExpectedSubset};
pub use validate::{validate_all, Advisory, AdvisoryKind, RunReport, UnitReport};
