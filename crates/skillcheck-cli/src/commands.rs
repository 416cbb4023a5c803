//! Subcommand implementations

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use skillcheck_core::moveset::list_moveset_files;
use skillcheck_core::remote::{CargoClient, CargoSource};
use skillcheck_core::{
    build_catalog, generate_subset, validate_all, Catalog, Config, ExpectedSubset, RunReport,
};

/// Build the catalog and write the snapshot, partial or not
pub async fn dump_skills(config: &Config) -> Result<ExitCode> {
    let client = CargoClient::from_config(config)?;
    let build = build_catalog(&client).await;

    build
        .catalog
        .save(&config.snapshot_path)
        .with_context(|| format!("Failed to write snapshot {:?}", config.snapshot_path))?;

    info!(
        "Wrote {} skills to {:?} after {} requests",
        build.catalog.len(),
        config.snapshot_path,
        build.requests
    );

    match build.error {
        Some(e) => {
            warn!("Snapshot is incomplete, pagination stopped early: {}", e);
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

/// Regenerate the expected subset from the moveset directory
pub fn subset(config: &Config) -> Result<ExitCode> {
    let subset = generate_subset(&config.movesets_dir)
        .with_context(|| format!("Failed to collect skills from {:?}", config.movesets_dir))?;
    subset
        .save(&config.subset_path)
        .with_context(|| format!("Failed to write subset {:?}", config.subset_path))?;

    info!("Wrote {} skills to {:?}", subset.len(), config.subset_path);
    Ok(ExitCode::SUCCESS)
}

/// Check every moveset against the wiki
pub async fn validate(config: &Config, exit_zero: bool) -> Result<ExitCode> {
    let catalog = Catalog::load(&config.snapshot_path)
        .with_context(|| format!("Failed to load catalog {:?}", config.snapshot_path))?;
    let source: Arc<dyn CargoSource> = Arc::new(CargoClient::from_config(config)?);
    validate_with(config, source, catalog, exit_zero).await
}

/// Check every moveset and print advisories as units finish
async fn validate_with(
    config: &Config,
    source: Arc<dyn CargoSource>,
    catalog: Catalog,
    exit_zero: bool,
) -> Result<ExitCode> {
    let subset = ExpectedSubset::load(&config.subset_path)
        .with_context(|| format!("Failed to load subset {:?}", config.subset_path))?;
    let files = list_moveset_files(&config.movesets_dir)
        .with_context(|| format!("Failed to list movesets in {:?}", config.movesets_dir))?;

    let report = validate_all(
        source,
        files,
        Arc::new(catalog),
        Arc::new(subset),
        config.max_concurrency,
        |unit| {
            if let Ok(advisories) = &unit.outcome {
                let mut stdout = std::io::stdout().lock();
                for advisory in advisories {
                    let _ = writeln!(stdout, "{}", advisory);
                }
            }
        },
    )
    .await;

    eprintln!(
        "{} units checked, {} advisories, {} failed",
        report.units.len(),
        report.advisory_count(),
        report.failure_count()
    );

    Ok(exit_code(&report, exit_zero))
}

/// Non-zero when anything was flagged or any unit failed, unless `exit_zero`
fn exit_code(report: &RunReport, exit_zero: bool) -> ExitCode {
    if exit_zero || report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
