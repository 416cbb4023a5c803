//! Moveset validation
//!
//! Every moveset file is checked in its own task against the shared catalog
//! and expected subset. A unit whose file, lookup or check fails is reported
//! on its own and never stops the others.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::moveset::{unit_name_from_path, Moveset};
use crate::remote::{CargoSource, UnitType};
use crate::subset::ExpectedSubset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryKind {
    /// Listed in the moveset but not permitted by the unit's types
    ShouldNotLearn,
    /// Permitted and expected, but missing from the moveset
    ShouldLearn,
}

/// One advisory line about a unit's moveset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub unit: String,
    pub skill: String,
    pub kind: AdvisoryKind,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AdvisoryKind::ShouldNotLearn => write!(f, "{} shouldn't learn {}", self.unit, self.skill),
            AdvisoryKind::ShouldLearn => write!(f, "{} should learn {}", self.unit, self.skill),
        }
    }
}

/// Compare a unit's declared skills against the catalog and expected subset.
///
/// Declared skills missing from the catalog are skipped. Expected skills
/// missing from the catalog count as incompatible.
pub fn check_unit(
    unit: &str,
    unit_type: &UnitType,
    skills: &[String],
    catalog: &Catalog,
    subset: &ExpectedSubset,
) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    for skill in skills {
        let Some(compat) = catalog.get(skill) else {
            continue;
        };
        let weapon_ok = compat.allows_weapon(&unit_type.weapon_type);
        let move_ok = compat.allows_movement(&unit_type.movement_type);
        if !weapon_ok || !move_ok {
            advisories.push(Advisory {
                unit: unit.to_string(),
                skill: skill.clone(),
                kind: AdvisoryKind::ShouldNotLearn,
            });
        }
    }

    for skill in subset.iter() {
        let (weapon_ok, move_ok) = match catalog.get(skill) {
            Some(compat) => (
                compat.allows_weapon(&unit_type.weapon_type),
                compat.allows_movement(&unit_type.movement_type),
            ),
            None => (false, false),
        };
        if weapon_ok && move_ok && !skills.iter().any(|known| known == skill) {
            advisories.push(Advisory {
                unit: unit.to_string(),
                skill: skill.to_string(),
                kind: AdvisoryKind::ShouldLearn,
            });
        }
    }

    advisories
}

/// Validate one moveset file for `unit`
pub async fn validate_moveset(
    source: &dyn CargoSource,
    path: &Path,
    unit: &str,
    catalog: &Catalog,
    subset: &ExpectedSubset,
) -> Result<Vec<Advisory>> {
    let moveset = Moveset::load(path).await?;

    let unit_type = source
        .unit_types(unit)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| Error::NotFound(unit.to_string()))?;
    debug!(
        "{}: movement {:?}, weapon {:?}",
        unit, unit_type.movement_type, unit_type.weapon_type
    );

    let skills = moveset.aggregated_skills();
    Ok(check_unit(unit, &unit_type, &skills, catalog, subset))
}

/// Result of validating one unit
#[derive(Debug)]
pub struct UnitReport {
    pub unit: String,
    pub path: PathBuf,
    pub outcome: Result<Vec<Advisory>>,
}

/// Summary of a validation run
#[derive(Debug, Default)]
pub struct RunReport {
    pub units: Vec<UnitReport>,
    /// Tasks that ended without any report, not even a unit name
    pub panicked: usize,
}

impl RunReport {
    pub fn advisory_count(&self) -> usize {
        self.units
            .iter()
            .filter_map(|unit| unit.outcome.as_ref().ok())
            .map(Vec::len)
            .sum()
    }

    pub fn failure_count(&self) -> usize {
        self.units.iter().filter(|unit| unit.outcome.is_err()).count() + self.panicked
    }

    pub fn is_clean(&self) -> bool {
        self.advisory_count() == 0 && self.failure_count() == 0
    }
}

/// Validate every file concurrently, at most `max_concurrency` at a time.
///
/// `on_unit` sees each unit as soon as its task finishes, so output order
/// follows completion order. Returns once every task has finished.
pub async fn validate_all<F>(
    source: Arc<dyn CargoSource>,
    files: Vec<PathBuf>,
    catalog: Arc<Catalog>,
    subset: Arc<ExpectedSubset>,
    max_concurrency: usize,
    mut on_unit: F,
) -> RunReport
where
    F: FnMut(&UnitReport),
{
    let permits = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let mut tasks = JoinSet::new();

    info!("Validating {} movesets", files.len());

    for path in files {
        let source = Arc::clone(&source);
        let catalog = Arc::clone(&catalog);
        let subset = Arc::clone(&subset);
        let permits = Arc::clone(&permits);

        tasks.spawn(async move {
            let Some(unit) = unit_name_from_path(&path) else {
                let outcome = Err(Error::decode(
                    path.display().to_string(),
                    "file name is not valid UTF-8",
                ));
                return UnitReport {
                    unit: path.display().to_string(),
                    path,
                    outcome,
                };
            };

            let _permit = permits.acquire_owned().await.ok();
            let check = {
                let path = path.clone();
                let unit = unit.clone();
                tokio::spawn(async move {
                    validate_moveset(source.as_ref(), &path, &unit, &catalog, &subset).await
                })
            };
            let outcome = match check.await {
                Ok(outcome) => outcome,
                Err(e) => Err(Error::Task(e.to_string())),
            };
            UnitReport {
                unit,
                path,
                outcome,
            }
        });
    }

    let mut report = RunReport::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(unit_report) => {
                if let Err(e) = &unit_report.outcome {
                    error!(
                        unit = %unit_report.unit,
                        kind = e.kind(),
                        "Failed to validate {:?}: {}",
                        unit_report.path,
                        e
                    );
                }
                on_unit(&unit_report);
                report.units.push(unit_report);
            }
            Err(e) => {
                error!("Validation task did not complete: {}", e);
                report.panicked += 1;
            }
        }
    }

    info!(
        "Checked {} units: {} advisories, {} failed",
        report.units.len(),
        report.advisory_count(),
        report.failure_count()
    );
    report
}
