//! Skill catalog: skill name to movement/weapon compatibility
//!
//! Built by paging through the wiki's non-exclusive skills and persisted as a
//! flat JSON snapshot that the validator reads back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::remote::{CargoSource, PAGE_SIZE};

/// Compatibility strings for one skill.
///
/// Both fields list every permitted type in one string; a unit may learn the
/// skill when its own type occurs anywhere inside them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCompat {
    #[serde(rename = "MoveType", default)]
    pub move_type: String,
    #[serde(rename = "WeaponType", default)]
    pub weapon_type: String,
}

impl SkillCompat {
    pub fn allows_weapon(&self, weapon_type: &str) -> bool {
        self.weapon_type.contains(weapon_type)
    }

    pub fn allows_movement(&self, movement_type: &str) -> bool {
        self.move_type.contains(movement_type)
    }
}

/// Name-keyed skill compatibility table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    skills: BTreeMap<String, SkillCompat>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; the latest record for a name wins
    pub fn insert(&mut self, name: impl Into<String>, compat: SkillCompat) {
        self.skills.insert(name.into(), compat);
    }

    pub fn get(&self, name: &str) -> Option<&SkillCompat> {
        self.skills.get(name)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Read a snapshot written by [`Catalog::save`]
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        let catalog: Catalog = serde_json::from_slice(&content)
            .map_err(|e| Error::decode(path.display().to_string(), e))?;
        debug!("Loaded {} skills from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// Write the snapshot, replacing any previous one
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec(self)
            .map_err(|e| Error::encode(path.display().to_string(), e))?;
        std::fs::write(path, json).map_err(|e| Error::io(path, e))
    }
}

impl FromIterator<(String, SkillCompat)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, SkillCompat)>>(iter: I) -> Self {
        Self {
            skills: iter.into_iter().collect(),
        }
    }
}

/// Outcome of a catalog build
#[derive(Debug)]
pub struct CatalogBuild {
    pub catalog: Catalog,
    /// Page requests issued, including a failing one
    pub requests: usize,
    /// Set when a page failed and pagination stopped early
    pub error: Option<Error>,
}

/// Page through every non-exclusive skill.
///
/// A full page means there may be more; the first short page ends the loop.
/// A failing page also ends it, keeping everything gathered so far.
pub async fn build_catalog(source: &dyn CargoSource) -> CatalogBuild {
    let mut catalog = Catalog::new();
    let mut offset = 0;
    let mut requests = 0;

    loop {
        requests += 1;
        let rows = match source.skill_page(offset).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(
                    "Skill page at offset {} failed, keeping {} skills: {}",
                    offset,
                    catalog.len(),
                    e
                );
                return CatalogBuild {
                    catalog,
                    requests,
                    error: Some(e),
                };
            }
        };

        let page_len = rows.len();
        debug!("Skill page at offset {}: {} rows", offset, page_len);

        for row in rows {
            catalog.insert(
                row.name,
                SkillCompat {
                    move_type: row.move_type,
                    weapon_type: row.weapon_type,
                },
            );
        }

        if page_len != PAGE_SIZE {
            break;
        }
        offset += PAGE_SIZE;
    }

    info!(
        "Built skill catalog: {} skills from {} requests",
        catalog.len(),
        requests
    );

    CatalogBuild {
        catalog,
        requests,
        error: None,
    }
}
