//! Expected-subset handling
//!
//! The subset is a JSON array of skill names every unit is checked against.
//! It is usually generated from the moveset directory itself.

use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};
use crate::moveset::list_moveset_files;

/// Ordered skill names a unit is expected to learn when compatible
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedSubset {
    skills: Vec<String>,
}

impl ExpectedSubset {
    pub fn new(skills: Vec<String>) -> Self {
        Self { skills }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        let skills: Vec<String> = serde_json::from_slice(&content)
            .map_err(|e| Error::decode(path.display().to_string(), e))?;
        Ok(Self { skills })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec(&self.skills)
            .map_err(|e| Error::encode(path.display().to_string(), e))?;
        std::fs::write(path, json).map_err(|e| Error::io(path, e))
    }
}

/// Union of every skill name in every moveset file, first occurrence first.
///
/// Groups and slots are walked generically, so slots the validator does not
/// know about still contribute their names.
pub fn generate_subset(movesets_dir: &Path) -> Result<ExpectedSubset> {
    let mut seen = HashSet::new();
    let mut skills = Vec::new();

    let files = list_moveset_files(movesets_dir)?;
    for path in &files {
        let content = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        let source_name = path.display().to_string();
        let moveset: Value =
            serde_json::from_slice(&content).map_err(|e| Error::decode(&source_name, e))?;

        for name in skill_names(&moveset, &source_name)? {
            if seen.insert(name.to_string()) {
                skills.push(name.to_string());
            }
        }
    }

    info!(
        "Collected {} distinct skills from {} movesets",
        skills.len(),
        files.len()
    );
    Ok(ExpectedSubset { skills })
}

fn skill_names<'a>(moveset: &'a Value, source_name: &str) -> Result<Vec<&'a str>> {
    let shape_error = |what: &str| Error::decode(source_name, format!("expected {}", what));

    let groups = moveset
        .as_object()
        .ok_or_else(|| shape_error("an object of skill groups"))?;

    let mut names = Vec::new();
    for slots in groups.values() {
        let slots = slots
            .as_object()
            .ok_or_else(|| shape_error("an object of skill slots"))?;
        for entries in slots.values() {
            let entries = entries
                .as_array()
                .ok_or_else(|| shape_error("an array of skills"))?;
            for entry in entries {
                let name = entry
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| shape_error("a skill with a string name"))?;
                names.push(name);
            }
        }
    }
    Ok(names)
}
