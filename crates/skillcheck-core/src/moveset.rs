//! Moveset files
//!
//! One JSON file per unit, named after the unit's display name with `: `
//! written as `_` (e.g. `Alfonse_Prince of Askr.json`). Each file holds an
//! `exclusiveSkills` and a `commonSkills` group:
//!
//! ```json
//! {
//!   "exclusiveSkills": { "weapons": [{ "name": "Fólkvangr", "might": 16 }], "A": [] },
//!   "commonSkills": { "assists": [{ "name": "Swap" }], "S": [{ "name": "Swap" }] }
//! }
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moveset {
    #[serde(default)]
    pub exclusive_skills: SkillGroup,
    #[serde(default)]
    pub common_skills: SkillGroup,
}

/// Skills of one group, split by slot
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkillGroup {
    pub weapons: Vec<SkillEntry>,
    pub assists: Vec<SkillEntry>,
    pub specials: Vec<SkillEntry>,
    #[serde(rename = "A")]
    pub a: Vec<SkillEntry>,
    #[serde(rename = "B")]
    pub b: Vec<SkillEntry>,
    #[serde(rename = "C")]
    pub c: Vec<SkillEntry>,
    #[serde(rename = "S")]
    pub s: Vec<SkillEntry>,
}

impl SkillGroup {
    /// Slots in aggregation order; the sacred seal slot comes last
    pub fn categories(&self) -> [&[SkillEntry]; 7] {
        [
            self.weapons.as_slice(),
            self.assists.as_slice(),
            self.specials.as_slice(),
            self.a.as_slice(),
            self.b.as_slice(),
            self.c.as_slice(),
            self.s.as_slice(),
        ]
    }
}

/// One learnable skill; other keys such as `might` are ignored
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkillEntry {
    pub name: String,
}

impl Moveset {
    pub fn parse(bytes: &[u8], source_name: &str) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Error::decode(source_name, e))
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::io(path, e))?;
        Self::parse(&bytes, &path.display().to_string())
    }

    /// Every skill the unit is declared to learn.
    ///
    /// Exclusive slots first, then common slots, both in slot order. Only
    /// the common `S` slot skips names already listed; every other slot is
    /// appended as is, duplicates included.
    pub fn aggregated_skills(&self) -> Vec<String> {
        let mut skills: Vec<String> = Vec::new();

        for category in self.exclusive_skills.categories() {
            skills.extend(category.iter().map(|entry| entry.name.clone()));
        }

        let [weapons, assists, specials, a, b, c, seals] = self.common_skills.categories();
        for category in [weapons, assists, specials, a, b, c] {
            skills.extend(category.iter().map(|entry| entry.name.clone()));
        }
        for entry in seals {
            if !skills.contains(&entry.name) {
                skills.push(entry.name.clone());
            }
        }

        skills
    }
}

/// Display name encoded in a moveset file name
pub fn unit_name_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    Some(stem.replace('_', ": "))
}

/// Moveset files in `dir`, sorted by file name
pub fn list_moveset_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();
        if !file_type.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            debug!("Skipping non-moveset entry {:?}", path);
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entries(names: &[&str]) -> Vec<SkillEntry> {
        names
            .iter()
            .map(|name| SkillEntry {
                name: name.to_string(),
            })
            .collect()
    }

    fn group(slots: [&[&str]; 7]) -> SkillGroup {
        SkillGroup {
            weapons: entries(slots[0]),
            assists: entries(slots[1]),
            specials: entries(slots[2]),
            a: entries(slots[3]),
            b: entries(slots[4]),
            c: entries(slots[5]),
            s: entries(slots[6]),
        }
    }

    #[test]
    fn aggregation_order_and_seal_dedup() {
        let moveset = Moveset {
            exclusive_skills: group([&["E1"], &["E2"], &["E3"], &["E4"], &["E5"], &["E6"], &["E7"]]),
            common_skills: group([
                &["C1"],
                &["C2"],
                &["C3"],
                &["C4"],
                &["C5"],
                &["C6"],
                &["C7", "E4", "C2", "C7"],
            ]),
        };

        assert_eq!(
            moveset.aggregated_skills(),
            vec!["E1", "E2", "E3", "E4", "E5", "E6", "E7", "C1", "C2", "C3", "C4", "C5", "C6", "C7"]
        );
    }

    #[test]
    fn duplicates_outside_common_seals_are_kept() {
        let moveset = Moveset {
            exclusive_skills: group([&["Moonbow"], &[], &["Moonbow"], &[], &[], &[], &["Moonbow"]]),
            common_skills: group([&["Moonbow"], &[], &[], &[], &[], &[], &["Moonbow"]]),
        };

        assert_eq!(moveset.aggregated_skills(), vec!["Moonbow"; 4]);
    }

    #[test]
    fn parses_wiki_shaped_file() {
        let json = br#"{
            "exclusiveSkills": {"weapons": [{"name": "Folkvangr", "might": 16}]},
            "commonSkills": {"assists": [{"name": "Swap"}], "S": [{"name": "Swap"}], "B": []}
        }"#;
        let moveset = Moveset::parse(json, "Alfonse").unwrap();
        assert_eq!(moveset.exclusive_skills.weapons[0].name, "Folkvangr");
        assert!(moveset.exclusive_skills.assists.is_empty());
        assert_eq!(moveset.aggregated_skills(), vec!["Folkvangr", "Swap"]);
    }

    #[test]
    fn malformed_file_is_decode_error() {
        let err = Moveset::parse(b"{\"commonSkills\": {\"A\": [{}]}}", "bad.json").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let temp = tempdir().unwrap();
        let err = Moveset::load(&temp.path().join("Nobody.json")).await.unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn unit_name_restores_colon() {
        let path = Path::new("data/movesets/Alfonse_Prince of Askr.json");
        assert_eq!(
            unit_name_from_path(path).as_deref(),
            Some("Alfonse: Prince of Askr")
        );
    }

    #[test]
    fn lists_only_json_files_sorted() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("b_Two.json"), "{}").unwrap();
        std::fs::write(temp.path().join("a_One.json"), "{}").unwrap();
        std::fs::write(temp.path().join("notes.txt"), "").unwrap();
        std::fs::create_dir(temp.path().join("nested.json")).unwrap();

        let files = list_moveset_files(temp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a_One.json", "b_Two.json"]);
    }
}
