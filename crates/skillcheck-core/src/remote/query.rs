//! Cargo query construction and response decoding
//!
//! The wiki exposes its tables through `api.php?action=cargoquery`. Clauses
//! are passed as literal strings; results come back as
//! `{"cargoquery": [{"title": {...}}, ...]}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use url::Url;

use crate::error::{Error, Result};

/// Fixed page size for catalog pagination
pub const PAGE_SIZE: usize = 500;

/// One `cargoquery` request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CargoQuery {
    pub tables: String,
    pub fields: String,
    pub where_clause: Option<String>,
    pub join_on: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl CargoQuery {
    /// Non-exclusive skills joined against the units that learn them
    pub fn skill_page(offset: usize) -> Self {
        Self {
            tables: "Skills, UnitSkills".into(),
            fields: "Skills.Name=Name, CanUseMove = MoveType, CanUseWeapon = WeaponType".into(),
            where_clause: Some("Exclusive = false".into()),
            join_on: Some("Skills.WikiName = UnitSkills.skill".into()),
            limit: Some(PAGE_SIZE),
            offset: Some(offset),
        }
    }

    /// Movement and weapon type of the unit with this page name
    pub fn unit_type(display_name: &str) -> Self {
        Self {
            tables: "Units".into(),
            fields: "MoveType, WeaponType".into(),
            where_clause: Some(format!("_pageName = \"{}\"", display_name)),
            ..Self::default()
        }
    }

    /// Full request URL against `api_url`
    pub fn to_url(&self, api_url: &str) -> Result<Url> {
        let mut url =
            Url::parse(api_url).map_err(|e| Error::Config(format!("api_url {:?}: {}", api_url, e)))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("action", "cargoquery")
                .append_pair("format", "json")
                .append_pair("tables", &self.tables)
                .append_pair("fields", &self.fields);
            if let Some(where_clause) = &self.where_clause {
                pairs.append_pair("where", where_clause);
            }
            if let Some(join_on) = &self.join_on {
                pairs.append_pair("join_on", join_on);
            }
            if let Some(limit) = self.limit {
                pairs.append_pair("limit", &limit.to_string());
            }
            if let Some(offset) = self.offset {
                pairs.append_pair("offset", &offset.to_string());
            }
        }
        Ok(url)
    }
}

/// Skill row from the catalog query
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SkillRow {
    #[serde(rename = "Name", alias = "name", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "MoveType", default, deserialize_with = "null_as_empty")]
    pub move_type: String,
    #[serde(rename = "WeaponType", default, deserialize_with = "null_as_empty")]
    pub weapon_type: String,
}

/// A unit's own movement and weapon type
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnitType {
    #[serde(rename = "MoveType", default, deserialize_with = "null_as_empty")]
    pub movement_type: String,
    #[serde(rename = "WeaponType", default, deserialize_with = "null_as_empty")]
    pub weapon_type: String,
}

#[derive(Deserialize)]
struct CargoResponse<T> {
    cargoquery: Vec<CargoRow<T>>,
}

#[derive(Deserialize)]
struct CargoRow<T> {
    title: T,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a `cargoquery` body into its `title` records.
///
/// A body without a `cargoquery` array (MediaWiki reports failures as an
/// `error` object) is a decode error.
pub fn decode_rows<T: DeserializeOwned>(body: &[u8], source_name: &str) -> Result<Vec<T>> {
    let response: CargoResponse<T> =
        serde_json::from_slice(body).map_err(|e| Error::decode(source_name, e))?;
    Ok(response.cargoquery.into_iter().map(|row| row.title).collect())
}
