//! In-memory [`CargoSource`] for tests

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::remote::{CargoSource, SkillRow, UnitType};

#[derive(Default)]
pub struct FakeSource {
    pages: Mutex<VecDeque<Result<Vec<SkillRow>>>>,
    offsets: Mutex<Vec<usize>>,
    units: HashMap<String, Vec<UnitType>>,
    failing_units: HashSet<String>,
    panicking_units: HashSet<String>,
}

impl FakeSource {
    pub fn with_pages(pages: Vec<Result<Vec<SkillRow>>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            ..Self::default()
        }
    }

    pub fn with_unit(mut self, display_name: &str, movement: &str, weapon: &str) -> Self {
        self.units.insert(
            display_name.to_string(),
            vec![UnitType {
                movement_type: movement.to_string(),
                weapon_type: weapon.to_string(),
            }],
        );
        self
    }

    pub fn with_failing_unit(mut self, display_name: &str) -> Self {
        self.failing_units.insert(display_name.to_string());
        self
    }

    pub fn with_panicking_unit(mut self, display_name: &str) -> Self {
        self.panicking_units.insert(display_name.to_string());
        self
    }

    pub fn page_offsets(&self) -> Vec<usize> {
        self.offsets.lock().unwrap().clone()
    }
}

#[async_trait]
impl CargoSource for FakeSource {
    async fn skill_page(&self, offset: usize) -> Result<Vec<SkillRow>> {
        self.offsets.lock().unwrap().push(offset);
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn unit_types(&self, display_name: &str) -> Result<Vec<UnitType>> {
        if self.panicking_units.contains(display_name) {
            panic!("unit lookup blew up for {}", display_name);
        }
        if self.failing_units.contains(display_name) {
            return Err(Error::transport("http://wiki.test/api.php", "connection refused"));
        }
        Ok(self.units.get(display_name).cloned().unwrap_or_default())
    }
}
