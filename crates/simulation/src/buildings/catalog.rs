//! Building catalog: the templates a player can place, loaded once from JSON.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::MAX_FOOTPRINT_SUB_TILES;
use crate::grid_geometry::Footprint;

use super::types::{BuildingKind, BuildingTemplate};

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingCatalog {
    pub buildings: Vec<BuildingTemplate>,
}

impl Default for BuildingCatalog {
    fn default() -> Self {
        let template = |name: &str, kind, (w, l), cost, (residents, jobs, shopping)| BuildingTemplate {
            name: name.to_string(),
            kind,
            footprint: Footprint::new(w, l),
            cost,
            residents,
            jobs,
            shopping_space: shopping,
            description: String::new(),
        };
        Self {
            buildings: vec![
                template("House", BuildingKind::Residential, (1, 1), 100.0, (10, 0, 0)),
                template("Apartment", BuildingKind::Residential, (2, 2), 300.0, (40, 0, 0)),
                template("Shop", BuildingKind::Commercial, (1, 1), 150.0, (0, 5, 5)),
                template("Mall", BuildingKind::Commercial, (2, 3), 500.0, (0, 20, 30)),
                template("Workshop", BuildingKind::Industrial, (1, 1), 120.0, (0, 8, 0)),
                template("Factory", BuildingKind::Industrial, (2, 2), 250.0, (0, 25, 0)),
            ],
        }
    }
}

impl BuildingCatalog {
    /// Parse a catalog, rejecting templates whose footprint is empty or
    /// larger than [`MAX_FOOTPRINT_SUB_TILES`] on a side.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let catalog: Self = serde_json::from_str(json)?;
        if let Some(bad) = catalog.buildings.iter().find(|t| !t.footprint.is_supported()) {
            return Err(serde::de::Error::custom(format!(
                "template {:?} has unsupported footprint {}x{} (sides must be 1..={})",
                bad.name, bad.footprint.width, bad.footprint.length, MAX_FOOTPRINT_SUB_TILES
            )));
        }
        info!("Loaded building catalog with {} templates", catalog.buildings.len());
        Ok(catalog)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn get(&self, name: &str) -> Option<&BuildingTemplate> {
        self.buildings.iter().find(|t| t.name == name)
    }

    pub fn by_kind(&self, kind: BuildingKind) -> impl Iterator<Item = &BuildingTemplate> {
        self.buildings.iter().filter(move |t| t.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}
