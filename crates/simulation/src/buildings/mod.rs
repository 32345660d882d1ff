pub mod catalog;
pub mod registry;
pub mod types;

pub use catalog::BuildingCatalog;
pub use registry::BuildingRegistry;
pub use types::{BuildingId, BuildingKind, BuildingRecord, BuildingTemplate, PlacedBuilding};
