pub mod confirm;
pub mod error;
pub mod preview;
pub mod validator;

pub use confirm::{confirm_placement, register_building, unregister_building};
pub use error::{InvalidReason, PlacementError, ValidationResult};
pub use preview::{PlacementPreview, PreviewRejected, PreviewWorld};
pub use validator::{validate_placement, PlacementRequest};
