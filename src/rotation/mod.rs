//! Used-image tracking and daily rotation

pub mod error;
pub mod gate;
pub mod orchestrator;
pub mod record;
pub mod selection;
pub mod store;

pub use error::RotationError;
pub use orchestrator::{Rotation, RunOutcome};
pub use store::RecordStore;
