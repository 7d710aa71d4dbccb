//! Domain layer: distance data, tree text and tool identities
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod distance;
pub mod entities;
pub mod error;

pub use distance::{fit_label, DistanceMatrix, LABEL_WIDTH};
pub use entities::*;
pub use error::DomainError;
