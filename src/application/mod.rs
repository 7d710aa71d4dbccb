//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod scratch;
pub mod services;

pub use error::{ApplicationError, ApplicationResult, IoResultExt};
pub use scratch::{remove_if_exists, ScratchFiles};
