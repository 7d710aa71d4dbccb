//! Infrastructure layer: I/O implementations and DI container
//!
//! This layer implements I/O boundary traits and wires up services.

pub mod converter;
pub mod di;
pub mod error;
pub mod native;
pub mod traits;

pub use error::{InfraError, InfraResult};
