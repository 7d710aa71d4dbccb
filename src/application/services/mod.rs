//! Application services
//!
//! Concrete service implementations wrapping the native tools.
//! Services depend on I/O boundary traits (FileSystem, NativeTools, ...)
//! but are themselves concrete structs, not traits.

mod inference;
mod render;

pub use inference::InferenceService;
pub use render::RenderService;
