//! Application-level errors (wraps domain errors)

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{DomainError, NativeTool};
use crate::infrastructure::InfraError;

/// Application errors wrap domain errors and add application-level context.
///
/// Each failure class of an adapter call gets its own variant so callers can
/// tell a missing library apart from a failed run or a file problem.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{tool} library unavailable")]
    Native {
        tool: NativeTool,
        #[source]
        source: Box<InfraError>,
    },

    #[error("{tool} reported failure")]
    ToolFailed { tool: NativeTool },

    #[error("font file not found: {}", .0.display())]
    MissingFont(PathBuf),

    #[error("postscript to svg conversion failed")]
    Conversion {
        #[source]
        source: Box<InfraError>,
    },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Attach the scratch-file step and path to a failed I/O call.
pub trait IoResultExt<T> {
    /// `fs.write(&input, &doc).with_path_context("write distance document", &input)?`
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{action} {}", path.display()),
            source: Box::new(e),
        })
    }
}
