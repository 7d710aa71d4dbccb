//! CLI-level errors (wraps infrastructure errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid input {}: {message}", .path.display())]
    Input { path: PathBuf, message: String },

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use crate::exitcode;

        match self {
            CliError::Usage(_) => exitcode::USAGE,
            CliError::Input { .. } => exitcode::DATAERR,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => exitcode::IOERR,
                InfraError::LibraryLoad { .. } | InfraError::MissingSymbol { .. } => {
                    exitcode::UNAVAILABLE
                }
                InfraError::InvalidPath(_) => exitcode::DATAERR,
                InfraError::Converter { .. } => exitcode::SOFTWARE,
                InfraError::Application(app) => match app {
                    ApplicationError::Domain(_) => exitcode::DATAERR,
                    ApplicationError::Native { .. } => exitcode::UNAVAILABLE,
                    ApplicationError::ToolFailed { .. } => exitcode::SOFTWARE,
                    ApplicationError::MissingFont(_) => exitcode::NOINPUT,
                    ApplicationError::Conversion { .. } => exitcode::SOFTWARE,
                    ApplicationError::Config { .. } => exitcode::CONFIG,
                    ApplicationError::OperationFailed { .. } => exitcode::IOERR,
                },
            },
        }
    }
}
