//! PostScript to SVG conversion through an external command
//!
//! The configured command receives the PostScript on stdin and must write the
//! SVG document to stdout.

use std::sync::Arc;

use tracing::debug;

use crate::config::ConverterConfig;
use crate::infrastructure::traits::{CommandRunner, PostscriptConverter};
use crate::infrastructure::{InfraError, InfraResult};

/// [`PostscriptConverter`] that pipes through an external program.
pub struct CommandConverter {
    cmd: Arc<dyn CommandRunner>,
    command: String,
    args: Vec<String>,
}

impl CommandConverter {
    pub fn new(cmd: Arc<dyn CommandRunner>, config: &ConverterConfig) -> Self {
        Self {
            cmd,
            command: config.command.clone(),
            args: config.args.clone(),
        }
    }
}

impl PostscriptConverter for CommandConverter {
    fn to_svg(&self, postscript: &str) -> InfraResult<String> {
        debug!(
            "to_svg: command={} args={:?} input={} bytes",
            self.command,
            self.args,
            postscript.len()
        );
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();

        let result = self
            .cmd
            .run_with_stdin(&self.command, &args, postscript)
            .map_err(|e| InfraError::io(format!("run converter {}", self.command), e))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(InfraError::Converter {
                message: format!("{}: {}", self.command, stderr.trim()),
                exit_code: result.status.code(),
            });
        }

        String::from_utf8(result.stdout).map_err(|e| InfraError::Converter {
            message: format!("{} produced non-UTF-8 output: {}", self.command, e),
            exit_code: Some(0),
        })
    }
}
