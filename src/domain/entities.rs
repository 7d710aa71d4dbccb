//! Domain entities: core data structures

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::DomainError;

/// A tree in Newick notation, as produced by FITCH and consumed by DRAWTREE.
///
/// The text is kept verbatim; only blank input is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeText(String);

impl TreeText {
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::EmptyTree);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TreeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Output of a DRAWTREE run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedTree {
    /// SVG converted from the PostScript
    pub svg: String,
    /// Raw PostScript written by the drawing library
    pub postscript: String,
}

/// The native routines this crate drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeTool {
    /// Distance-matrix tree inference
    Fitch,
    /// PostScript tree drawing
    Drawtree,
}

impl NativeTool {
    /// Library file stem (`fitch.so`, `drawtree.dll`, ...).
    pub fn library_stem(&self) -> &'static str {
        match self {
            NativeTool::Fitch => "fitch",
            NativeTool::Drawtree => "drawtree",
        }
    }

    /// Exported entry point.
    pub fn symbol(&self) -> &'static str {
        match self {
            NativeTool::Fitch => "do_fitch",
            NativeTool::Drawtree => "psdrawtree",
        }
    }
}

impl fmt::Display for NativeTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.library_stem())
    }
}

/// Platform family, for library naming and location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Other
        }
    }

    pub fn library_extension(&self) -> &'static str {
        match self {
            Platform::Windows => "dll",
            Platform::Other => "so",
        }
    }

    /// Full path of `tool`'s library inside `dir`.
    pub fn library_path(&self, dir: &Path, tool: NativeTool) -> PathBuf {
        dir.join(format!("{}.{}", tool.library_stem(), self.library_extension()))
    }
}

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Unresolvable variables leave the input unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
