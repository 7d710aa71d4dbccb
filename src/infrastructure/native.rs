//! Shared-library binding for the FITCH and DRAWTREE routines
//!
//! Both libraries export a C function taking three NUL-terminated paths and
//! returning a C `bool`:
//!
//! ```c
//! bool do_fitch(char *infile, char *outfile, char *outtree);
//! bool psdrawtree(char *treefile, char *fontfile, char *plotfile);
//! ```
//!
//! The library is loaded for each call and unloaded when the call returns.

use std::ffi::{c_char, CString};
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use tracing::debug;

use crate::config::Settings;
use crate::domain::{NativeTool, Platform};
use crate::infrastructure::traits::NativeTools;
use crate::infrastructure::{InfraError, InfraResult};

type ToolEntry = unsafe extern "C" fn(*const c_char, *const c_char, *const c_char) -> bool;

/// [`NativeTools`] backed by `fitch` / `drawtree` shared libraries.
#[derive(Debug, Clone)]
pub struct SharedLibraryTools {
    fitch_library: PathBuf,
    drawtree_library: PathBuf,
}

impl SharedLibraryTools {
    pub fn new(fitch_library: PathBuf, drawtree_library: PathBuf) -> Self {
        Self {
            fitch_library,
            drawtree_library,
        }
    }

    /// Resolve both library paths for `platform` from settings.
    pub fn from_settings(settings: &Settings, platform: Platform) -> Self {
        Self::new(
            settings.library_path(NativeTool::Fitch, platform),
            settings.library_path(NativeTool::Drawtree, platform),
        )
    }

    pub fn library(&self, tool: NativeTool) -> &Path {
        match tool {
            NativeTool::Fitch => &self.fitch_library,
            NativeTool::Drawtree => &self.drawtree_library,
        }
    }

    fn call(&self, tool: NativeTool, args: [&Path; 3]) -> InfraResult<bool> {
        let library = self.library(tool);
        let [a, b, c] = [to_c_path(args[0])?, to_c_path(args[1])?, to_c_path(args[2])?];
        debug!(
            "call {}::{}({:?}, {:?}, {:?})",
            library.display(),
            tool.symbol(),
            a,
            b,
            c
        );

        // SAFETY: the library is trusted to export `symbol` with the
        // `ToolEntry` signature; the CStrings outlive the call and the
        // symbol does not outlive `lib`.
        let ok = unsafe {
            let lib = Library::new(library).map_err(|source| InfraError::LibraryLoad {
                path: library.to_path_buf(),
                source,
            })?;
            let entry: Symbol<ToolEntry> =
                lib.get(tool.symbol().as_bytes())
                    .map_err(|source| InfraError::MissingSymbol {
                        path: library.to_path_buf(),
                        symbol: tool.symbol(),
                        source,
                    })?;
            entry(a.as_ptr(), b.as_ptr(), c.as_ptr())
        };

        debug!("{} returned {}", tool.symbol(), ok);
        Ok(ok)
    }
}

impl NativeTools for SharedLibraryTools {
    fn fitch(&self, input: &Path, output: &Path, tree: &Path) -> InfraResult<bool> {
        self.call(NativeTool::Fitch, [input, output, tree])
    }

    fn drawtree(&self, tree: &Path, font: &Path, output: &Path) -> InfraResult<bool> {
        self.call(NativeTool::Drawtree, [tree, font, output])
    }
}

/// Encode a path as a NUL-terminated UTF-8 string.
fn to_c_path(path: &Path) -> InfraResult<CString> {
    path.to_str()
        .and_then(|s| CString::new(s).ok())
        .ok_or_else(|| InfraError::InvalidPath(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_plain_path_when_encoding_then_round_trips() {
        let c = to_c_path(Path::new("/tmp/stemma_inp.txt")).unwrap();
        assert_eq!(c.to_str().unwrap(), "/tmp/stemma_inp.txt");
    }

    #[test]
    fn given_path_with_nul_when_encoding_then_rejects() {
        let result = to_c_path(Path::new("/tmp/bad\0name"));
        assert!(matches!(result, Err(InfraError::InvalidPath(_))));
    }
}
