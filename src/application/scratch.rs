//! Scratch files exchanged with the native tools
//!
//! Every adapter call creates one uniquely named file in the scratch
//! directory and derives its siblings by swapping the file-name suffix:
//!
//! | call      | created          | derived                      |
//! |-----------|------------------|------------------------------|
//! | inference | `<id>_inp.txt`   | `<id>_out.txt`, `<id>_tre.txt` |
//! | rendering | `<id>_tree.txt`  | `<id>_tree.ps`               |
//!
//! All of them are registered with a [`ScratchFiles`] guard which removes
//! them when the call ends, on success and failure alike.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error};

use crate::application::{ApplicationResult, IoResultExt};
use crate::infrastructure::traits::FileSystem;

/// Prefix of every scratch file name.
pub const SCRATCH_PREFIX: &str = "stemma";

pub const INPUT_SUFFIX: &str = "_inp.txt";
pub const OUTPUT_SUFFIX: &str = "_out.txt";
pub const TREE_OUTPUT_SUFFIX: &str = "_tre.txt";
pub const TREE_SUFFIX: &str = "_tree.txt";
pub const POSTSCRIPT_SUFFIX: &str = "_tree.ps";

/// Derive a sibling path by replacing the `from` suffix of the file name
/// with `to`. If the name does not end in `from`, `to` is appended.
///
/// Only the file-name component is rewritten.
pub fn sibling_path(path: &Path, from: &str, to: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(from).unwrap_or(&name);
    path.with_file_name(format!("{stem}{to}"))
}

/// Remove `path` if it exists.
///
/// Never fails: `None` and missing files are no-ops returning `true`;
/// a failed removal is logged and reported as `false`.
pub fn remove_if_exists(fs: &dyn FileSystem, path: Option<&Path>) -> bool {
    let Some(path) = path else {
        return true;
    };
    if !fs.exists(path) {
        return true;
    }
    match fs.remove_file(path) {
        Ok(()) => {
            debug!("removed scratch file {}", path.display());
            true
        }
        Err(e) => {
            error!("cannot remove scratch file {}: {}", path.display(), e);
            false
        }
    }
}

/// Create the scratch directory if needed and return its absolute path.
pub fn prepare_dir(fs: &dyn FileSystem, dir: &Path) -> ApplicationResult<PathBuf> {
    fs.create_dir_all(dir)
        .with_path_context("create scratch directory", dir)?;
    fs.absolute(dir)
        .with_path_context("resolve scratch directory", dir)
}

/// Guard owning the scratch files of one adapter call.
///
/// Tracked files are removed on [`ScratchFiles::cleanup`] or on drop.
pub struct ScratchFiles {
    fs: Arc<dyn FileSystem>,
    paths: Vec<PathBuf>,
}

impl ScratchFiles {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            paths: Vec::new(),
        }
    }

    /// Register a path for removal and hand it back.
    pub fn track(&mut self, path: PathBuf) -> PathBuf {
        self.paths.push(path.clone());
        path
    }

    /// Create a unique `{SCRATCH_PREFIX}…{suffix}` file in `dir` and track it.
    pub fn create(&mut self, dir: &Path, suffix: &str) -> std::io::Result<PathBuf> {
        let path = self.fs.create_unique(dir, SCRATCH_PREFIX, suffix)?;
        Ok(self.track(path))
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Remove all tracked files; `true` if every removal succeeded.
    pub fn cleanup(&mut self) -> bool {
        let mut all_removed = true;
        for path in self.paths.drain(..) {
            all_removed &= remove_if_exists(self.fs.as_ref(), Some(&path));
        }
        all_removed
    }
}

impl Drop for ScratchFiles {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_input_name_when_deriving_sibling_then_swaps_suffix() {
        let input = Path::new("/srv/media/stemmaAb12_inp.txt");
        assert_eq!(
            sibling_path(input, INPUT_SUFFIX, TREE_OUTPUT_SUFFIX),
            PathBuf::from("/srv/media/stemmaAb12_tre.txt")
        );
    }

    #[test]
    fn given_suffix_in_directory_when_deriving_sibling_then_leaves_directory() {
        let input = Path::new("/srv/x_inp.txt/stemmaAb12_inp.txt");
        assert_eq!(
            sibling_path(input, INPUT_SUFFIX, OUTPUT_SUFFIX),
            PathBuf::from("/srv/x_inp.txt/stemmaAb12_out.txt")
        );
    }

    #[test]
    fn given_foreign_name_when_deriving_sibling_then_appends_suffix() {
        let tree = Path::new("/tmp/tree.nwk");
        assert_eq!(
            sibling_path(tree, TREE_SUFFIX, POSTSCRIPT_SUFFIX),
            PathBuf::from("/tmp/tree.nwk_tree.ps")
        );
    }
}
