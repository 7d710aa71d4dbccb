//! I/O boundary traits for testability
//!
//! These traits abstract the filesystem, external commands and the native
//! tree libraries, allowing services to be tested with stub implementations.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Output;

use crate::infrastructure::InfraResult;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Make a path absolute without resolving symlinks or adding a
    /// Windows verbatim (`\\?\`) prefix.
    fn absolute(&self, path: &Path) -> io::Result<PathBuf>;

    /// Create a new, empty file with a collision-free name
    /// `{dir}/{prefix}{random}{suffix}` and return its path.
    ///
    /// The file is left on disk; the caller owns its removal.
    fn create_unique(&self, dir: &Path, prefix: &str, suffix: &str) -> io::Result<PathBuf>;
}

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run a command, feed `stdin` to it and capture its output.
    fn run_with_stdin(&self, cmd: &str, args: &[&str], stdin: &str) -> io::Result<Output>;
}

/// Binding to the native FITCH and DRAWTREE entry points.
///
/// Both calls take three file paths and return the library's success flag.
pub trait NativeTools: Send + Sync {
    /// Infer a tree: read `input`, write the report to `output` and the
    /// Newick tree to `tree`.
    fn fitch(&self, input: &Path, output: &Path, tree: &Path) -> InfraResult<bool>;

    /// Draw `tree` using `font`, writing PostScript to `output`.
    fn drawtree(&self, tree: &Path, font: &Path, output: &Path) -> InfraResult<bool>;
}

/// PostScript to SVG conversion.
pub trait PostscriptConverter: Send + Sync {
    fn to_svg(&self, postscript: &str) -> InfraResult<String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn absolute(&self, path: &Path) -> io::Result<PathBuf> {
        std::path::absolute(path)
    }

    fn create_unique(&self, dir: &Path, prefix: &str, suffix: &str) -> io::Result<PathBuf> {
        let file = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(suffix)
            .tempfile_in(dir)?;
        // detach from tempfile's own cleanup; the scratch guard removes it
        let (_, path) = file.keep().map_err(|e| e.error)?;
        Ok(path)
    }
}

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run_with_stdin(&self, cmd: &str, args: &[&str], stdin: &str) -> io::Result<Output> {
        use std::io::Write;
        use std::process::Stdio;

        let mut child = std::process::Command::new(cmd)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // stdin is written concurrently: the child may fill stdout before draining stdin
        let writer = child.stdin.take().map(|mut child_stdin| {
            let input = stdin.to_owned();
            std::thread::spawn(move || child_stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output()?;

        if let Some(handle) = writer {
            match handle.join() {
                Ok(Err(e)) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e),
                Ok(_) => {}
                Err(_) => return Err(io::Error::other("stdin writer thread panicked")),
            }
        }

        Ok(output)
    }
}
