//! Drive the native FITCH and DRAWTREE libraries.
//!
//! Distance matrices are serialized into scratch files, handed to the
//! `fitch` shared library for tree inference, and the resulting Newick trees
//! are drawn by the `drawtree` library and converted from PostScript to SVG.
//!
//! Layers, from the inside out:
//! - [`domain`]: distance matrices, tree text, tool identities
//! - [`application`]: inference and rendering services, scratch file lifecycle
//! - [`infrastructure`]: filesystem, shared-library and converter bindings
//! - [`cli`]: the `stemma` command line

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
