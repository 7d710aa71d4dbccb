//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Phylogenetic stemma toolkit: infer trees with FITCH, draw them with DRAWTREE
#[derive(Parser, Debug)]
#[command(name = "stemma")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Infer a tree from a distance matrix (FITCH)
    Fitch {
        /// Distance matrix: `.toml` (labels + matrix) or PHYLIP lower triangle
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Write the Newick tree here instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Draw a Newick tree as SVG (DRAWTREE)
    Draw {
        /// Newick tree file
        #[arg(value_hint = ValueHint::FilePath)]
        tree: PathBuf,
        /// Write the SVG here instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Also keep the raw PostScript
        #[arg(long, value_hint = ValueHint::FilePath)]
        postscript: Option<PathBuf>,
    },

    /// Infer a tree and draw it in one go
    Stemma {
        /// Distance matrix: `.toml` (labels + matrix) or PHYLIP lower triangle
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Write the SVG here instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Also keep the Newick tree
        #[arg(long, value_hint = ValueHint::FilePath)]
        tree: Option<PathBuf>,
        /// Also keep the raw PostScript
        #[arg(long, value_hint = ValueHint::FilePath)]
        postscript: Option<PathBuf>,
    },

    /// Print the distance document handed to FITCH
    Matrix {
        /// Distance matrix: `.toml` (labels + matrix) or PHYLIP lower triangle
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Show global config file location
    Path,
    /// Print a commented config template
    Template,
}
