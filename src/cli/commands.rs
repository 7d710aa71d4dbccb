//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{DistanceMatrix, TreeText};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Distance matrix as written in a `.toml` input file.
#[derive(Debug, Deserialize)]
struct MatrixFile {
    labels: Vec<String>,
    matrix: Vec<Vec<f64>>,
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let config = cli.config.as_deref();
    match &cli.command {
        Some(Commands::Fitch { input, output }) => _fitch(config, input, output.as_deref()),
        Some(Commands::Draw {
            tree,
            output,
            postscript,
        }) => _draw(config, tree, output.as_deref(), postscript.as_deref()),
        Some(Commands::Stemma {
            input,
            output,
            tree,
            postscript,
        }) => _stemma(
            config,
            input,
            output.as_deref(),
            tree.as_deref(),
            postscript.as_deref(),
        ),
        Some(Commands::Matrix { input }) => _matrix(input),
        Some(Commands::Config { command }) => _config(config, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "stemma", &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `stemma --help`".into(),
        )),
    }
}

/// Read a distance matrix from a `.toml` file or a PHYLIP document.
pub fn read_distance_matrix(path: &Path) -> CliResult<DistanceMatrix> {
    let content = read_input(path)?;
    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

    let matrix = if is_toml {
        let file: MatrixFile = toml::from_str(&content).map_err(|e| CliError::Input {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        DistanceMatrix::new(file.labels, file.matrix)
    } else {
        DistanceMatrix::from_phylip(&content)
    };
    Ok(matrix.map_err(ApplicationError::from)?)
}

/// Read a user-supplied matrix or tree file.
fn read_input(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|e| CliError::Input {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write `content` to `path`, or print it when no path is given.
fn emit(path: Option<&Path>, content: &str, what: &str) -> CliResult<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)
                .map_err(|e| InfraError::io(format!("write {}", p.display()), e))?;
            output::action("Wrote", &format!("{} {}", what, p.display()));
        }
        None => output::info(content.trim_end()),
    }
    Ok(())
}

fn container(config: Option<&Path>) -> CliResult<ServiceContainer> {
    let settings = Settings::load(config)?;
    debug!("settings: {:?}", settings);
    Ok(ServiceContainer::new(settings))
}

#[instrument]
fn _fitch(config: Option<&Path>, input: &Path, output: Option<&Path>) -> CliResult<()> {
    let matrix = read_distance_matrix(input)?;
    let container = container(config)?;
    let tree = container.inference_service().infer(&matrix)?;
    emit(output, tree.as_str(), "tree")
}

#[instrument]
fn _draw(
    config: Option<&Path>,
    tree: &Path,
    output: Option<&Path>,
    postscript: Option<&Path>,
) -> CliResult<()> {
    let tree = TreeText::new(read_input(tree)?).map_err(ApplicationError::from)?;
    let container = container(config)?;
    let rendered = container.render_service().render(&tree)?;
    if let Some(ps) = postscript {
        emit(Some(ps), &rendered.postscript, "postscript")?;
    }
    emit(output, &rendered.svg, "svg")
}

#[instrument]
fn _stemma(
    config: Option<&Path>,
    input: &Path,
    output: Option<&Path>,
    tree_out: Option<&Path>,
    postscript: Option<&Path>,
) -> CliResult<()> {
    let matrix = read_distance_matrix(input)?;
    let container = container(config)?;

    let tree = container.inference_service().infer(&matrix)?;
    if let Some(path) = tree_out {
        emit(Some(path), tree.as_str(), "tree")?;
    }

    let rendered = container.render_service().render(&tree)?;
    if let Some(ps) = postscript {
        emit(Some(ps), &rendered.postscript, "postscript")?;
    }
    emit(output, &rendered.svg, "svg")
}

#[instrument]
fn _matrix(input: &Path) -> CliResult<()> {
    let matrix = read_distance_matrix(input)?;
    output::info(&matrix.to_phylip());
    Ok(())
}

fn _config(config: Option<&Path>, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(config)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                if !path.exists() {
                    output::warning(&format!("{} does not exist yet", path.display()));
                }
                output::info(&path.display());
            }
            None => output::warning("no config directory on this platform"),
        },
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
