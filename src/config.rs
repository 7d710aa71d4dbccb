//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/stemma/stemma.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `STEMMA_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, NativeTool, Platform};

/// Fixed library directory used on Windows hosts.
pub const WINDOWS_LIBRARY_DIR: &str = "d:/data files/vs2010/projects/RU-passim/stemmac";

/// PostScript to SVG converter command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConverterConfig {
    /// Program reading PostScript on stdin and writing SVG to stdout
    pub command: String,
    /// Arguments passed to the program
    pub args: Vec<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            command: "pstoedit".into(),
            args: vec!["-q".into(), "-f".into(), "plot-svg".into()],
        }
    }
}

/// Raw converter config for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawConverterConfig {
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub scratch_dir: Option<PathBuf>,
    pub library_dir: Option<PathBuf>,
    pub windows_library_dir: Option<PathBuf>,
    pub font_file: Option<PathBuf>,
    pub converter: RawConverterConfig,
}

/// Unified configuration for stemma.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory for the temporary exchange files
    pub scratch_dir: PathBuf,
    /// Directory holding `fitch.so` and `drawtree.so`
    pub library_dir: PathBuf,
    /// Directory holding `fitch.dll` and `drawtree.dll` on Windows
    pub windows_library_dir: PathBuf,
    /// Font file for drawtree (default: `<scratch_dir>/stemma/fontfile`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_file: Option<PathBuf>,
    /// PostScript to SVG converter
    pub converter: ConverterConfig,
}

impl Default for Settings {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            scratch_dir: data_dir.join("scratch"),
            library_dir: data_dir.join("stemmac"),
            windows_library_dir: PathBuf::from(WINDOWS_LIBRARY_DIR),
            font_file: None,
            converter: ConverterConfig::default(),
        }
    }
}

/// Platform data directory for stemma (falls back to ~/.stemma).
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "stemma")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.stemma"))
}

/// Get the XDG config directory for stemma.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "stemma").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("stemma.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Font file handed to drawtree.
    pub fn font_path(&self) -> PathBuf {
        self.font_file
            .clone()
            .unwrap_or_else(|| self.scratch_dir.join("stemma").join("fontfile"))
    }

    /// Library location for `tool` on `platform`.
    ///
    /// Windows uses `windows_library_dir`, everything else `library_dir`.
    pub fn library_path(&self, tool: NativeTool, platform: Platform) -> PathBuf {
        let dir = match platform {
            Platform::Windows => &self.windows_library_dir,
            Platform::Other => &self.library_dir,
        };
        platform.library_path(dir, tool)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expand = |p: &Path| PathBuf::from(expand_env_vars(p.to_string_lossy().as_ref()));
        self.scratch_dir = expand(&self.scratch_dir);
        self.library_dir = expand(&self.library_dir);
        self.windows_library_dir = expand(&self.windows_library_dir);
        self.font_file = self.font_file.as_deref().map(expand);
    }

    /// Overlay a raw config file onto self: specified values replace.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            scratch_dir: overlay
                .scratch_dir
                .clone()
                .unwrap_or_else(|| self.scratch_dir.clone()),
            library_dir: overlay
                .library_dir
                .clone()
                .unwrap_or_else(|| self.library_dir.clone()),
            windows_library_dir: overlay
                .windows_library_dir
                .clone()
                .unwrap_or_else(|| self.windows_library_dir.clone()),
            font_file: overlay.font_file.clone().or_else(|| self.font_file.clone()),
            converter: ConverterConfig {
                command: overlay
                    .converter
                    .command
                    .clone()
                    .unwrap_or_else(|| self.converter.command.clone()),
                args: overlay
                    .converter
                    .args
                    .clone()
                    .unwrap_or_else(|| self.converter.args.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/stemma/stemma.toml`
    /// 3. Explicit config file
    /// 4. Environment variables: `STEMMA_*` prefix
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply STEMMA_* environment variables as explicit overrides.
    ///
    /// Nested keys use `__` (`STEMMA_CONVERTER__COMMAND`); `converter.args`
    /// is a comma separated list.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("STEMMA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("converter.args"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("scratch_dir") {
            settings.scratch_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("library_dir") {
            settings.library_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("windows_library_dir") {
            settings.windows_library_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("font_file") {
            settings.font_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("converter.command") {
            settings.converter.command = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("converter.args") {
            settings.converter.args = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# stemma configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/stemma/stemma.toml
#   Explicit: stemma --config <file>
#   Env:      STEMMA_* environment variables (STEMMA_CONVERTER__ARGS=a,b)

# Directory for temporary exchange files (created on demand)
# scratch_dir = "~/.local/share/stemma/scratch"

# Directory holding fitch.so and drawtree.so
# library_dir = "~/.local/share/stemma/stemmac"

# Directory holding fitch.dll and drawtree.dll (Windows only)
# windows_library_dir = "d:/data files/vs2010/projects/RU-passim/stemmac"

# Font file for drawtree (default: <scratch_dir>/stemma/fontfile)
# font_file = "/usr/share/phylip/font1"

[converter]
# Reads PostScript on stdin, writes SVG to stdout
# command = "pstoedit"
# args = ["-q", "-f", "plot-svg"]
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load(None).expect("load defaults");
        assert!(settings.scratch_dir.ends_with("scratch"));
        assert!(!settings.converter.command.is_empty());
    }

    #[test]
    fn given_no_font_file_when_resolving_then_uses_scratch_location() {
        let settings = Settings {
            scratch_dir: PathBuf::from("/srv/media"),
            ..Settings::default()
        };
        assert_eq!(
            settings.font_path(),
            PathBuf::from("/srv/media/stemma/fontfile")
        );
    }

    #[test]
    fn given_platform_when_resolving_library_then_picks_platform_directory() {
        let settings = Settings {
            library_dir: PathBuf::from("/opt/stemmac/"),
            ..Settings::default()
        };

        assert_eq!(
            settings.library_path(NativeTool::Fitch, Platform::Other),
            PathBuf::from("/opt/stemmac/fitch.so")
        );
        assert_eq!(
            settings.library_path(NativeTool::Drawtree, Platform::Windows),
            PathBuf::from(WINDOWS_LIBRARY_DIR).join("drawtree.dll")
        );
    }

    #[test]
    fn given_tilde_in_paths_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            scratch_dir: PathBuf::from("~/media"),
            font_file: Some(PathBuf::from("$HOME/fonts/font1")),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        assert!(settings.scratch_dir.to_string_lossy().starts_with(&home));
        assert!(settings
            .font_file
            .as_ref()
            .is_some_and(|f| f.to_string_lossy().starts_with(&home)));
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_values() {
        let base = Settings::default();
        let overlay = RawSettings {
            library_dir: Some(PathBuf::from("/usr/lib/stemmac")),
            converter: RawConverterConfig {
                command: Some("ps2svg".into()),
                args: None,
            },
            ..RawSettings::default()
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.library_dir, PathBuf::from("/usr/lib/stemmac"));
        assert_eq!(result.scratch_dir, base.scratch_dir);
        assert_eq!(result.converter.command, "ps2svg");
        assert_eq!(result.converter.args, base.converter.args);
    }
}
