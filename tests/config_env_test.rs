//! Tests for STEMMA_* environment overrides
//!
//! Kept in its own test binary: environment variables are process-wide.

use std::path::PathBuf;

use stemma::config::Settings;

#[test]
fn given_stemma_env_vars_when_loading_then_override_every_layer() {
    // Arrange
    let temp = tempfile::TempDir::new().unwrap();
    let file = temp.path().join("stemma.toml");
    std::fs::write(
        &file,
        "scratch_dir = \"/from/file\"\n[converter]\ncommand = \"from-file\"\n",
    )
    .unwrap();
    std::env::set_var("STEMMA_SCRATCH_DIR", "/srv/passim/media");
    std::env::set_var("STEMMA_FONT_FILE", "/usr/share/phylip/font2");
    std::env::set_var("STEMMA_CONVERTER__COMMAND", "ps2svg");
    std::env::set_var("STEMMA_CONVERTER__ARGS", "-a,-b");

    // Act
    let settings = Settings::load(Some(&file));

    std::env::remove_var("STEMMA_SCRATCH_DIR");
    std::env::remove_var("STEMMA_FONT_FILE");
    std::env::remove_var("STEMMA_CONVERTER__COMMAND");
    std::env::remove_var("STEMMA_CONVERTER__ARGS");

    // Assert
    let settings = settings.unwrap();
    assert_eq!(settings.scratch_dir, PathBuf::from("/srv/passim/media"));
    assert_eq!(
        settings.font_path(),
        PathBuf::from("/usr/share/phylip/font2")
    );
    assert_eq!(settings.converter.command, "ps2svg");
    assert_eq!(settings.converter.args, vec!["-a", "-b"]);
}
