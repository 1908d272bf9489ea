// tests/integration_tests/preferences_test.rs
use super::common::run_cli;
use anyhow::Result;
use tempfile::TempDir;
use utilbox::Preferences;

#[test]
fn test_dark_mode_persists_between_runs() -> Result<()> {
    let config = TempDir::new()?;

    assert_eq!(run_cli(config.path(), &["prefs", "toggle-dark-mode"])?, "Dark mode: on");
    assert!(Preferences::load(&config.path().join("config.toml"))?.dark_mode);

    assert_eq!(run_cli(config.path(), &["prefs", "toggle-dark-mode"])?, "Dark mode: off");
    assert_eq!(
        run_cli(config.path(), &["prefs", "set-dark-mode", "true"])?,
        "Dark mode: on"
    );
    assert!(run_cli(config.path(), &["prefs", "show"])?.contains("dark_mode = true"));
    Ok(())
}

#[test]
fn test_prefs_path_reports_explicit_location() -> Result<()> {
    let config = TempDir::new()?;
    let path = run_cli(config.path(), &["prefs", "path"])?;
    assert!(path.ends_with("config.toml"));
    assert!(path.starts_with(&*config.path().to_string_lossy()));
    Ok(())
}

#[test]
fn test_broken_preferences_file_is_reported() -> Result<()> {
    let config = TempDir::new()?;
    std::fs::write(config.path().join("config.toml"), "dark_mode = [")?;
    let err = run_cli(config.path(), &["units"]);
    assert!(err.is_err_and(|e| e.to_string().starts_with("Failed to load preferences")));
    Ok(())
}
