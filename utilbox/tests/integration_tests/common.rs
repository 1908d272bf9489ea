// tests/integration_tests/common.rs
use anyhow::Result;
use clap::Parser as _;
use std::fs;
use std::io::Write as _;
use std::path::Path;
use tempfile::TempDir;
use utilbox::{Args, execute};

pub fn create_test_file(dir: &Path, name: &str, content: &str) -> Result<()> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// A small document tree: three visible files, one hidden, one under `.git`.
pub fn setup_test_directory() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;

    create_test_file(
        temp_dir.path(),
        "intro.md",
        "# Intro\n\nThis is the first document. It has two sentences.",
    )?;
    create_test_file(temp_dir.path(), "notes.txt", "Short note.")?;
    create_test_file(
        temp_dir.path(),
        "chapters/one.md",
        "Once upon a time there was a parser. It parsed things!\n\nThe end.",
    )?;
    create_test_file(temp_dir.path(), ".secret.md", "hidden words do not count")?;
    create_test_file(temp_dir.path(), ".git/HEAD", "ref: refs/heads/main")?;

    Ok(temp_dir)
}

/// Parses `argv` (without the binary name) against a private preferences file
/// and returns the command output.
pub fn run_cli(config_dir: &Path, argv: &[&str]) -> Result<String> {
    let config = config_dir.join("config.toml");
    let config = config.to_string_lossy();
    let mut full = vec!["utilbox", "--config", config.as_ref()];
    full.extend_from_slice(argv);
    let args = Args::try_parse_from(full)?;
    execute(&args)
}
