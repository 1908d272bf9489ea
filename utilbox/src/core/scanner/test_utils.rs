// src/core/scanner/test_utils.rs
use anyhow::Result;
use std::fs::{self, File};
use std::io::Write as _;
use std::path::PathBuf;
use tempfile::TempDir;

pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.path().join(name);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(&file_path)?;
    file.write_all(content.as_bytes())?;
    Ok(file_path)
}

/// Four visible files (2, 3, 5 and 7 words) plus one hidden file.
pub fn setup_test_directory() -> Result<TempDir> {
    let dir = TempDir::new()?;

    create_test_file(&dir, "short.txt", "Hello world.")?;
    create_test_file(&dir, "notes.md", "One two three.\n\nFour five.")?;
    create_test_file(&dir, "nested/deep.txt", "Three words here")?;
    create_test_file(
        &dir,
        "essay.md",
        "The quick brown fox jumps. Really? Yes!",
    )?;
    create_test_file(&dir, ".hidden.md", "Hidden file with several words inside it")?;

    Ok(dir)
}
