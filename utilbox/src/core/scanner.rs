// src/core/scanner.rs
pub mod utils;

#[cfg(test)]
pub mod test_utils;

use crate::core::text::analyze;
use crate::models::{FileTextStats, TextStats};
use anyhow::Result;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use utils::should_exclude;
use walkdir::WalkDir;

/// Computes text statistics for every readable file under a directory.
///
/// # Arguments
///
/// * `dir` - The directory path to scan
/// * `exclude_dirs` - A list of directory names to exclude from the scan
///
/// # Returns
///
/// * `Ok(Vec<FileTextStats>)` - Per-file statistics, most words first
///
/// # Errors
///
/// This function may return an error if:
/// * The directory cannot be accessed or read
/// * File system operations fail during traversal
///
/// Files that are not valid UTF-8 are skipped rather than reported.
pub fn scan_directory(dir: &Path, exclude_dirs: &[&str]) -> Result<Vec<FileTextStats>> {
    let absolute_dir = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        env::current_dir()?.join(dir)
    };

    let mut files = Vec::new();
    for entry in WalkDir::new(&absolute_dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !should_exclude(e, exclude_dirs))
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        match fs::read_to_string(path) {
            Ok(content) => files.push(FileTextStats {
                path: path.to_path_buf(),
                stats: analyze(&content),
            }),
            Err(err) => warn!(path = %path.display(), %err, "skipping unreadable file"),
        }
    }

    sort_by_words(&mut files);
    debug!(dir = %absolute_dir.display(), files = files.len(), "scanned directory");
    Ok(files)
}

/// Computes statistics for each of `paths`, descending into directories.
///
/// # Errors
///
/// Returns an error if a named file cannot be read or a directory scan fails.
pub fn scan_paths(paths: &[PathBuf], exclude_dirs: &[&str]) -> Result<Vec<FileTextStats>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(scan_directory(path, exclude_dirs)?);
        } else {
            let content = crate::utils::read_text(Some(path))?;
            files.push(FileTextStats {
                path: path.clone(),
                stats: analyze(&content),
            });
        }
    }
    sort_by_words(&mut files);
    Ok(files)
}

/// Sums per-file statistics into a single total.
#[must_use]
pub fn total(files: &[FileTextStats]) -> TextStats {
    files
        .iter()
        .fold(TextStats::new(), |acc, file| acc.merge(&file.stats))
}

fn sort_by_words(files: &mut [FileTextStats]) {
    files.sort_by(|a, b| b.stats.words.cmp(&a.stats.words).then_with(|| a.path.cmp(&b.path)));
}
