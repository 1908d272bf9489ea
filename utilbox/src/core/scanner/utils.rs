// src/core/scanner/utils.rs
use crate::utils::is_hidden;

/// Determines if a directory entry should be left out of a scan:
/// hidden entries, and anything inside one of `exclude_dirs`.
pub fn should_exclude(entry: &walkdir::DirEntry, exclude_dirs: &[&str]) -> bool {
    if is_hidden(entry) {
        return true;
    }

    if let Some(path_str) = entry.path().to_str() {
        for dir in exclude_dirs.iter().filter(|d| !d.is_empty()) {
            if entry.file_type().is_dir() && entry.file_name().to_str() == Some(*dir) {
                return true;
            }
            if path_str.contains(&format!("/{dir}/")) {
                return true;
            }
        }
    }

    false
}
