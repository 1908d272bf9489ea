// src/models/file_text_stats.rs

use super::TextStats;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct FileTextStats {
    pub path: PathBuf,
    pub stats: TextStats,
}
