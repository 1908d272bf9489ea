// src/models.rs
mod conversion;
mod file_text_stats;
mod text_stats;
mod word_frequency;

pub use conversion::ConversionOutcome;
pub use file_text_stats::FileTextStats;
pub use text_stats::{TargetProgress, TextStats};
pub use word_frequency::WordFrequencyEntry;
