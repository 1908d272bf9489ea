// src/lib.rs
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod models;
pub mod utils;

pub use cli::{Args, Command, execute};
pub use config::Preferences;
pub use crate::core::calculator::{Calculator, evaluate_keys};
pub use crate::core::scanner::{scan_directory, scan_paths};
pub use crate::core::text::{analyze, word_frequency};
pub use crate::core::units::{Category, convert, convert_input};
pub use error::{
    CalcError, CodecError, ColorError, ConfigError, ConversionError, JsonError, PasswordError,
    QrError,
};
pub use models::{ConversionOutcome, FileTextStats, TargetProgress, TextStats, WordFrequencyEntry};

use anyhow::Result;

/// Executes the command and prints its output to stdout.
///
/// # Errors
///
/// Propagates any failure from [`execute`].
pub fn run(args: &Args) -> Result<()> {
    let output = execute(args)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
