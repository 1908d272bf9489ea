// src/utils.rs
use anyhow::{Context as _, Result};
use std::fs;
use std::io::{self, Read as _};
use std::path::Path;

/// Rounds to six decimal places and trims trailing zeros (and a dangling
/// decimal point). Negative zero is rendered as `0`.
#[must_use]
pub fn format_decimal(value: f64) -> String {
    let fixed = format!("{value:.6}");
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    if trimmed == "-0" {
        return String::from("0");
    }
    trimmed.to_owned()
}

/// Renders a number the way a dynamic-language calculator display would:
/// integral values have no fractional part, non-finite values are spelled out,
/// and magnitudes below `1e-6` or from `1e21` up use exponent form (`1e+21`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        return if value.is_sign_positive() {
            String::from("Infinity")
        } else {
            String::from("-Infinity")
        };
    }
    if value == 0.0 {
        return String::from("0");
    }
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{value}");
    }
    let exponential = format!("{value:e}");
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponential,
    }
}

/// Reads text from a file, or from stdin when the path is `-` or absent.
///
/// # Errors
///
/// Returns an error if the file or stdin cannot be read as UTF-8 text.
pub fn read_text(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// Picks the inline value if present, otherwise reads from the file/stdin.
///
/// # Errors
///
/// Propagates read failures from [`read_text`].
pub fn resolve_input(inline: Option<&str>, file: Option<&Path>) -> Result<String> {
    inline.map_or_else(|| read_text(file), |text| Ok(text.to_owned()))
}

pub fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_name().to_str().is_some_and(|s| {
            // Don't consider temp directories as hidden
            if s.starts_with(".tmp") {
                return false;
            }
            s.starts_with('.')
        })
}
