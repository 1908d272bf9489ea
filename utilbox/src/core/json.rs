// src/core/json.rs
use crate::error::JsonError;
use serde::Serialize as _;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(u8),
    Tab,
}

impl Default for Indent {
    fn default() -> Self {
        Self::Spaces(2)
    }
}

impl Indent {
    fn unit(self) -> Vec<u8> {
        match self {
            Self::Spaces(n) => vec![b' '; usize::from(n)],
            Self::Tab => vec![b'\t'],
        }
    }
}

impl FromStr for Indent {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2" => Ok(Self::Spaces(2)),
            "4" => Ok(Self::Spaces(4)),
            "8" => Ok(Self::Spaces(8)),
            "tab" | "\\t" => Ok(Self::Tab),
            _ => Err(JsonError::InvalidIndent(s.to_owned())),
        }
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spaces(n) => write!(f, "{n}"),
            Self::Tab => f.write_str("tab"),
        }
    }
}

fn parse(input: &str) -> Result<Value, JsonError> {
    if input.trim().is_empty() {
        return Err(JsonError::EmptyInput);
    }
    Ok(serde_json::from_str(input)?)
}

/// Recursively orders object keys alphabetically.
#[must_use]
pub fn sort_keys(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect::<Map<String, Value>>(),
            )
        }
        other => other,
    }
}

/// Pretty-prints `input` with the given indentation, optionally sorting keys.
/// Key order is otherwise preserved.
///
/// # Errors
///
/// * [`JsonError::EmptyInput`] for blank input
/// * [`JsonError::Invalid`] when `input` is not JSON
pub fn format(input: &str, indent: Indent, sort: bool) -> Result<String, JsonError> {
    let value = parse(input)?;
    let value = if sort { sort_keys(value) } else { value };

    let unit = indent.unit();
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&unit));
    value.serialize(&mut serializer)?;
    debug!(%indent, sort, bytes = out.len(), "formatted JSON");
    // serde_json only ever writes UTF-8
    String::from_utf8(out).map_err(|err| JsonError::Invalid {
        message: err.to_string(),
        line: 0,
        column: 0,
    })
}

/// Strips all insignificant whitespace.
///
/// # Errors
///
/// Same as [`format`].
pub fn minify(input: &str) -> Result<String, JsonError> {
    let value = parse(input)?;
    Ok(serde_json::to_string(&value)?)
}

/// Checks that `input` parses.
///
/// # Errors
///
/// Same as [`format`].
pub fn validate(input: &str) -> Result<(), JsonError> {
    parse(input).map(|_| ())
}

/// Size and shape summary of a JSON document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct JsonStats {
    pub size: usize,
    pub lines: usize,
    pub characters: usize,
    pub objects: usize,
    pub arrays: usize,
    pub strings: usize,
    pub numbers: usize,
    pub booleans: usize,
    pub nulls: usize,
}

impl JsonStats {
    /// Computes stats for already-formatted output.
    ///
    /// # Errors
    ///
    /// Same as [`format`].
    pub fn of(document: &str) -> Result<Self, JsonError> {
        let value = parse(document)?;
        let mut stats = Self {
            size: document.len(),
            lines: document.split('\n').count(),
            characters: document.chars().count(),
            ..Self::default()
        };
        stats.tally(&value);
        Ok(stats)
    }

    fn tally(&mut self, value: &Value) {
        match value {
            Value::Null => self.nulls = self.nulls.saturating_add(1),
            Value::Bool(_) => self.booleans = self.booleans.saturating_add(1),
            Value::Number(_) => self.numbers = self.numbers.saturating_add(1),
            Value::String(_) => self.strings = self.strings.saturating_add(1),
            Value::Array(items) => {
                self.arrays = self.arrays.saturating_add(1);
                items.iter().for_each(|item| self.tally(item));
            }
            Value::Object(map) => {
                self.objects = self.objects.saturating_add(1);
                map.values().for_each(|item| self.tally(item));
            }
        }
    }
}
