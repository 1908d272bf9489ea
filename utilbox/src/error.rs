// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the unit conversion engine.
///
/// Malformed numeric input is *not* an error; it is reported through
/// [`crate::models::ConversionOutcome::InvalidInput`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("unknown unit `{unit}` for category `{category}`")]
    InvalidUnit { category: String, unit: String },

    #[error("unknown conversion category `{0}`")]
    InvalidCategory(String),

    #[error("unit `{unit}` has a zero scale factor")]
    ZeroFactor { unit: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("please enter text to process")]
    EmptyInput,

    #[error("invalid Base64 string: {0}")]
    InvalidBase64(String),

    #[error("invalid percent-encoding at byte {position}")]
    InvalidPercentEncoding { position: usize },

    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonError {
    #[error("please enter JSON data")]
    EmptyInput,

    #[error("invalid JSON: {message} at line {line} column {column}")]
    Invalid {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("unsupported indent `{0}` (expected 2, 4, 8 or tab)")]
    InvalidIndent(String),
}

impl From<serde_json::Error> for JsonError {
    fn from(err: serde_json::Error) -> Self {
        Self::Invalid {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("please select at least one character type")]
    EmptyCharset,

    #[error("password length {length} is outside {min}..={max}")]
    LengthOutOfRange { length: usize, min: usize, max: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex color `{0}` (expected #rrggbb)")]
    InvalidHex(String),

    #[error("unknown color format `{0}`")]
    InvalidFormat(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("{function} is undefined for {value}")]
    Domain { function: &'static str, value: String },

    #[error("unrecognised key `{0}`")]
    UnknownKey(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QrError {
    #[error("nothing to encode")]
    EmptyPayload,

    #[error("unsupported QR size {0} (expected 128, 256, 512 or 1024)")]
    InvalidSize(u32),

    #[error("unsupported error correction level `{0}` (expected L, M, Q or H)")]
    InvalidErrorLevel(String),

    #[error("unsupported WiFi security `{0}` (expected WPA, WEP or nopass)")]
    InvalidSecurity(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse preferences file `{0}`")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("failed to serialize preferences")]
    Serialize(#[from] toml::ser::Error),

    #[error("could not determine the user configuration directory")]
    NoConfigDir,
}
