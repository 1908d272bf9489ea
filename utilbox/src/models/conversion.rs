// src/models/conversion.rs

/// Result of converting user-typed input.
///
/// Empty or non-numeric input is an expected state while someone is typing,
/// so it is a variant here rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    Converted { value: f64, display: String },
    InvalidInput,
}

impl ConversionOutcome {
    #[inline]
    #[must_use]
    pub fn display(&self) -> Option<&str> {
        match self {
            Self::Converted { display, .. } => Some(display),
            Self::InvalidInput => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Converted { value, .. } => Some(*value),
            Self::InvalidInput => None,
        }
    }
}
