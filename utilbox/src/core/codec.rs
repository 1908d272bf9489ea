// src/core/codec.rs
use crate::error::CodecError;
use base64::Engine as _;
use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use tracing::debug;

/// Bytes left untouched by component encoding: alphanumerics plus `-_.!~*'()`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Standard alphabet that accepts input with or without `=` padding and
/// ignores non-zero trailing bits.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Encode,
    Decode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Base64,
    Url,
}

impl Mode {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Encode => Self::Decode,
            Self::Decode => Self::Encode,
        }
    }
}

fn require_text(input: &str) -> Result<(), CodecError> {
    if input.trim().is_empty() {
        return Err(CodecError::EmptyInput);
    }
    Ok(())
}

/// Encodes the UTF-8 bytes of `input` as padded standard Base64.
///
/// # Errors
///
/// Returns [`CodecError::EmptyInput`] for blank input.
pub fn encode_base64(input: &str) -> Result<String, CodecError> {
    require_text(input)?;
    encode_base64_bytes(input.as_bytes())
}

/// Encodes arbitrary bytes, e.g. the contents of a binary file.
///
/// # Errors
///
/// Returns [`CodecError::EmptyInput`] when `bytes` is empty.
pub fn encode_base64_bytes(bytes: &[u8]) -> Result<String, CodecError> {
    if bytes.is_empty() {
        return Err(CodecError::EmptyInput);
    }
    Ok(STANDARD.encode(bytes))
}

/// Decodes standard Base64 into UTF-8 text. ASCII whitespace anywhere in the
/// input is skipped and padding is optional, so wrapped output decodes.
///
/// # Errors
///
/// * [`CodecError::EmptyInput`] for blank input
/// * [`CodecError::InvalidBase64`] for bad alphabet or length
/// * [`CodecError::InvalidUtf8`] when the payload is not text
pub fn decode_base64(input: &str) -> Result<String, CodecError> {
    require_text(input)?;
    let compact: String = input.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = LENIENT
        .decode(compact)
        .map_err(|err| CodecError::InvalidBase64(err.to_string()))?;
    String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)
}

/// Percent-encodes everything except the URI component's unreserved set.
///
/// # Errors
///
/// Returns [`CodecError::EmptyInput`] for blank input.
pub fn encode_uri_component(input: &str) -> Result<String, CodecError> {
    require_text(input)?;
    Ok(encode_component(input))
}

/// Infallible form used when building URLs from already-validated parts.
#[must_use]
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Reverses [`encode_uri_component`]. Every `%` must start a two-digit hex escape.
///
/// # Errors
///
/// * [`CodecError::EmptyInput`] for blank input
/// * [`CodecError::InvalidPercentEncoding`] for a malformed escape
/// * [`CodecError::InvalidUtf8`] if the decoded bytes are not UTF-8
pub fn decode_uri_component(input: &str) -> Result<String, CodecError> {
    require_text(input)?;

    let bytes = input.as_bytes();
    for (position, _) in input.match_indices('%') {
        let well_formed = bytes
            .get(position.saturating_add(1)..position.saturating_add(3))
            .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return Err(CodecError::InvalidPercentEncoding { position });
        }
    }

    percent_decode_str(input)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| CodecError::InvalidUtf8)
}

/// Input/output pair behind an encode/decode widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcoder {
    pub codec: Codec,
    pub mode: Mode,
    pub input: String,
    pub output: String,
}

impl Transcoder {
    #[must_use]
    pub const fn new(codec: Codec) -> Self {
        Self {
            codec,
            mode: Mode::Encode,
            input: String::new(),
            output: String::new(),
        }
    }

    /// Runs the current mode over `input`. On failure `output` is cleared.
    ///
    /// # Errors
    ///
    /// Propagates the codec's [`CodecError`].
    pub fn process(&mut self) -> Result<&str, CodecError> {
        debug!(codec = ?self.codec, mode = ?self.mode, "processing");
        let result = match (self.codec, self.mode) {
            (Codec::Base64, Mode::Encode) => encode_base64(&self.input),
            (Codec::Base64, Mode::Decode) => decode_base64(&self.input),
            (Codec::Url, Mode::Encode) => encode_uri_component(&self.input),
            (Codec::Url, Mode::Decode) => decode_uri_component(&self.input),
        };
        match result {
            Ok(output) => {
                self.output = output;
                Ok(&self.output)
            }
            Err(err) => {
                self.output.clear();
                Err(err)
            }
        }
    }

    /// Flips the mode; when both sides hold text they trade places too.
    pub fn swap(&mut self) {
        self.mode = self.mode.flipped();
        if !self.input.is_empty() && !self.output.is_empty() {
            std::mem::swap(&mut self.input, &mut self.output);
        }
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.output.clear();
    }
}
