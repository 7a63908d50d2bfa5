//! # Payload Input Handling
//!
//! Uplinks reach the decoder either as raw bytes or as the base64 text TTN
//! puts into `payload_raw`. Both forms are normalized into one byte buffer
//! before any profile looks at them.

pub mod cursor;

pub use cursor::ByteCursor;

use crate::error::PayloadError;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use std::borrow::Cow;

/// Standard alphabet, padding optional on input.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A payload in one of the two accepted encodings
#[derive(Debug, Clone, Copy)]
pub enum PayloadInput<'a> {
    Bytes(&'a [u8]),
    Base64(&'a str),
}

impl<'a> PayloadInput<'a> {
    /// Convert to bytes, rejecting payloads that end up empty.
    pub fn normalize(self) -> Result<Cow<'a, [u8]>, PayloadError> {
        let bytes = match self {
            PayloadInput::Bytes(bytes) => Cow::Borrowed(bytes),
            PayloadInput::Base64(text) => Cow::Owned(
                LENIENT_BASE64
                    .decode(text.trim())
                    .map_err(|e| PayloadError::InvalidBase64(e.to_string()))?,
            ),
        };

        if bytes.is_empty() {
            return Err(PayloadError::Empty);
        }
        Ok(bytes)
    }
}

impl<'a> From<&'a [u8]> for PayloadInput<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        PayloadInput::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for PayloadInput<'a> {
    fn from(text: &'a str) -> Self {
        PayloadInput::Base64(text)
    }
}
