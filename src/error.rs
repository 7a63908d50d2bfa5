//! # Decoder Error Handling
//!
//! This module defines the error types returned by the decoding entry points.
//! The `Display` text of every variant is relied upon by callers of the
//! ingestion API, so messages must not change.

use thiserror::Error;

/// The box configuration is structurally unusable for its profile.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The box carries no TTN integration block.
    #[error("box has no TTN configuration")]
    MissingIntegration,

    /// The integration names a profile this crate does not know.
    #[error("profile '{0}' is not supported")]
    UnsupportedProfile(String),

    /// The byteMask is missing or malformed.
    #[error("profile '{0}' requires a valid byteMask")]
    InvalidByteMask(String),

    /// The box has fewer sensors than the profile needs.
    #[error("box requires at least {0} sensors")]
    InsufficientSensors(usize),

    /// The decodeOptions list is missing or empty.
    #[error("profile '{0}' requires valid decodeOptions")]
    InvalidDecodeOptions(String),

    /// A value-producing decode option carries no sensor reference.
    #[error("invalid decodeOptions. requires at least one of [sensor_id, sensor_title, sensor_type]")]
    AmbiguousSensorRef,

    /// A decode option names a decoder missing from the transformer registry.
    #[error("'{0}' is not a supported transformer")]
    UnknownTransformer(String),

    /// A sensor reference does not match any sensor of the box.
    #[error("box does not contain sensors mentioned in byteMask")]
    UnresolvedSensor,
}

/// The payload itself cannot be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Zero bytes after normalization.
    #[error("payload may not be empty")]
    Empty,

    /// The base64 text could not be decoded.
    #[error("payload is not valid base64: {0}")]
    InvalidBase64(String),

    /// Fewer bytes than the decoder needs.
    #[error("incorrect amount of bytes: got {got}, should be {expected}")]
    Truncated { got: usize, expected: usize },

    /// A decoded unix timestamp is outside the representable range.
    #[error("invalid unix timestamp: {0}")]
    InvalidTimestamp(i64),
}

/// Any failure of `decode_buffer` / `decode_base64`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// Failure to load a box configuration from disk or text.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("could not read box configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse box configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_display() {
        let err: DecodeError = ConfigError::UnsupportedProfile(":^)".to_string()).into();
        assert_eq!(err.to_string(), "profile ':^)' is not supported");

        let err: DecodeError = PayloadError::Empty.into();
        assert_eq!(err.to_string(), "payload may not be empty");
    }
}
