//! TTN uplink decoder entry points
//!
//! Both entry points run the same synchronous pipeline: check the integration,
//! normalize the payload, validate the profile, decode, assemble. They are
//! `async` only so the ingestion pipeline gets one uniform failure channel;
//! nothing inside awaits.

use crate::error::{ConfigError, DecodeError};
use crate::logging::log_debug;
use crate::measurement::{DecodeResult, MeasurementAssembler};
use crate::payload::PayloadInput;
use crate::profile::{ProfileDecoder, ValidatedProfile};
use crate::sensor_box::SensorBox;
use crate::util::logging::log_payload_hex;
use chrono::{DateTime, Utc};

/// Decode a raw byte payload for `sensor_box`.
///
/// Measurements without a decoded timestamp get `timestamp`, or the time of
/// this call when `None`.
pub async fn decode_buffer(
    payload: &[u8],
    sensor_box: &SensorBox,
    timestamp: Option<DateTime<Utc>>,
) -> Result<DecodeResult, DecodeError> {
    decode_payload(PayloadInput::Bytes(payload), sensor_box, timestamp)
}

/// Decode a base64 payload (TTN's `payload_raw`) for `sensor_box`.
pub async fn decode_base64(
    payload: &str,
    sensor_box: &SensorBox,
    timestamp: Option<DateTime<Utc>>,
) -> Result<DecodeResult, DecodeError> {
    decode_payload(PayloadInput::Base64(payload), sensor_box, timestamp)
}

/// Synchronous core shared by the async entry points
pub fn decode_payload(
    payload: PayloadInput<'_>,
    sensor_box: &SensorBox,
    timestamp: Option<DateTime<Utc>>,
) -> Result<DecodeResult, DecodeError> {
    let now = Utc::now();

    if sensor_box.ttn().is_none() {
        return Err(ConfigError::MissingIntegration.into());
    }
    let bytes = payload.normalize()?;
    log_payload_hex("Decoding payload", &bytes);

    let profile = ValidatedProfile::validate(sensor_box).map_err(|e| {
        log_debug(&format!("Rejected box configuration: {e}"));
        e
    })?;
    log::debug!(
        "Using profile '{}' ({} bytes expected, {} received)",
        profile.profile(),
        profile.expected_len(),
        bytes.len()
    );

    let output = profile.decode(&bytes)?;
    let result = MeasurementAssembler::new(timestamp, now).assemble(output);
    log::debug!(
        "Decoded {} measurements with {} warnings",
        result.data.len(),
        result.warnings.len()
    );
    Ok(result)
}
