//! Debug profile: one unsigned byte per sensor.
//!
//! The byteMask names which sensor each of the three payload bytes belongs
//! to. It is stored in `decodeOptions`, or in `byteMask` when there are no
//! decodeOptions. Short or long payloads are decoded as far as possible and flagged with
//! a warning instead of being rejected.

use super::{Profile, ProfileDecoder};
use crate::constants::{DEBUG_PAYLOAD_LEN, PROFILE_DEBUG};
use crate::error::{ConfigError, PayloadError};
use crate::measurement::{byte_count_warning, ProfileOutput, RawMeasurement};
use crate::payload::ByteCursor;
use crate::sensor_box::{ByteMaskEntry, SensorBox, TtnIntegration};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugDecoder {
    /// Sensor id per payload byte
    sensor_ids: Vec<String>,
}

impl DebugDecoder {
    pub fn from_box(sensor_box: &SensorBox, ttn: &TtnIntegration) -> Result<Self, ConfigError> {
        let mask = ttn
            .debug_mask()
            .filter(|mask| mask.len() == DEBUG_PAYLOAD_LEN && mask.iter().all(is_valid_entry))
            .ok_or_else(|| ConfigError::InvalidByteMask(PROFILE_DEBUG.to_string()))?;

        if sensor_box.sensors.len() < DEBUG_PAYLOAD_LEN {
            return Err(ConfigError::InsufficientSensors(DEBUG_PAYLOAD_LEN));
        }

        let sensor_ids = mask
            .iter()
            .zip(&sensor_box.sensors)
            .map(|(entry, positional)| match entry {
                ByteMaskEntry::Width(_) => Ok(positional.id.clone()),
                ByteMaskEntry::Sensor(reference) => sensor_box
                    .find_sensor(reference)
                    .map(|sensor| sensor.id.clone())
                    .ok_or(ConfigError::UnresolvedSensor),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { sensor_ids })
    }

    pub fn sensor_ids(&self) -> &[String] {
        &self.sensor_ids
    }
}

fn is_valid_entry(entry: &ByteMaskEntry) -> bool {
    match entry {
        ByteMaskEntry::Width(width) => *width == 1,
        ByteMaskEntry::Sensor(reference) => !reference.is_empty(),
    }
}

impl ProfileDecoder for DebugDecoder {
    fn decode(&self, payload: &[u8]) -> Result<ProfileOutput, PayloadError> {
        let mut output = ProfileOutput::default();
        if payload.len() != DEBUG_PAYLOAD_LEN {
            output.warn(byte_count_warning(payload.len(), DEBUG_PAYLOAD_LEN));
        }

        let mut cursor = ByteCursor::new(payload);
        for sensor_id in &self.sensor_ids {
            if !cursor.has(1) {
                break;
            }
            let value = cursor.read_u8()?;
            output
                .measurements
                .push(RawMeasurement::new(sensor_id.clone(), f64::from(value)));
        }

        Ok(output)
    }

    fn expected_len(&self) -> usize {
        DEBUG_PAYLOAD_LEN
    }

    fn profile(&self) -> Profile {
        Profile::Debug
    }
}
