//! senseBox:home profile
//!
//! The LoRa sketch shipped with the senseBox:home packs its five onboard
//! sensors into 12 little-endian bytes:
//!
//! | sensor | bytes | encoding |
//! |---|---|---|
//! | temperature | 0..2 | (°C + 18) × 771 |
//! | humidity | 2..4 | % × 100 |
//! | pressure | 4..6 | (hPa − 300) × 81.9187 |
//! | light intensity | 6..9 | lux |
//! | UV light | 9..12 | µW/cm² |
//!
//! Sensors are located on the box by their registered titles.

use super::{Profile, ProfileDecoder};
use crate::constants::*;
use crate::error::{ConfigError, PayloadError};
use crate::measurement::{byte_count_warning, ProfileOutput, RawMeasurement};
use crate::payload::ByteCursor;
use crate::sensor_box::SensorBox;

/// One field of the fixed layout
#[derive(Debug, Clone, Copy)]
struct HomeField {
    title: &'static str,
    width: usize,
    scale: fn(u32) -> f64,
}

const HOME_FIELDS: [HomeField; SBHOME_SENSOR_COUNT] = [
    HomeField {
        title: SBHOME_TITLE_TEMPERATURE,
        width: 2,
        scale: |raw| round1(f64::from(raw) / 771.0 - 18.0),
    },
    HomeField {
        title: SBHOME_TITLE_HUMIDITY,
        width: 2,
        scale: |raw| round1(f64::from(raw) / 100.0),
    },
    HomeField {
        title: SBHOME_TITLE_PRESSURE,
        width: 2,
        scale: |raw| round1(f64::from(raw) / 81.9187 + 300.0),
    },
    HomeField {
        title: SBHOME_TITLE_LIGHT_INTENSITY,
        width: 3,
        scale: f64::from,
    },
    HomeField {
        title: SBHOME_TITLE_UV_LIGHT,
        width: 3,
        scale: f64::from,
    },
];

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDecoder {
    /// Sensor id per layout field, in payload order
    sensor_ids: Vec<String>,
}

impl HomeDecoder {
    pub fn from_box(sensor_box: &SensorBox) -> Result<Self, ConfigError> {
        if sensor_box.sensors.len() < SBHOME_SENSOR_COUNT {
            return Err(ConfigError::InsufficientSensors(SBHOME_SENSOR_COUNT));
        }

        let sensor_ids = HOME_FIELDS
            .iter()
            .map(|field| {
                sensor_box
                    .find_sensor_by_title(field.title)
                    .map(|sensor| sensor.id.clone())
                    .ok_or(ConfigError::UnresolvedSensor)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { sensor_ids })
    }

    pub fn sensor_ids(&self) -> &[String] {
        &self.sensor_ids
    }
}

impl ProfileDecoder for HomeDecoder {
    fn decode(&self, payload: &[u8]) -> Result<ProfileOutput, PayloadError> {
        let mut output = ProfileOutput::default();
        if payload.len() != SBHOME_PAYLOAD_LEN {
            output.warn(byte_count_warning(payload.len(), SBHOME_PAYLOAD_LEN));
        }

        let mut cursor = ByteCursor::new(payload);
        for (field, sensor_id) in HOME_FIELDS.iter().zip(&self.sensor_ids) {
            if !cursor.has(field.width) {
                break;
            }
            let raw = match field.width {
                2 => u32::from(cursor.read_u16_le()?),
                _ => cursor.read_u24_le()?,
            };
            output
                .measurements
                .push(RawMeasurement::new(sensor_id.clone(), (field.scale)(raw)));
        }

        Ok(output)
    }

    fn expected_len(&self) -> usize {
        SBHOME_PAYLOAD_LEN
    }

    fn profile(&self) -> Profile {
        Profile::Home
    }
}
