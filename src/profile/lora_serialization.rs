//! lora-serialization profile
//!
//! `decodeOptions` is run as a small program over the payload: each step
//! reads its transformer's width from a shared forward cursor. Timestamp and
//! location steps only update the decode context, which then applies to
//! every later value step until a step of the same kind replaces it.

use super::{Profile, ProfileDecoder};
use crate::constants::PROFILE_LORA_SERIALIZATION;
use crate::error::{ConfigError, PayloadError};
use crate::measurement::{byte_count_warning, ProfileOutput, RawMeasurement};
use crate::payload::ByteCursor;
use crate::sensor_box::{SensorBox, TtnIntegration};
use crate::transformer::{self, Decoded, Location, Transformer};
use chrono::{DateTime, Utc};

/// A validated decode option
#[derive(Debug, Clone)]
pub struct Step {
    pub transformer: &'static Transformer,
    /// `None` for context steps
    pub sensor_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoraSerializationDecoder {
    steps: Vec<Step>,
}

impl LoraSerializationDecoder {
    pub fn from_box(sensor_box: &SensorBox, ttn: &TtnIntegration) -> Result<Self, ConfigError> {
        let options = ttn
            .decode_steps()
            .filter(|options| !options.is_empty())
            .ok_or_else(|| {
                ConfigError::InvalidDecodeOptions(PROFILE_LORA_SERIALIZATION.to_string())
            })?;

        let mut steps = Vec::with_capacity(options.len());
        for option in &options {
            let found = transformer::lookup(&option.decoder);

            if let Some(context) = found.filter(|t| t.effect.is_context()) {
                steps.push(Step {
                    transformer: context,
                    sensor_id: None,
                });
                continue;
            }

            if option.sensor.is_empty() {
                return Err(ConfigError::AmbiguousSensorRef);
            }
            let sensor = sensor_box
                .find_sensor(&option.sensor)
                .ok_or(ConfigError::UnresolvedSensor)?;
            let transformer = found
                .ok_or_else(|| ConfigError::UnknownTransformer(option.decoder.clone()))?;

            steps.push(Step {
                transformer,
                sensor_id: Some(sensor.id.clone()),
            });
        }

        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Accumulator of the pipeline fold
struct PipelineState<'a> {
    cursor: ByteCursor<'a>,
    timestamp: Option<DateTime<Utc>>,
    location: Option<Location>,
    emitted: Vec<RawMeasurement>,
}

impl<'a> PipelineState<'a> {
    fn new(payload: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(payload),
            timestamp: None,
            location: None,
            emitted: Vec::new(),
        }
    }

    fn apply(mut self, step: &Step) -> Result<Self, PayloadError> {
        match step.transformer.read(&mut self.cursor)? {
            Decoded::Timestamp(timestamp) => self.timestamp = Some(timestamp),
            Decoded::Location(location) => self.location = Some(location),
            Decoded::Value(value) => {
                if let Some(sensor_id) = &step.sensor_id {
                    self.emitted.push(RawMeasurement {
                        sensor_id: sensor_id.clone(),
                        value,
                        timestamp: self.timestamp,
                        location: self.location,
                    });
                }
            }
        }
        Ok(self)
    }
}

impl ProfileDecoder for LoraSerializationDecoder {
    fn decode(&self, payload: &[u8]) -> Result<ProfileOutput, PayloadError> {
        let expected = self.expected_len();
        if payload.len() < expected {
            return Err(PayloadError::Truncated {
                got: payload.len(),
                expected,
            });
        }

        let state = self
            .steps
            .iter()
            .try_fold(PipelineState::new(payload), PipelineState::apply)?;

        let mut output = ProfileOutput {
            measurements: state.emitted,
            warnings: Vec::new(),
        };
        if payload.len() > expected {
            output.warn(byte_count_warning(payload.len(), expected));
        }
        Ok(output)
    }

    fn expected_len(&self) -> usize {
        self.steps.iter().map(|step| step.transformer.width).sum()
    }

    fn profile(&self) -> Profile {
        Profile::LoraSerialization
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor_box::{DecodeOption, Integrations, Sensor, SensorRef};

    fn serialization_box(options: Option<Vec<DecodeOption>>) -> SensorBox {
        SensorBox {
            sensors: vec![
                Sensor {
                    id: "t".to_string(),
                    title: "Temperatur".to_string(),
                    sensor_type: "HDC1008".to_string(),
                },
                Sensor {
                    id: "h".to_string(),
                    title: "rel. Luftfeuchte".to_string(),
                    sensor_type: "HDC1008".to_string(),
                },
            ],
            integrations: Integrations {
                ttn: Some(TtnIntegration {
                    profile: PROFILE_LORA_SERIALIZATION.to_string(),
                    decode_options: options.map(|o| serde_json::to_value(o).unwrap()),
                    byte_mask: None,
                }),
            },
        }
    }

    fn build(options: Vec<DecodeOption>) -> Result<LoraSerializationDecoder, ConfigError> {
        let sensor_box = serialization_box(Some(options));
        LoraSerializationDecoder::from_box(&sensor_box, sensor_box.ttn().unwrap())
    }

    #[test]
    fn test_validation_order() {
        let missing = serialization_box(None);
        assert_eq!(
            LoraSerializationDecoder::from_box(&missing, missing.ttn().unwrap()).unwrap_err(),
            ConfigError::InvalidDecodeOptions("lora-serialization".to_string())
        );
        assert!(matches!(
            build(vec![]).unwrap_err(),
            ConfigError::InvalidDecodeOptions(_)
        ));

        // unknown decoder without reference: the reference is reported
        assert_eq!(
            build(vec![DecodeOption::context("decode")]).unwrap_err(),
            ConfigError::AmbiguousSensorRef
        );
        assert_eq!(
            build(vec![DecodeOption::for_sensor("decode", SensorRef::by_id("x"))]).unwrap_err(),
            ConfigError::UnresolvedSensor
        );
        assert_eq!(
            build(vec![DecodeOption::for_sensor("decode", SensorRef::by_id("t"))]).unwrap_err(),
            ConfigError::UnknownTransformer("decode".to_string())
        );
        // several fields are fine as long as one sensor matches all of them
        let both = SensorRef {
            sensor_id: Some("h".to_string()),
            sensor_type: Some("HDC1008".to_string()),
            ..Default::default()
        };
        assert!(build(vec![DecodeOption::for_sensor("humidity", both)]).is_ok());
    }

    #[test]
    fn test_malformed_decode_options() {
        let mut sensor_box = serialization_box(None);
        let ttn = sensor_box.integrations.ttn.as_mut().unwrap();
        ttn.decode_options = Some(serde_json::json!([1, 1, 1]));
        assert_eq!(
            LoraSerializationDecoder::from_box(&sensor_box, sensor_box.ttn().unwrap()).unwrap_err(),
            ConfigError::InvalidDecodeOptions("lora-serialization".to_string())
        );

        // an entry without a decoder name is reported by validation
        let ttn = sensor_box.integrations.ttn.as_mut().unwrap();
        ttn.decode_options = Some(serde_json::json!([{ "sensor_id": "t" }]));
        let err =
            LoraSerializationDecoder::from_box(&sensor_box, sensor_box.ttn().unwrap()).unwrap_err();
        assert_eq!(err, ConfigError::UnknownTransformer(String::new()));
        assert_eq!(err.to_string(), "'' is not a supported transformer");
    }

    #[test]
    fn test_context_follows_order() {
        let decoder = build(vec![
            DecodeOption::for_sensor("temperature", SensorRef::by_id("t")),
            DecodeOption::context("unixtime"),
            DecodeOption::for_sensor("humidity", SensorRef::by_title("rel. Luftfeuchte")),
        ])
        .unwrap();
        assert_eq!(decoder.expected_len(), 8);

        let payload = [0xfd, 0xee, 0x0f, 0x8c, 0xee, 0x58, 0xbe, 0x1e];
        let output = decoder.decode(&payload).unwrap();
        assert_eq!(output.measurements.len(), 2);
        assert_eq!(output.measurements[0].value, -5.3);
        assert!(output.measurements[0].timestamp.is_none());
        assert_eq!(output.measurements[1].sensor_id, "h");
        assert_eq!(output.measurements[1].value, 78.7);
        assert_eq!(
            output.measurements[1].timestamp.unwrap().timestamp(),
            1_492_028_431
        );
    }

    const LAT_LNG_MUENSTER: [u8; 8] = [0xa4, 0xe5, 0x18, 0x03, 0xe4, 0x3c, 0x75, 0x00];
    const LAT_LNG_52_8: [u8; 8] = [0x00, 0x75, 0x19, 0x03, 0x00, 0x12, 0x7a, 0x00];
    const UNIXTIME_0412: [u8; 4] = [0x0f, 0x8c, 0xee, 0x58];
    const UNIXTIME_0420: [u8; 4] = [0x0f, 0x18, 0xf9, 0x58];

    fn assert_location(measurement: &RawMeasurement, longitude: f64, latitude: f64) {
        let location = measurement.location.unwrap();
        assert_eq!(location.longitude, longitude);
        assert_eq!(location.latitude, latitude);
    }

    #[test]
    fn test_new_timestamp_keeps_location() {
        let decoder = build(vec![
            DecodeOption::context("latLng"),
            DecodeOption::context("unixtime"),
            DecodeOption::for_sensor("uint8", SensorRef::by_id("t")),
            DecodeOption::context("unixtime"),
            DecodeOption::for_sensor("uint8", SensorRef::by_id("h")),
        ])
        .unwrap();

        let payload = [
            &LAT_LNG_MUENSTER[..],
            &UNIXTIME_0412,
            &[5u8],
            &UNIXTIME_0420,
            &[7u8],
        ]
        .concat();
        let output = decoder.decode(&payload).unwrap();
        assert_eq!(output.measurements.len(), 2);
        let (first, second) = (&output.measurements[0], &output.measurements[1]);

        assert_eq!(first.timestamp.unwrap().timestamp(), 1_492_028_431);
        assert_location(first, 7.6833, 51.9633);

        assert_eq!(second.value, 7.0);
        assert_eq!(second.timestamp.unwrap().timestamp(), 1_492_719_631);
        assert_location(second, 7.6833, 51.9633);
    }

    #[test]
    fn test_new_location_keeps_timestamp() {
        let decoder = build(vec![
            DecodeOption::context("unixtime"),
            DecodeOption::context("latLng"),
            DecodeOption::for_sensor("uint8", SensorRef::by_id("t")),
            DecodeOption::context("latLng"),
            DecodeOption::for_sensor("uint8", SensorRef::by_id("h")),
        ])
        .unwrap();

        let payload = [
            &UNIXTIME_0412[..],
            &LAT_LNG_MUENSTER,
            &[5u8],
            &LAT_LNG_52_8,
            &[7u8],
        ]
        .concat();
        let output = decoder.decode(&payload).unwrap();
        assert_eq!(output.measurements.len(), 2);
        let (first, second) = (&output.measurements[0], &output.measurements[1]);

        assert_location(first, 7.6833, 51.9633);
        assert_eq!(second.timestamp.unwrap().timestamp(), 1_492_028_431);
        assert_location(second, 8.0, 52.0);
    }

    #[test]
    fn test_payload_length() {
        let decoder = build(vec![
            DecodeOption::context("unixtime"),
            DecodeOption::for_sensor("uint16", SensorRef::by_id("t")),
        ])
        .unwrap();

        assert_eq!(
            decoder.decode(&[0x0f, 0x8c, 0xee]).unwrap_err(),
            PayloadError::Truncated {
                got: 3,
                expected: 6
            }
        );

        let output = decoder
            .decode(&[0x0f, 0x8c, 0xee, 0x58, 0x9a, 0x02, 0xff])
            .unwrap();
        assert_eq!(output.measurements[0].value, 666.0);
        assert_eq!(output.warnings, vec!["incorrect amount of bytes: got 7, should be 6"]);
    }
}
