//! # Measurement Assembly
//!
//! Profiles produce `RawMeasurement`s in processing order; timestamps are only
//! known for readings that followed a timestamp decoder. The assembler fills
//! in the default time, then reorders everything by `createdAt` for
//! presentation.

use crate::logging::log_warn;
use crate::transformer::Location;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A decoded reading before default timestamps are applied
#[derive(Debug, Clone, PartialEq)]
pub struct RawMeasurement {
    pub sensor_id: String,
    pub value: f64,
    pub timestamp: Option<DateTime<Utc>>,
    pub location: Option<Location>,
}

impl RawMeasurement {
    pub fn new(sensor_id: impl Into<String>, value: f64) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            value,
            timestamp: None,
            location: None,
        }
    }
}

/// One decoded sensor reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub sensor_id: String,
    pub value: f64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Measurements plus non-fatal warnings
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecodeResult {
    pub data: Vec<Measurement>,
    pub warnings: Vec<String>,
}

/// What a profile decoder hands to the assembler
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileOutput {
    pub measurements: Vec<RawMeasurement>,
    pub warnings: Vec<String>,
}

impl ProfileOutput {
    pub fn warn(&mut self, warning: String) {
        log_warn(&warning);
        self.warnings.push(warning);
    }
}

/// Warning text for payloads that are shorter or longer than the layout
pub fn byte_count_warning(got: usize, expected: usize) -> String {
    format!("incorrect amount of bytes: got {got}, should be {expected}")
}

/// Fills in missing timestamps and orders the result by `createdAt`.
#[derive(Debug, Clone, Copy)]
pub struct MeasurementAssembler {
    default_time: DateTime<Utc>,
}

impl MeasurementAssembler {
    /// `override_time` wins over `now` for readings without a decoded timestamp.
    pub fn new(override_time: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        Self {
            default_time: override_time.unwrap_or(now),
        }
    }

    pub fn default_time(&self) -> DateTime<Utc> {
        self.default_time
    }

    pub fn assemble(&self, output: ProfileOutput) -> DecodeResult {
        let mut data: Vec<Measurement> = output
            .measurements
            .into_iter()
            .map(|raw| Measurement {
                sensor_id: raw.sensor_id,
                value: raw.value,
                created_at: raw.timestamp.unwrap_or(self.default_time),
                location: raw.location,
            })
            .collect();

        // stable: equal timestamps keep processing order
        data.sort_by_key(|m| m.created_at);

        DecodeResult {
            data,
            warnings: output.warnings,
        }
    }
}
