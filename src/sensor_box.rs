//! # Box Configuration
//!
//! Read-only description of a registered device ("box"): its sensors and the
//! TTN integration block that selects a decoding profile. The types mirror the
//! JSON documents the ingestion pipeline already stores, so they deserialize
//! straight from it.

use crate::error::ConfigLoadError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A device with an ordered sensor list and its integration settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorBox {
    #[serde(default)]
    pub sensors: Vec<Sensor>,

    #[serde(default)]
    pub integrations: Integrations,
}

/// One sensor of a box.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    #[serde(alias = "_id")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, rename = "sensorType", alias = "type")]
    pub sensor_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Integrations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttn: Option<TtnIntegration>,
}

/// Profile name plus the profile-specific decoding parameters.
///
/// The shape of `decodeOptions` depends on the profile: a list of decoder
/// steps for lora-serialization, a byteMask for debug. It is kept as raw JSON
/// and read through [`TtnIntegration::decode_steps`] or
/// [`TtnIntegration::debug_mask`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtnIntegration {
    pub profile: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decode_options: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_mask: Option<Vec<ByteMaskEntry>>,
}

/// Selects a sensor by any combination of id, title and type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_type: Option<String>,
}

impl SensorRef {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            sensor_id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            sensor_title: Some(title.into()),
            ..Default::default()
        }
    }

    /// True when none of the three reference fields is set
    pub fn is_empty(&self) -> bool {
        self.sensor_id.is_none() && self.sensor_title.is_none() && self.sensor_type.is_none()
    }

    /// Every present field has to match.
    pub fn matches(&self, sensor: &Sensor) -> bool {
        if self.is_empty() {
            return false;
        }
        let id_ok = self.sensor_id.as_deref().map_or(true, |id| id == sensor.id);
        let title_ok = self
            .sensor_title
            .as_deref()
            .map_or(true, |title| title == sensor.title);
        let type_ok = self
            .sensor_type
            .as_deref()
            .map_or(true, |ty| ty == sensor.sensor_type);
        id_ok && title_ok && type_ok
    }
}

impl TtnIntegration {
    /// `decodeOptions` read as lora-serialization steps.
    ///
    /// `None` when absent or not a list of decoder objects.
    pub fn decode_steps(&self) -> Option<Vec<DecodeOption>> {
        let options = self.decode_options.as_ref()?;
        Vec::<DecodeOption>::deserialize(options).ok()
    }

    /// The debug byteMask; `decodeOptions` wins over `byteMask` when both are set
    pub fn debug_mask(&self) -> Option<Vec<ByteMaskEntry>> {
        match &self.decode_options {
            Some(options) => Vec::<ByteMaskEntry>::deserialize(options).ok(),
            None => self.byte_mask.clone(),
        }
    }
}

/// One step of the lora-serialization pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOption {
    /// Transformer name; a missing key is left to validation to reject
    #[serde(default)]
    pub decoder: String,

    #[serde(flatten)]
    pub sensor: SensorRef,
}

impl DecodeOption {
    /// A step that only sets decode context (`unixtime`, `latLng`)
    pub fn context(decoder: impl Into<String>) -> Self {
        Self {
            decoder: decoder.into(),
            sensor: SensorRef::default(),
        }
    }

    pub fn for_sensor(decoder: impl Into<String>, sensor: SensorRef) -> Self {
        Self {
            decoder: decoder.into(),
            sensor,
        }
    }
}

/// One entry of a debug byteMask.
///
/// The numeric form is the byte width of the field, which must be 1; the
/// sensor is then taken from the same position of the sensor list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ByteMaskEntry {
    Width(u8),
    Sensor(SensorRef),
}

impl SensorBox {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigLoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// The TTN integration block, if configured
    pub fn ttn(&self) -> Option<&TtnIntegration> {
        self.integrations.ttn.as_ref()
    }

    /// First sensor matching the reference, in box order
    pub fn find_sensor(&self, reference: &SensorRef) -> Option<&Sensor> {
        self.sensors.iter().find(|s| reference.matches(s))
    }

    /// First sensor whose title matches, ignoring case
    pub fn find_sensor_by_title(&self, title: &str) -> Option<&Sensor> {
        let wanted = title.to_lowercase();
        self.sensors
            .iter()
            .find(|s| s.title.to_lowercase() == wanted)
    }
}
