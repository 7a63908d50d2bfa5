//! # Transformer Registry
//!
//! The lora-serialization profile describes a payload as a list of named
//! decoders. This module holds the process-wide table from decoder name to
//! byte width, effect kind and read function. The table is plain data and is
//! never modified after it is first built.

use crate::constants::LAT_LNG_DIVISOR;
use crate::error::PayloadError;
use crate::payload::ByteCursor;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// What a decoded value does to the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    /// Produces a measurement for the referenced sensor
    Value,
    /// Sets the timestamp for following measurements
    Timestamp,
    /// Sets the location for following measurements
    Location,
}

impl Effect {
    /// Context effects carry no sensor reference
    pub fn is_context(self) -> bool {
        !matches!(self, Effect::Value)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Effect::Value => "value",
            Effect::Timestamp => "timestamp",
            Effect::Location => "location",
        };
        f.write_str(name)
    }
}

/// A WGS84 position, serialized as `[longitude, latitude]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[f64; 2]")]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

impl From<Location> for [f64; 2] {
    fn from(location: Location) -> Self {
        [location.longitude, location.latitude]
    }
}

/// Output of a single transformer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decoded {
    Value(f64),
    Timestamp(DateTime<Utc>),
    Location(Location),
}

type ReadFn = fn(&mut ByteCursor<'_>) -> Result<Decoded, PayloadError>;

/// A registry entry
pub struct Transformer {
    pub name: &'static str,
    pub width: usize,
    pub effect: Effect,
    read: ReadFn,
}

impl Transformer {
    /// Consume `width` bytes from the cursor and decode them.
    pub fn read(&self, cursor: &mut ByteCursor<'_>) -> Result<Decoded, PayloadError> {
        (self.read)(cursor)
    }
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformer")
            .field("name", &self.name)
            .field("width", &self.width)
            .field("effect", &self.effect)
            .finish()
    }
}

fn read_uint8(cursor: &mut ByteCursor<'_>) -> Result<Decoded, PayloadError> {
    Ok(Decoded::Value(f64::from(cursor.read_u8()?)))
}

fn read_uint16(cursor: &mut ByteCursor<'_>) -> Result<Decoded, PayloadError> {
    Ok(Decoded::Value(f64::from(cursor.read_u16_le()?)))
}

fn read_uint32(cursor: &mut ByteCursor<'_>) -> Result<Decoded, PayloadError> {
    Ok(Decoded::Value(f64::from(cursor.read_u32_le()?)))
}

// Big endian, unlike every other field of the format.
fn read_temperature(cursor: &mut ByteCursor<'_>) -> Result<Decoded, PayloadError> {
    Ok(Decoded::Value(f64::from(cursor.read_i16_be()?) / 100.0))
}

fn read_humidity(cursor: &mut ByteCursor<'_>) -> Result<Decoded, PayloadError> {
    Ok(Decoded::Value(f64::from(cursor.read_u16_le()?) / 100.0))
}

fn read_rawfloat(cursor: &mut ByteCursor<'_>) -> Result<Decoded, PayloadError> {
    Ok(Decoded::Value(f64::from(cursor.read_f32_le()?)))
}

fn read_unixtime(cursor: &mut ByteCursor<'_>) -> Result<Decoded, PayloadError> {
    let seconds = i64::from(cursor.read_u32_le()?);
    DateTime::from_timestamp(seconds, 0)
        .map(Decoded::Timestamp)
        .ok_or(PayloadError::InvalidTimestamp(seconds))
}

fn read_lat_lng(cursor: &mut ByteCursor<'_>) -> Result<Decoded, PayloadError> {
    let latitude = f64::from(cursor.read_i32_le()?) / LAT_LNG_DIVISOR;
    let longitude = f64::from(cursor.read_i32_le()?) / LAT_LNG_DIVISOR;
    Ok(Decoded::Location(Location {
        longitude,
        latitude,
    }))
}

const TRANSFORMERS: &[Transformer] = &[
    Transformer {
        name: "uint8",
        width: 1,
        effect: Effect::Value,
        read: read_uint8,
    },
    Transformer {
        name: "uint16",
        width: 2,
        effect: Effect::Value,
        read: read_uint16,
    },
    Transformer {
        name: "uint32",
        width: 4,
        effect: Effect::Value,
        read: read_uint32,
    },
    Transformer {
        name: "temperature",
        width: 2,
        effect: Effect::Value,
        read: read_temperature,
    },
    Transformer {
        name: "humidity",
        width: 2,
        effect: Effect::Value,
        read: read_humidity,
    },
    Transformer {
        name: "rawfloat",
        width: 4,
        effect: Effect::Value,
        read: read_rawfloat,
    },
    Transformer {
        name: "unixtime",
        width: 4,
        effect: Effect::Timestamp,
        read: read_unixtime,
    },
    Transformer {
        name: "latLng",
        width: 8,
        effect: Effect::Location,
        read: read_lat_lng,
    },
];

static REGISTRY: Lazy<BTreeMap<&'static str, &'static Transformer>> =
    Lazy::new(|| TRANSFORMERS.iter().map(|t| (t.name, t)).collect());

/// Look up a transformer by decoder name
pub fn lookup(name: &str) -> Option<&'static Transformer> {
    REGISTRY.get(name).copied()
}

/// All registered transformers, ordered by name
pub fn all() -> impl Iterator<Item = &'static Transformer> {
    REGISTRY.values().copied()
}
