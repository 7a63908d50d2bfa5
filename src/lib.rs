//! # ttn-payload-decoder - Decoding TTN uplinks into sensor measurements
//!
//! The ttn-payload-decoder crate turns raw LoRaWAN uplink payloads, as relayed
//! by The Things Network, into measurements for the sensors of a registered
//! device ("box"). Each box selects a decoding profile in its TTN integration
//! block:
//!
//! - `debug` - one unsigned byte per sensor, mapped through a byteMask
//! - `sbhome` - the fixed 12 byte layout of the senseBox:home
//! - `lora-serialization` - a configurable list of named transformers
//!   (`temperature`, `humidity`, `uint16`, `unixtime`, `latLng`, ...) that may
//!   also carry timestamps and locations for the readings that follow them
//!
//! ## Usage
//!
//! ```rust
//! use ttn_payload_decoder::{decode_base64, SensorBox};
//!
//! let sensor_box = SensorBox::from_json_str(r#"{
//!     "sensors": [
//!         { "_id": "a", "title": "A", "sensorType": "x" },
//!         { "_id": "b", "title": "B", "sensorType": "x" },
//!         { "_id": "c", "title": "C", "sensorType": "x" }
//!     ],
//!     "integrations": { "ttn": { "profile": "debug", "byteMask": [1, 1, 1] } }
//! }"#).unwrap();
//!
//! let result = tokio_test::block_on(decode_base64("AQID", &sensor_box, None)).unwrap();
//! assert_eq!(result.data.len(), 3);
//! assert!(result.warnings.is_empty());
//! ```

pub mod constants;
pub mod decoder;
pub mod error;
pub mod logging;
pub mod measurement;
pub mod payload;
pub mod profile;
pub mod sensor_box;
pub mod transformer;
pub mod util;

pub use crate::error::{ConfigError, ConfigLoadError, DecodeError, PayloadError};
pub use crate::logging::{init_logger, log_info};

pub use decoder::{decode_base64, decode_buffer, decode_payload};
pub use measurement::{DecodeResult, Measurement, MeasurementAssembler};
pub use payload::{ByteCursor, PayloadInput};
pub use profile::{Profile, ProfileDecoder, ValidatedProfile};
pub use sensor_box::{ByteMaskEntry, DecodeOption, Sensor, SensorBox, SensorRef, TtnIntegration};
pub use transformer::{Effect, Location, Transformer};
