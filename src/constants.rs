//! Decoder Constants
//!
//! Profile names, payload layouts and sensor titles shared by the profiles.

/// Profile name of the byte-per-sensor debugging profile
pub const PROFILE_DEBUG: &str = "debug";

/// Profile name of the senseBox:home LoRa profile
pub const PROFILE_SBHOME: &str = "sbhome";

/// Profile name of the configurable lora-serialization profile
pub const PROFILE_LORA_SERIALIZATION: &str = "lora-serialization";

/// Number of bytes (and byteMask entries) of a debug payload
pub const DEBUG_PAYLOAD_LEN: usize = 3;

/// Number of bytes of a senseBox:home payload
pub const SBHOME_PAYLOAD_LEN: usize = 12;

/// Number of sensors the senseBox:home hardware carries
pub const SBHOME_SENSOR_COUNT: usize = 5;

/// Sensor titles a senseBox:home box is registered with
pub const SBHOME_TITLE_TEMPERATURE: &str = "Temperatur";
pub const SBHOME_TITLE_HUMIDITY: &str = "rel. Luftfeuchte";
pub const SBHOME_TITLE_PRESSURE: &str = "Luftdruck";
pub const SBHOME_TITLE_LIGHT_INTENSITY: &str = "Beleuchtungsstärke";
pub const SBHOME_TITLE_UV_LIGHT: &str = "UV-Intensität";

/// Fixed-point divisor of the `latLng` transformer
pub const LAT_LNG_DIVISOR: f64 = 1e6;

/// Hex dumps in debug logs are cut after this many bytes
pub const MAX_LOG_BYTES: usize = 64;
