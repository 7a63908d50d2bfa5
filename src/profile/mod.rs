//! # Decoding Profiles
//!
//! A box selects one of three profiles by name. Validation turns the box
//! configuration into a ready-to-run decoder with every sensor reference
//! resolved, so decoding itself never has to look at the configuration again.
//!
//! - `debug`: one unsigned byte per byteMask entry
//! - `sbhome`: the fixed senseBox:home layout
//! - `lora-serialization`: a configurable pipeline of named transformers

pub mod debug;
pub mod lora_serialization;
pub mod sbhome;

pub use debug::DebugDecoder;
pub use lora_serialization::{LoraSerializationDecoder, Step};
pub use sbhome::HomeDecoder;

use crate::constants::{PROFILE_DEBUG, PROFILE_LORA_SERIALIZATION, PROFILE_SBHOME};
use crate::error::{ConfigError, PayloadError};
use crate::measurement::ProfileOutput;
use crate::sensor_box::SensorBox;
use std::fmt;
use std::str::FromStr;

/// The supported profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    Debug,
    Home,
    LoraSerialization,
}

impl Profile {
    pub fn name(self) -> &'static str {
        match self {
            Profile::Debug => PROFILE_DEBUG,
            Profile::Home => PROFILE_SBHOME,
            Profile::LoraSerialization => PROFILE_LORA_SERIALIZATION,
        }
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            PROFILE_DEBUG => Ok(Profile::Debug),
            PROFILE_SBHOME => Ok(Profile::Home),
            PROFILE_LORA_SERIALIZATION => Ok(Profile::LoraSerialization),
            other => Err(ConfigError::UnsupportedProfile(other.to_string())),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoding strategy of a validated profile
pub trait ProfileDecoder {
    /// Decode a non-empty payload into raw measurements and warnings
    fn decode(&self, payload: &[u8]) -> Result<ProfileOutput, PayloadError>;

    /// Payload length the profile is laid out for
    fn expected_len(&self) -> usize;

    fn profile(&self) -> Profile;
}

/// A box configuration that passed validation for its profile
#[derive(Debug, Clone)]
pub enum ValidatedProfile {
    Debug(DebugDecoder),
    Home(HomeDecoder),
    LoraSerialization(LoraSerializationDecoder),
}

impl ValidatedProfile {
    /// Check the box against its profile's preconditions.
    ///
    /// Reports the first violation found; no payload byte is looked at.
    pub fn validate(sensor_box: &SensorBox) -> Result<Self, ConfigError> {
        let ttn = sensor_box.ttn().ok_or(ConfigError::MissingIntegration)?;
        let profile: Profile = ttn.profile.parse()?;

        let validated = match profile {
            Profile::Debug => ValidatedProfile::Debug(DebugDecoder::from_box(sensor_box, ttn)?),
            Profile::Home => ValidatedProfile::Home(HomeDecoder::from_box(sensor_box)?),
            Profile::LoraSerialization => ValidatedProfile::LoraSerialization(
                LoraSerializationDecoder::from_box(sensor_box, ttn)?,
            ),
        };
        Ok(validated)
    }

    fn decoder(&self) -> &dyn ProfileDecoder {
        match self {
            ValidatedProfile::Debug(decoder) => decoder,
            ValidatedProfile::Home(decoder) => decoder,
            ValidatedProfile::LoraSerialization(decoder) => decoder,
        }
    }
}

impl ProfileDecoder for ValidatedProfile {
    fn decode(&self, payload: &[u8]) -> Result<ProfileOutput, PayloadError> {
        self.decoder().decode(payload)
    }

    fn expected_len(&self) -> usize {
        self.decoder().expected_len()
    }

    fn profile(&self) -> Profile {
        self.decoder().profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_names() {
        for profile in [Profile::Debug, Profile::Home, Profile::LoraSerialization] {
            assert_eq!(profile.name().parse::<Profile>().unwrap(), profile);
        }
        assert_eq!(
            ":^)".parse::<Profile>().unwrap_err(),
            ConfigError::UnsupportedProfile(":^)".to_string())
        );
    }

    #[test]
    fn test_missing_integration() {
        let err = ValidatedProfile::validate(&SensorBox::default()).unwrap_err();
        assert_eq!(err.to_string(), "box has no TTN configuration");
    }
}
