//! # Utility Modules
//!
//! Hex conversion and payload logging helpers used by the decoder and the CLI.

pub mod hex;
pub mod logging;

pub use hex::{decode_hex, format_hex_compact, HexError};
pub use logging::{log_payload_hex, PerfTimer};
