//! # Payload Logging Utilities
//!
//! Helpers for logging payload bytes without flooding the log with large
//! uplinks.

use crate::constants::MAX_LOG_BYTES;
use std::time::Instant;

/// Log payload bytes in hex at debug level.
///
/// Output is cut after `MAX_LOG_BYTES` bytes.
pub fn log_payload_hex(prefix: &str, data: &[u8]) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }

    let display_data = &data[..data.len().min(MAX_LOG_BYTES)];
    let hex_str = crate::util::hex::format_hex_compact(display_data);
    let suffix = if data.len() > MAX_LOG_BYTES {
        format!(" ... ({} bytes total)", data.len())
    } else {
        String::new()
    };

    log::debug!(target: "ttn::payload", "{prefix}: {hex_str}{suffix}");
}

/// A simple performance timer for logging operation durations
#[derive(Debug)]
pub struct PerfTimer {
    start: Instant,
    operation: String,
}

impl PerfTimer {
    /// Start timing an operation
    pub fn start(operation: &str) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.to_string(),
        }
    }

    /// Finish timing and log the result
    pub fn finish(self) {
        let duration = self.start.elapsed();
        log::debug!("Operation '{}' took {:?}", self.operation, duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_payload_hex_long_input() {
        let data = vec![0xab; MAX_LOG_BYTES * 2];
        log_payload_hex("Long payload", &data); // Should not panic
        log_payload_hex("Empty payload", &[]);
    }

    #[test]
    fn test_perf_timer() {
        let timer = PerfTimer::start("test_operation");
        timer.finish(); // Should not panic
    }
}
