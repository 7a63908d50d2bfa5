//! Unit tests for the logging functionality in the `ttn-payload-decoder` crate.

use ttn_payload_decoder::logging::{
    init_logger, init_logger_with_level, log_debug, log_error, log_info, log_warn,
};
use ttn_payload_decoder::util::log_payload_hex;

/// Tests that the logging helpers work before and after initialization.
#[test]
fn test_logging() {
    log_error("This is an error message");
    log_warn("This is a warning message");
    log_info("This is an info message");
    log_debug("This is a debug message");
    log_payload_hex("Payload", &[0x0f, 0x8c, 0xee, 0x58]);
}

/// Tests that the logger can be initialized repeatedly.
#[test]
fn test_init_logger() {
    init_logger();
    init_logger_with_level("debug");
    init_logger();
}
