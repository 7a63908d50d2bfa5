#![no_main]

use libfuzzer_sys::fuzz_target;
use ttn_payload_decoder::{decode_payload, PayloadInput, SensorBox};

const BOXES: [&str; 3] = [
    include_str!("../../tests/data/ttn_box_debug.json"),
    include_str!("../../tests/data/ttn_box_sbhome.json"),
    include_str!("../../tests/data/ttn_box_loraserialization_advanced.json"),
];

fuzz_target!(|data: &[u8]| {
    for json in BOXES {
        let Ok(sensor_box) = SensorBox::from_json_str(json) else {
            continue;
        };

        // Raw bytes: truncation must surface as warnings or errors, never panics
        if let Ok(result) = decode_payload(PayloadInput::Bytes(data), &sensor_box, None) {
            assert!(result
                .data
                .windows(2)
                .all(|w| w[0].created_at <= w[1].created_at));
        }

        // Same bytes interpreted as base64 text
        if let Ok(text) = std::str::from_utf8(data) {
            let _ = decode_payload(PayloadInput::Base64(text), &sensor_box, None);
        }
    }

    // Arbitrary box configurations
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(sensor_box) = SensorBox::from_json_str(text) {
            let _ = decode_payload(PayloadInput::Bytes(&[0x01, 0x02, 0x03]), &sensor_box, None);
        }
    }
});
