//! Property tests for payload normalization and the byte cursor.

use base64::Engine;
use proptest::prelude::*;
use ttn_payload_decoder::profile::{DebugDecoder, ProfileDecoder};
use ttn_payload_decoder::{decode_payload, ByteCursor, PayloadInput, SensorBox};

fn debug_box() -> SensorBox {
    SensorBox::from_json_str(include_str!("data/ttn_box_debug.json")).unwrap()
}

proptest! {
    #[test]
    fn buffer_and_base64_decode_alike(bytes in prop::collection::vec(any::<u8>(), 3)) {
        let sensor_box = debug_box();
        let time = Some("2017-01-01T02:03:04Z".parse().unwrap());
        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);

        let from_buffer = decode_payload(PayloadInput::Bytes(&bytes), &sensor_box, time).unwrap();
        let from_base64 = decode_payload(PayloadInput::Base64(&encoded), &sensor_box, time).unwrap();
        prop_assert_eq!(from_buffer, from_base64);
    }

    #[test]
    fn debug_tolerates_any_length(bytes in prop::collection::vec(any::<u8>(), 1..16)) {
        let sensor_box = debug_box();
        let decoder = DebugDecoder::from_box(&sensor_box, sensor_box.ttn().unwrap()).unwrap();
        let output = decoder.decode(&bytes).unwrap();

        prop_assert_eq!(output.measurements.len(), bytes.len().min(3));
        prop_assert_eq!(output.warnings.is_empty(), bytes.len() == 3);
    }

    #[test]
    fn cursor_never_reads_past_end(bytes in prop::collection::vec(any::<u8>(), 0..12)) {
        let mut cursor = ByteCursor::new(&bytes);
        let mut read = 0;
        while cursor.read_u16_le().is_ok() {
            read += 2;
        }
        prop_assert_eq!(read, bytes.len() / 2 * 2);
        prop_assert_eq!(cursor.position(), read);
        prop_assert!(cursor.remaining() < 2);
    }
}
