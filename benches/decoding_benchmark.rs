use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ttn_payload_decoder::{decode_payload, PayloadInput, SensorBox};

fn load_box(json: &str) -> SensorBox {
    SensorBox::from_json_str(json).unwrap()
}

fn benchmark_sbhome(c: &mut Criterion) {
    let sensor_box = load_box(include_str!("../tests/data/ttn_box_sbhome.json"));
    let payload = [0xf9, 0x79, 0x6e, 0x14, 0x22, 0xe3, 0x00, 0x10, 0x00, 0x0c, 0x00, 0x00];

    c.bench_function("decode_sbhome", |b| {
        b.iter(|| {
            let result = decode_payload(PayloadInput::Bytes(black_box(&payload)), &sensor_box, None);
            let _ = black_box(result);
        })
    });
}

fn benchmark_lora_serialization(c: &mut Criterion) {
    let sensor_box = load_box(include_str!(
        "../tests/data/ttn_box_loraserialization_advanced.json"
    ));
    let payload = "+5ak5RgD5Dx1AA+M7lgpCQB1GQMAEnoADxj5WHoN";

    c.bench_function("decode_lora_serialization_base64", |b| {
        b.iter(|| {
            let result = decode_payload(PayloadInput::Base64(black_box(payload)), &sensor_box, None);
            let _ = black_box(result);
        })
    });
}

criterion_group!(benches, benchmark_sbhome, benchmark_lora_serialization);
criterion_main!(benches);
