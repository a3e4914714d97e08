use std::hint::black_box;

use can_network::{ByteOrder, Signal, SignalDef, ValueType};
use criterion::{Criterion as Bencher, criterion_group, criterion_main};

const MSG: [u8; 8] = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88];

fn engine_speed() -> Signal {
    // SG_ Engine_Speed : 24|16@1+ (0.125,0) [0|8031.88] "rpm" Vector__XXX
    Signal::create(
        8,
        SignalDef {
            name: "Engine_Speed".to_string(),
            start_bit: 24,
            bit_size: 16,
            factor: 0.125,
            maximum: 8031.88,
            unit: "rpm".to_string(),
            ..Default::default()
        },
    )
    .unwrap()
}

fn temperature() -> Signal {
    Signal::create(
        8,
        SignalDef {
            name: "Temperature".to_string(),
            start_bit: 0,
            bit_size: 12,
            byte_order: ByteOrder::BigEndian,
            value_type: ValueType::Signed,
            factor: 0.01,
            offset: 250.0,
            ..Default::default()
        },
    )
    .unwrap()
}

fn bench_decode_intel(b: &mut Bencher) {
    let sig = engine_speed();
    b.bench_function("bench_decode_intel", move |b| {
        b.iter(|| black_box(sig.decode(black_box(&MSG))))
    });
}

fn bench_decode_motorola(b: &mut Bencher) {
    let sig = temperature();
    b.bench_function("bench_decode_motorola", move |b| {
        b.iter(|| black_box(sig.decode(black_box(&MSG))))
    });
}

fn bench_decode_phys(b: &mut Bencher) {
    let sig = temperature();
    b.bench_function("bench_decode_phys", move |b| {
        b.iter(|| black_box(sig.decode_phys(black_box(&MSG))))
    });
}

fn bench_encode(b: &mut Bencher) {
    let sig = engine_speed();
    b.bench_function("bench_encode", move |b| {
        b.iter(|| {
            let mut buf = [0u8; 8];
            sig.encode(black_box(0x5544), &mut buf);
            black_box(buf)
        })
    });
}

criterion_group!(
    benches,
    bench_decode_intel,
    bench_decode_motorola,
    bench_decode_phys,
    bench_encode,
);

criterion_main!(benches);
