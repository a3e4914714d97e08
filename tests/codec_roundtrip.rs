//! Round-trip grid over every byte order, value type and extended type, for every
//! (start_bit, bit_size) that fits an 8 byte payload.

use can_network::{ByteOrder, ExtendedValueType, Signal, SignalDef, SignalErrors, ValueType};

const SEED: [u8; 8] = [0x5A, 0xC3, 0x0F, 0x96, 0x3C, 0xE1, 0x78, 0x2D];

fn build_signal(
    byte_order: ByteOrder,
    value_type: ValueType,
    extended_value_type: ExtendedValueType,
    start_bit: u64,
    bit_size: u64,
) -> Signal {
    Signal::create(
        8,
        SignalDef {
            name: format!("S_{}_{}", start_bit, bit_size),
            start_bit,
            bit_size,
            byte_order,
            value_type,
            extended_value_type,
            ..Default::default()
        },
    )
    .unwrap()
}

/// (start_bit, bit_size) pairs whose field lies entirely inside 8 bytes.
fn layouts(byte_order: ByteOrder, sizes: &[u64]) -> Vec<(u64, u64)> {
    let mut out = Vec::new();
    for start in 0..64u64 {
        // linear position of the first bit in wire order
        let first = match byte_order {
            ByteOrder::LittleEndian => start,
            ByteOrder::BigEndian => (start & !7) + (7 - (start & 7)),
        };
        for &size in sizes {
            if first + size <= 64 {
                out.push((start, size));
            }
        }
    }
    out
}

fn samples(bit_size: u64) -> Vec<u64> {
    let mask = if bit_size >= 64 { u64::MAX } else { (1u64 << bit_size) - 1 };
    vec![
        0,
        1,
        mask,
        mask >> 1,
        (mask >> 1) + 1,
        0xA5A5_A5A5_A5A5_A5A5 & mask,
        0x0123_4567_89AB_CDEF & mask,
    ]
}

fn check_roundtrip(sig: &Signal) {
    for raw in samples(sig.bit_size()) {
        let mut buf = SEED;
        let previous = sig.decode(&buf);
        sig.encode(raw, &mut buf);
        assert_eq!(
            sig.decode(&buf),
            raw,
            "{:?} start {} size {}",
            sig.byte_order(),
            sig.start_bit(),
            sig.bit_size()
        );
        // writing the old value back restores every other bit
        sig.encode(previous, &mut buf);
        assert_eq!(buf, SEED, "neighbouring bits changed for {}", sig.name());
    }
}

#[test]
fn integer_grid() {
    let sizes: Vec<u64> = (1..=64).collect();
    for byte_order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
        for value_type in [ValueType::Unsigned, ValueType::Signed] {
            let grid = layouts(byte_order, &sizes);
            assert!(!grid.is_empty());
            for (start, size) in grid {
                let sig = build_signal(byte_order, value_type, ExtendedValueType::Integer, start, size);
                assert!(sig.has_error(SignalErrors::empty()));
                check_roundtrip(&sig);
            }
        }
    }
}

#[test]
fn float_grid() {
    for byte_order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
        for (start, size) in layouts(byte_order, &[32]) {
            let sig = build_signal(byte_order, ValueType::Signed, ExtendedValueType::Float, start, size);
            assert!(sig.has_error(SignalErrors::empty()));
            check_roundtrip(&sig);

            let mut buf = [0u8; 8];
            sig.encode(sig.phys_to_raw(-12.25), &mut buf);
            assert_eq!(sig.decode_phys(&buf), -12.25);
        }
    }
}

#[test]
fn double_grid() {
    for (byte_order, start) in [(ByteOrder::LittleEndian, 0), (ByteOrder::BigEndian, 7)] {
        let sig = build_signal(byte_order, ValueType::Signed, ExtendedValueType::Double, start, 64);
        assert!(sig.has_error(SignalErrors::empty()));
        check_roundtrip(&sig);

        let mut buf = [0u8; 8];
        sig.encode_phys(std::f64::consts::PI, &mut buf);
        assert_eq!(sig.decode_phys(&buf), std::f64::consts::PI);
    }
}

#[test]
fn scaling_roundtrip() {
    // f64 carries 53 bits of mantissa, so raw values stay exact up to 52 bits
    for value_type in [ValueType::Unsigned, ValueType::Signed] {
        for size in 1..=52u64 {
            let sig = Signal::create(
                8,
                SignalDef {
                    name: "Scaled".to_string(),
                    bit_size: size,
                    value_type,
                    factor: 0.5,
                    offset: -10.0,
                    ..Default::default()
                },
            )
            .unwrap();
            for raw in samples(size) {
                assert_eq!(
                    sig.phys_to_raw(sig.raw_to_phys(raw)),
                    raw,
                    "{:?} size {} raw {:#X}",
                    value_type,
                    size,
                    raw
                );
            }
        }
    }
}

#[test]
fn reference_vectors() {
    let le = build_signal(ByteOrder::LittleEndian, ValueType::Unsigned, ExtendedValueType::Integer, 0, 8);
    let be = build_signal(ByteOrder::BigEndian, ValueType::Unsigned, ExtendedValueType::Integer, 7, 8);
    let data = [0x42, 0, 0, 0, 0, 0, 0, 0];
    assert_eq!(le.decode(&data), 0x42);
    assert_eq!(be.decode(&data), 0x42);

    // Motorola MSB at bit 0: low bit of byte 0 then the top 7 bits of byte 1
    let be0 = build_signal(ByteOrder::BigEndian, ValueType::Unsigned, ExtendedValueType::Integer, 0, 8);
    assert_eq!(be0.decode(&[0x42, 0x80, 0, 0, 0, 0, 0, 0]), 0x40);

    let float = build_signal(ByteOrder::LittleEndian, ValueType::Signed, ExtendedValueType::Float, 0, 32);
    let mut buf = [0u8; 8];
    float.encode(0x3F80_0000, &mut buf);
    assert_eq!(float.raw_to_phys(float.decode(&buf)), 1.0);
    assert_eq!(float.phys_to_raw(1.0), 0x3F80_0000);
}
