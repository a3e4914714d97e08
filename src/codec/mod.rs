//! # codec
//!
//! Per-signal strategy table. A [`Codec`] is built once when a signal is created:
//! the byte order picks the field reader/writer, the value type and extended type
//! pick the raw ↔ physical routines. The hot path is then one indirect call with
//! no branching on the signal's configuration.

pub(crate) mod conversion;
pub(crate) mod layout;

use std::fmt;

use crate::types::signal::{ByteOrder, ExtendedValueType, ValueType};
use conversion::Scaling;
use layout::BitLayout;

type DecodeFn = fn(&BitLayout, &[u8]) -> u64;
type EncodeFn = fn(&BitLayout, u64, &mut [u8]);
type ToPhysFn = fn(&Scaling, u64) -> f64;
type ToRawFn = fn(&Scaling, f64) -> u64;

#[derive(Clone, Copy)]
pub(crate) struct Codec {
    layout: BitLayout,
    scaling: Scaling,
    decode: DecodeFn,
    encode: EncodeFn,
    raw_to_phys: ToPhysFn,
    phys_to_raw: ToRawFn,
}

// routines follow from the owning signal's byte order and value types
impl PartialEq for Codec {
    fn eq(&self, other: &Self) -> bool {
        self.layout == other.layout && self.scaling == other.scaling
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("layout", &self.layout)
            .field("scaling", &self.scaling)
            .finish_non_exhaustive()
    }
}

impl Codec {
    pub fn select(
        byte_order: ByteOrder,
        value_type: ValueType,
        extended_value_type: ExtendedValueType,
        start_bit: u64,
        bit_size: u64,
        factor: f64,
        offset: f64,
    ) -> Self {
        let (layout, decode, encode): (BitLayout, DecodeFn, EncodeFn) = match byte_order {
            ByteOrder::LittleEndian => (
                BitLayout::little_endian(start_bit, bit_size),
                layout::read_le,
                layout::write_le,
            ),
            ByteOrder::BigEndian => (
                BitLayout::big_endian(start_bit, bit_size),
                layout::read_be,
                layout::write_be,
            ),
        };

        let (raw_to_phys, phys_to_raw): (ToPhysFn, ToRawFn) = match (extended_value_type, value_type) {
            (ExtendedValueType::Integer, ValueType::Unsigned) => {
                (conversion::unsigned_to_phys, conversion::phys_to_unsigned)
            }
            (ExtendedValueType::Integer, ValueType::Signed) => {
                (conversion::signed_to_phys, conversion::phys_to_signed)
            }
            (ExtendedValueType::Float, _) => (conversion::float_to_phys, conversion::phys_to_float),
            (ExtendedValueType::Double, _) => {
                (conversion::double_to_phys, conversion::phys_to_double)
            }
        };

        Codec {
            layout,
            scaling: Scaling::new(factor, offset, bit_size),
            decode,
            encode,
            raw_to_phys,
            phys_to_raw,
        }
    }

    #[inline]
    pub fn required_bytes(&self) -> usize {
        self.layout.end_byte()
    }

    #[inline]
    pub fn decode(&self, bytes: &[u8]) -> u64 {
        (self.decode)(&self.layout, bytes)
    }

    #[inline]
    pub fn encode(&self, raw: u64, bytes: &mut [u8]) {
        (self.encode)(&self.layout, raw, bytes)
    }

    #[inline]
    pub fn raw_to_phys(&self, raw: u64) -> f64 {
        (self.raw_to_phys)(&self.scaling, raw)
    }

    #[inline]
    pub fn phys_to_raw(&self, phys: f64) -> u64 {
        (self.phys_to_raw)(&self.scaling, phys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_select_motorola_signed() {
        let c = Codec::select(
            ByteOrder::BigEndian,
            ValueType::Signed,
            ExtendedValueType::Integer,
            0,
            12,
            0.01,
            250.0,
        );
        let frame = [0xA5, 0xB6, 0xD9, 0, 0, 0, 0, 0];
        assert_eq!(c.required_bytes(), 3);
        let raw = c.decode(&frame);
        assert_eq!(raw, 0xDB6);
        assert_relative_eq!(c.raw_to_phys(raw), 244.14, epsilon = 1e-9);
    }

    #[test]
    fn test_select_intel_float() {
        let c = Codec::select(
            ByteOrder::LittleEndian,
            ValueType::Signed,
            ExtendedValueType::Float,
            8,
            32,
            1.0,
            0.0,
        );
        let mut frame = [0u8; 8];
        c.encode(c.phys_to_raw(1.0), &mut frame);
        assert_eq!(frame, [0, 0x00, 0x00, 0x80, 0x3F, 0, 0, 0]);
        assert_eq!(c.raw_to_phys(c.decode(&frame)), 1.0);
    }
}
