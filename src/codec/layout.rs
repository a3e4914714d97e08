//! Byte window, shift and mask of a signal field, precomputed once per signal.
//!
//! Both numberings reduce to the same shape: read `byte_span` bytes starting at
//! `first_byte` into one accumulator (least significant byte first for Intel,
//! most significant byte first for Motorola), then shift right by `shift` and
//! mask to the field width.

/// Precomputed position of a signal field inside a payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct BitLayout {
    /// Index of the first payload byte touched by the field.
    pub first_byte: usize,
    /// Number of consecutive bytes touched by the field (at most 9).
    pub byte_span: usize,
    /// Right shift applied to the accumulator to align the field LSB at bit 0.
    pub shift: u32,
    /// `bit_size` low bits set.
    pub mask: u64,
}

impl BitLayout {
    /// Intel layout: `start_bit` is the LSB of the field, numbering grows with byte index.
    pub fn little_endian(start_bit: u64, bit_size: u64) -> Self {
        let size = bit_size.min(64);
        let first_byte = (start_bit / 8) as usize;
        let shift = start_bit % 8;
        let byte_span = if size == 0 { 0 } else { (shift + size).div_ceil(8) as usize };
        BitLayout {
            first_byte,
            byte_span,
            shift: shift as u32,
            mask: mask_for(size),
        }
    }

    /// Motorola layout: `start_bit` is the MSB of the field in sawtooth numbering
    /// (bit 7 of byte 0 is the first bit on the wire, the field then runs toward
    /// bit 0 and continues at bit 7 of the next byte).
    pub fn big_endian(start_bit: u64, bit_size: u64) -> Self {
        let size = bit_size.min(64);
        let first_byte = (start_bit / 8) as usize;
        // distance of the MSB from the top of its byte
        let lead = 7 - start_bit % 8;
        let end = lead + size;
        let byte_span = if size == 0 { 0 } else { end.div_ceil(8) as usize };
        let shift = (byte_span as u64 * 8).saturating_sub(end);
        BitLayout {
            first_byte,
            byte_span,
            shift: shift as u32,
            mask: mask_for(size),
        }
    }

    /// Number of payload bytes needed to cover the field.
    #[inline]
    pub fn end_byte(&self) -> usize {
        self.first_byte + self.byte_span
    }

    #[inline]
    fn window<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        &bytes[self.first_byte..self.end_byte()]
    }

    #[inline]
    fn window_mut<'a>(&self, bytes: &'a mut [u8]) -> &'a mut [u8] {
        &mut bytes[self.first_byte..self.end_byte()]
    }

    #[inline]
    fn field_mask(&self) -> u128 {
        (self.mask as u128) << self.shift
    }
}

#[inline]
fn mask_for(size: u64) -> u64 {
    if size >= 64 { u64::MAX } else { (1u64 << size) - 1 }
}

/// Reads an Intel field.
#[inline]
pub(crate) fn read_le(layout: &BitLayout, bytes: &[u8]) -> u64 {
    let acc = layout
        .window(bytes)
        .iter()
        .rev()
        .fold(0u128, |acc, &b| (acc << 8) | b as u128);
    ((acc >> layout.shift) as u64) & layout.mask
}

/// Reads a Motorola field.
#[inline]
pub(crate) fn read_be(layout: &BitLayout, bytes: &[u8]) -> u64 {
    let acc = layout
        .window(bytes)
        .iter()
        .fold(0u128, |acc, &b| (acc << 8) | b as u128);
    ((acc >> layout.shift) as u64) & layout.mask
}

/// Writes the low bits of `raw` into an Intel field, preserving the neighbouring bits.
#[inline]
pub(crate) fn write_le(layout: &BitLayout, raw: u64, bytes: &mut [u8]) {
    let window = layout.window_mut(bytes);
    let acc = window
        .iter()
        .rev()
        .fold(0u128, |acc, &b| (acc << 8) | b as u128);
    let acc = (acc & !layout.field_mask()) | (((raw & layout.mask) as u128) << layout.shift);
    for (i, b) in window.iter_mut().enumerate() {
        *b = (acc >> (8 * i)) as u8;
    }
}

/// Writes the low bits of `raw` into a Motorola field, preserving the neighbouring bits.
#[inline]
pub(crate) fn write_be(layout: &BitLayout, raw: u64, bytes: &mut [u8]) {
    let window = layout.window_mut(bytes);
    let acc = window.iter().fold(0u128, |acc, &b| (acc << 8) | b as u128);
    let acc = (acc & !layout.field_mask()) | (((raw & layout.mask) as u128) << layout.shift);
    let last = window.len().saturating_sub(1);
    for (i, b) in window.iter_mut().enumerate() {
        *b = (acc >> (8 * (last - i))) as u8;
    }
}
