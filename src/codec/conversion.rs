//! Raw ↔ physical conversion routines, one per value interpretation.
//!
//! Integer conversions round to nearest and saturate at the range representable
//! in `bit_size` bits with the signal's signedness; NaN becomes 0.

/// Scaling law and field width shared by all conversion routines.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Scaling {
    pub factor: f64,
    pub offset: f64,
    /// Field width, clamped to 64.
    pub bit_size: u32,
    pub mask: u64,
}

impl Scaling {
    pub fn new(factor: f64, offset: f64, bit_size: u64) -> Self {
        let bit_size = bit_size.min(64) as u32;
        let mask = if bit_size >= 64 { u64::MAX } else { (1u64 << bit_size) - 1 };
        Scaling {
            factor,
            offset,
            bit_size,
            mask,
        }
    }

    #[inline]
    fn unscale(&self, phys: f64) -> f64 {
        (phys - self.offset) / self.factor
    }
}

/// Sign-extends the low `bit_size` bits of `raw`.
#[inline]
pub(crate) fn sign_extend(raw: u64, bit_size: u32) -> i64 {
    if bit_size == 0 {
        return 0;
    }
    let unused = 64 - bit_size;
    ((raw << unused) as i64) >> unused
}

// --- raw -> physical ---

#[inline]
pub(crate) fn unsigned_to_phys(s: &Scaling, raw: u64) -> f64 {
    (raw & s.mask) as f64 * s.factor + s.offset
}

#[inline]
pub(crate) fn signed_to_phys(s: &Scaling, raw: u64) -> f64 {
    sign_extend(raw, s.bit_size) as f64 * s.factor + s.offset
}

#[inline]
pub(crate) fn float_to_phys(s: &Scaling, raw: u64) -> f64 {
    f32::from_bits(raw as u32) as f64 * s.factor + s.offset
}

#[inline]
pub(crate) fn double_to_phys(s: &Scaling, raw: u64) -> f64 {
    f64::from_bits(raw) * s.factor + s.offset
}

// --- physical -> raw ---

#[inline]
pub(crate) fn phys_to_unsigned(s: &Scaling, phys: f64) -> u64 {
    let v = s.unscale(phys).round();
    // float -> int casts saturate at 0 and u64::MAX, NaN gives 0
    let raw = if v >= s.mask as f64 { s.mask } else { v as u64 };
    raw & s.mask
}

#[inline]
pub(crate) fn phys_to_signed(s: &Scaling, phys: f64) -> u64 {
    if s.bit_size == 0 {
        return 0;
    }
    let max = (s.mask >> 1) as i64;
    let min = -max - 1;
    let v = (s.unscale(phys).round() as i64).clamp(min, max);
    (v as u64) & s.mask
}

#[inline]
pub(crate) fn phys_to_float(s: &Scaling, phys: f64) -> u64 {
    (s.unscale(phys) as f32).to_bits() as u64
}

#[inline]
pub(crate) fn phys_to_double(s: &Scaling, phys: f64) -> u64 {
    s.unscale(phys).to_bits()
}
