use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::Codec;
use crate::types::{
    attributes::{Attribute, attribute_map},
    errors::{CodecError, NetworkError},
};

/// Multiplexing role of a signal inside its message.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Multiplexer {
    /// Always present.
    #[default]
    None,
    /// The multiplexer switch (`M`).
    Switch,
    /// Present only when the switch carries this raw value (`m<N>`).
    Value(u64),
}

/// Bit numbering convention of a signal.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ByteOrder {
    /// Intel (`@1`): `start_bit` is the field LSB.
    #[default]
    LittleEndian,
    /// Motorola (`@0`): `start_bit` is the field MSB.
    BigEndian,
}

#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueType {
    Signed,
    #[default]
    Unsigned,
}

/// Interpretation of the raw bits (DBC `SIG_VALTYPE_`).
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExtendedValueType {
    #[default]
    Integer,
    /// IEEE-754 single precision, requires `bit_size == 32`.
    Float,
    /// IEEE-754 double precision, requires `bit_size == 64`.
    Double,
}

bitflags::bitflags! {
    /// Advisory conditions found while building a [`Signal`]. The empty set means no error.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct SignalErrors: u64 {
        const FLOAT_ENCODING_UNSUPPORTED_FOR_BYTE_ORDER = 1;
        const DOUBLE_ENCODING_UNSUPPORTED_FOR_BYTE_ORDER = 2;
        const SIGNAL_EXCEEDS_MESSAGE_SIZE = 4;
        const WRONG_BIT_SIZE_FOR_EXTENDED_DATA_TYPE = 8;
    }
}

/// Everything needed to build a [`Signal`].
///
/// This is what a description parser fills in for each `SG_` line before calling
/// [`Signal::create`].
///
/// # Example
/// ```
/// use can_network::{ByteOrder, Signal, SignalDef};
///
/// // SG_ EngineSpeed : 24|16@1+ (0.125,0) [0|8031.875] "rpm" Gateway
/// let sig = Signal::create(8, SignalDef {
///     name: "EngineSpeed".to_string(),
///     start_bit: 24,
///     bit_size: 16,
///     byte_order: ByteOrder::LittleEndian,
///     factor: 0.125,
///     maximum: 8031.875,
///     unit: "rpm".to_string(),
///     ..Default::default()
/// }).unwrap();
/// let frame = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88];
/// assert_eq!(sig.decode_phys(&frame), 2728.5);
/// ```
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignalDef {
    pub name: String,
    pub multiplexer: Multiplexer,
    pub start_bit: u64,
    pub bit_size: u64,
    pub byte_order: ByteOrder,
    pub value_type: ValueType,
    pub extended_value_type: ExtendedValueType,
    pub factor: f64,
    pub offset: f64,
    pub minimum: f64,
    pub maximum: f64,
    pub unit: String,
    /// Receiving node names.
    pub receivers: BTreeSet<String>,
    pub value_descriptions: BTreeMap<i64, String>,
    pub attribute_values: Vec<Attribute>,
    pub comment: String,
}

impl Default for SignalDef {
    fn default() -> Self {
        SignalDef {
            name: String::new(),
            multiplexer: Multiplexer::None,
            start_bit: 0,
            bit_size: 0,
            byte_order: ByteOrder::LittleEndian,
            value_type: ValueType::Unsigned,
            extended_value_type: ExtendedValueType::Integer,
            factor: 1.0,
            offset: 0.0,
            minimum: 0.0,
            maximum: 0.0,
            unit: String::new(),
            receivers: BTreeSet::new(),
            value_descriptions: BTreeMap::new(),
            attribute_values: Vec::new(),
            comment: String::new(),
        }
    }
}

/// A bit field inside a message payload, with its scaling law and a codec chosen at
/// construction.
///
/// All codec operations are read-only, so a `Signal` can be shared across threads and
/// decoded concurrently.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "SignalRepr", into = "SignalRepr")
)]
pub struct Signal {
    name: String,
    multiplexer: Multiplexer,
    start_bit: u64,
    bit_size: u64,
    byte_order: ByteOrder,
    value_type: ValueType,
    extended_value_type: ExtendedValueType,
    factor: f64,
    offset: f64,
    minimum: f64,
    maximum: f64,
    unit: String,
    receivers: BTreeSet<String>,
    value_descriptions: BTreeMap<i64, String>,
    attribute_values: BTreeMap<String, Attribute>,
    comment: String,
    errors: SignalErrors,
    codec: Codec,
}

impl Signal {
    /// Builds a signal for a message of `message_size` bytes.
    ///
    /// Layout problems (field past the end of the message, float/double with the wrong
    /// width) do not fail: they are recorded in [`Signal::errors`] and the signal stays
    /// usable. The only failure is two attribute values with the same name.
    ///
    /// An integer wider than 64 bits is flagged with
    /// [`SignalErrors::WRONG_BIT_SIZE_FOR_EXTENDED_DATA_TYPE`] and coded as its low 64 bits.
    pub fn create(message_size: u64, def: SignalDef) -> Result<Signal, NetworkError> {
        let errors = check_layout(message_size, &def);
        if !errors.is_empty() {
            debug!(signal = %def.name, ?errors, "signal built with error flags");
        }
        Signal::from_parts(def, errors)
    }

    fn from_parts(def: SignalDef, errors: SignalErrors) -> Result<Signal, NetworkError> {
        let attribute_values =
            attribute_map(&format!("signal '{}'", def.name), def.attribute_values)?;
        let codec = Codec::select(
            def.byte_order,
            def.value_type,
            def.extended_value_type,
            def.start_bit,
            def.bit_size,
            def.factor,
            def.offset,
        );
        Ok(Signal {
            name: def.name,
            multiplexer: def.multiplexer,
            start_bit: def.start_bit,
            bit_size: def.bit_size,
            byte_order: def.byte_order,
            value_type: def.value_type,
            extended_value_type: def.extended_value_type,
            factor: def.factor,
            offset: def.offset,
            minimum: def.minimum,
            maximum: def.maximum,
            unit: def.unit,
            receivers: def.receivers,
            value_descriptions: def.value_descriptions,
            attribute_values,
            comment: def.comment,
            errors,
            codec,
        })
    }

    /// Returns the definition this signal was built from.
    pub fn to_def(&self) -> SignalDef {
        SignalDef {
            name: self.name.clone(),
            multiplexer: self.multiplexer,
            start_bit: self.start_bit,
            bit_size: self.bit_size,
            byte_order: self.byte_order,
            value_type: self.value_type,
            extended_value_type: self.extended_value_type,
            factor: self.factor,
            offset: self.offset,
            minimum: self.minimum,
            maximum: self.maximum,
            unit: self.unit.clone(),
            receivers: self.receivers.clone(),
            value_descriptions: self.value_descriptions.clone(),
            attribute_values: self.attribute_values.values().cloned().collect(),
            comment: self.comment.clone(),
        }
    }

    // --- General information ---
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn multiplexer(&self) -> Multiplexer {
        self.multiplexer
    }
    /// `Some(N)` when the signal is only present for switch value `N`.
    pub fn multiplexer_switch_value(&self) -> Option<u64> {
        match self.multiplexer {
            Multiplexer::Value(v) => Some(v),
            _ => None,
        }
    }
    pub fn start_bit(&self) -> u64 {
        self.start_bit
    }
    pub fn bit_size(&self) -> u64 {
        self.bit_size
    }
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }
    pub fn extended_value_type(&self) -> ExtendedValueType {
        self.extended_value_type
    }
    pub fn factor(&self) -> f64 {
        self.factor
    }
    pub fn offset(&self) -> f64 {
        self.offset
    }
    pub fn minimum(&self) -> f64 {
        self.minimum
    }
    pub fn maximum(&self) -> f64 {
        self.maximum
    }
    pub fn unit(&self) -> &str {
        &self.unit
    }
    pub fn comment(&self) -> &str {
        &self.comment
    }

    // --- Errors ---
    pub fn errors(&self) -> SignalErrors {
        self.errors
    }

    /// Checks one flag. Passing [`SignalErrors::empty()`] asks whether the signal is error free.
    pub fn has_error(&self, code: SignalErrors) -> bool {
        if code.is_empty() {
            self.errors.is_empty()
        } else {
            self.errors.contains(code)
        }
    }

    // --- Receivers ---
    pub fn has_receiver(&self, name: &str) -> bool {
        self.receivers.contains(name)
    }

    pub fn for_each_receiver<F>(&self, mut f: F)
    where
        F: FnMut(&str),
    {
        self.receivers.iter().for_each(|r| f(r));
    }

    // --- Value descriptions ---
    pub fn get_value_description_by_value(&self, value: i64) -> Option<&str> {
        self.value_descriptions.get(&value).map(String::as_str)
    }

    pub fn for_each_value_description<F>(&self, mut f: F)
    where
        F: FnMut(i64, &str),
    {
        for (value, desc) in &self.value_descriptions {
            f(*value, desc);
        }
    }

    // --- Attributes ---
    pub fn get_attribute_value_by_name(&self, name: &str) -> Option<&Attribute> {
        self.attribute_values.get(name)
    }

    pub fn find_attribute_value<P>(&self, mut pred: P) -> Option<&Attribute>
    where
        P: FnMut(&Attribute) -> bool,
    {
        self.attribute_values.values().find(|a| pred(a))
    }

    pub fn for_each_attribute_value<F>(&self, f: F)
    where
        F: FnMut(&Attribute),
    {
        self.attribute_values.values().for_each(f);
    }

    // --- Codec ---

    /// Minimum payload length accepted by [`decode`](Self::decode) and [`encode`](Self::encode).
    #[inline]
    pub fn required_bytes(&self) -> usize {
        self.codec.required_bytes()
    }

    /// Extracts the raw bit pattern of the field, zero extended to 64 bits.
    ///
    /// # Panics
    /// If `bytes` is shorter than [`required_bytes`](Self::required_bytes).
    #[inline]
    #[track_caller]
    pub fn decode(&self, bytes: &[u8]) -> u64 {
        self.assert_len(bytes.len());
        self.codec.decode(bytes)
    }

    /// Writes the low `bit_size` bits of `raw` into the field, leaving every other bit untouched.
    ///
    /// # Panics
    /// If `bytes` is shorter than [`required_bytes`](Self::required_bytes).
    #[inline]
    #[track_caller]
    pub fn encode(&self, raw: u64, bytes: &mut [u8]) {
        self.assert_len(bytes.len());
        self.codec.encode(raw, bytes)
    }

    /// Checked [`decode`](Self::decode).
    pub fn try_decode(&self, bytes: &[u8]) -> Result<u64, CodecError> {
        self.check_len(bytes.len())?;
        Ok(self.codec.decode(bytes))
    }

    /// Checked [`encode`](Self::encode).
    pub fn try_encode(&self, raw: u64, bytes: &mut [u8]) -> Result<(), CodecError> {
        self.check_len(bytes.len())?;
        self.codec.encode(raw, bytes);
        Ok(())
    }

    /// Converts a raw value to its physical value (sign extension or IEEE reinterpretation,
    /// then `factor` and `offset`).
    #[inline]
    pub fn raw_to_phys(&self, raw: u64) -> f64 {
        self.codec.raw_to_phys(raw)
    }

    /// Converts a physical value back to raw bits.
    ///
    /// Integer signals round to nearest and saturate at the range of `bit_size` bits,
    /// NaN becomes `0`. Float and double signals return the IEEE bit pattern.
    #[inline]
    pub fn phys_to_raw(&self, phys: f64) -> u64 {
        self.codec.phys_to_raw(phys)
    }

    #[inline]
    #[track_caller]
    pub fn decode_phys(&self, bytes: &[u8]) -> f64 {
        self.raw_to_phys(self.decode(bytes))
    }

    #[inline]
    #[track_caller]
    pub fn encode_phys(&self, phys: f64, bytes: &mut [u8]) {
        self.encode(self.phys_to_raw(phys), bytes)
    }

    #[inline]
    #[track_caller]
    fn assert_len(&self, actual: usize) {
        let needed = self.codec.required_bytes();
        assert!(
            actual >= needed,
            "buffer too short for signal '{}': need at least {} bytes, got {}",
            self.name,
            needed,
            actual
        );
    }

    fn check_len(&self, actual: usize) -> Result<(), CodecError> {
        let needed = self.codec.required_bytes();
        if actual < needed {
            return Err(CodecError::BufferTooShort {
                signal: self.name.clone(),
                needed,
                actual,
            });
        }
        Ok(())
    }
}

/// Computes the advisory flags of a definition against its message size.
fn check_layout(message_size: u64, def: &SignalDef) -> SignalErrors {
    let mut errors = SignalErrors::empty();

    let wrong_width = match def.extended_value_type {
        ExtendedValueType::Integer => def.bit_size > 64,
        ExtendedValueType::Float => def.bit_size != 32,
        ExtendedValueType::Double => def.bit_size != 64,
    };
    if wrong_width {
        errors |= SignalErrors::WRONG_BIT_SIZE_FOR_EXTENDED_DATA_TYPE;
    }

    // Motorola: linear MSB-first position of the field's first bit
    let first_bit = match def.byte_order {
        ByteOrder::LittleEndian => def.start_bit,
        ByteOrder::BigEndian => (def.start_bit & !7) + (7 - (def.start_bit & 7)),
    };
    if first_bit.saturating_add(def.bit_size) > message_size.saturating_mul(8) {
        errors |= SignalErrors::SIGNAL_EXCEEDS_MESSAGE_SIZE;
    }

    errors
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct SignalRepr {
    #[serde(flatten)]
    def: SignalDef,
    #[serde(default)]
    errors: SignalErrors,
}

#[cfg(feature = "serde")]
impl From<Signal> for SignalRepr {
    fn from(sig: Signal) -> Self {
        SignalRepr {
            def: sig.to_def(),
            errors: sig.errors,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<SignalRepr> for Signal {
    type Error = NetworkError;

    fn try_from(repr: SignalRepr) -> Result<Self, Self::Error> {
        Signal::from_parts(repr.def, repr.errors)
    }
}
