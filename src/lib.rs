//! # can_network
//!
//! In-memory model of a **CAN network description** (DBC semantics) and a bit-exact
//! signal codec.
//!
//! ## Highlights
//! - **Validated object model**: [`Network`] owns [`Node`]s, [`ValueTable`]s, [`Message`]s
//!   (keyed by CAN ID), [`EnvironmentVariable`]s and attributes; [`Message`] owns its [`Signal`]s.
//! - **Factories**: every entity is built in one `create` call that takes ownership of its
//!   children and fails as a whole on duplicate keys ([`NetworkError`]).
//! - **Advisory flags**: layout problems are recorded as [`SignalErrors`] / [`MessageErrors`]
//!   instead of failing construction.
//! - **Codec**: [`Signal::decode`], [`Signal::encode`], [`Signal::raw_to_phys`] and
//!   [`Signal::phys_to_raw`] for Intel and Motorola layouts, signed/unsigned integers and
//!   IEEE float/double. The routines are picked once per signal at construction.
//! - **Multiplexing**: [`Message::mux_signal`] and [`Message::active_signals`].
//! - **Merging**: [`Network::merge`], [`Network::merge_with`] and [`Network::combine`] with an
//!   explicit [`MergePolicy`].
//!
//! ## Features
//! - `serde` (default): `Serialize`/`Deserialize` for every model type.
//!
//! ## Example
//! ```
//! use std::collections::BTreeSet;
//! use can_network::{ByteOrder, Message, Signal, SignalDef, ValueType};
//!
//! // BO_ 496 ExampleMessage: 8 PCM1
//! //  SG_ Temperature : 0|12@0- (0.01,250) [229.52|270.47] "degK" PCM1,FOO
//! let temp = Signal::create(8, SignalDef {
//!     name: "Temperature".into(),
//!     start_bit: 0,
//!     bit_size: 12,
//!     byte_order: ByteOrder::BigEndian,
//!     value_type: ValueType::Signed,
//!     factor: 0.01,
//!     offset: 250.0,
//!     unit: "degK".into(),
//!     ..Default::default()
//! }).unwrap();
//! let msg = Message::create(496, "ExampleMessage".into(), 8, "PCM1".into(),
//!     BTreeSet::new(), vec![temp], Vec::new(), String::new()).unwrap();
//!
//! let frame = [0xA5, 0xB6, 0xD9, 0x00, 0x00, 0x00, 0x00, 0x00];
//! let sig = msg.get_signal_by_name("Temperature").unwrap();
//! assert!((sig.decode_phys(&frame) - 244.14).abs() < 1e-9);
//! ```

pub(crate) mod codec;
pub mod types;

// Top-level re-exports
#[doc(inline)]
pub use crate::types::{
    attributes::{
        Attribute, AttributeDefinition, AttributeObject, AttributeValue, AttributeValueType,
    },
    bit_timing::BitTiming,
    env_var::{AccessType, EnvironmentVariable, VarType},
    errors::{CodecError, NetworkError},
    message::{Message, MessageErrors},
    network::{Collection, MergeConflict, MergePolicy, MergeReport, Network},
    node::Node,
    signal::{ByteOrder, ExtendedValueType, Multiplexer, Signal, SignalDef, SignalErrors, ValueType},
    value_table::{SignalType, ValueTable},
};
