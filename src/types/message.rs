use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{
    attributes::{Attribute, attribute_map},
    errors::NetworkError,
    signal::{Multiplexer, Signal},
};

bitflags::bitflags! {
    /// Message-level conditions found at construction. The empty set means no error.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct MessageErrors: u64 {
        /// At least one signal is `m<N>` but no signal is the `M` switch.
        const MUX_VALUE_WITHOUT_MUX_SIGNAL = 1;
    }
}

/// CAN message defined in the network description (DBC `BO_`).
///
/// Owns its signals, keyed by name. The multiplexer switch is resolved once at
/// construction and kept as the switch signal's name, so clones stay consistent.
#[derive(Default, Clone, PartialEq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "MessageRepr", into = "MessageRepr")
)]
pub struct Message {
    /// Numeric CAN ID as written in the description (bit 31 flags extended IDs in DBC).
    id: u64,
    name: String,
    /// Payload length in bytes.
    message_size: u64,
    /// Main transmitting node.
    transmitter: String,
    /// Additional transmitters (DBC `BO_TX_BU_`).
    message_transmitters: BTreeSet<String>,
    signals: BTreeMap<String, Signal>,
    attribute_values: BTreeMap<String, Attribute>,
    comment: String,

    // --- Derived at construction ---
    mux_signal: Option<String>,
    errors: MessageErrors,
}

impl Message {
    /// Builds a message from its full signal set.
    ///
    /// Fails when two signals or two attribute values share a name. Multiplexing
    /// problems do not fail: they show up in [`Message::error`].
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: u64,
        name: String,
        message_size: u64,
        transmitter: String,
        message_transmitters: BTreeSet<String>,
        signals: Vec<Signal>,
        attribute_values: Vec<Attribute>,
        comment: String,
    ) -> Result<Self, NetworkError> {
        let mut by_name: BTreeMap<String, Signal> = BTreeMap::new();
        for sig in signals {
            if by_name.contains_key(sig.name()) {
                return Err(NetworkError::DuplicateSignal {
                    message: name,
                    signal: sig.name().to_string(),
                });
            }
            by_name.insert(sig.name().to_string(), sig);
        }
        let attribute_values = attribute_map(&format!("message '{}'", name), attribute_values)?;

        let (mux_signal, errors) = resolve_mux(&name, &by_name);

        Ok(Message {
            id,
            name,
            message_size,
            transmitter,
            message_transmitters,
            signals: by_name,
            attribute_values,
            comment,
            mux_signal,
            errors,
        })
    }

    // --- General information ---
    pub fn id(&self) -> u64 {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn message_size(&self) -> u64 {
        self.message_size
    }
    pub fn transmitter(&self) -> &str {
        &self.transmitter
    }
    pub fn comment(&self) -> &str {
        &self.comment
    }

    // --- Errors ---
    pub fn error(&self) -> MessageErrors {
        self.errors
    }

    /// Checks one flag. Passing [`MessageErrors::empty()`] asks whether the message is error free.
    pub fn has_error(&self, code: MessageErrors) -> bool {
        if code.is_empty() {
            self.errors.is_empty()
        } else {
            self.errors.contains(code)
        }
    }

    // --- Transmitters ---
    pub fn has_message_transmitter(&self, name: &str) -> bool {
        self.message_transmitters.contains(name)
    }

    pub fn for_each_message_transmitter<F>(&self, mut f: F)
    where
        F: FnMut(&str),
    {
        self.message_transmitters.iter().for_each(|t| f(t));
    }

    // --- Signals ---

    /// Returns the signal called `name`.
    ///
    /// # Example
    /// ```
    /// use std::collections::BTreeSet;
    /// use can_network::{Message, Signal, SignalDef};
    ///
    /// let sig = Signal::create(8, SignalDef { name: "Speed".into(), bit_size: 8, ..Default::default() }).unwrap();
    /// let msg = Message::create(0x100, "Vehicle".into(), 8, "ECU".into(),
    ///     BTreeSet::new(), vec![sig], Vec::new(), String::new()).unwrap();
    /// assert!(msg.get_signal_by_name("Speed").is_some());
    /// assert!(msg.get_signal_by_name("Rpm").is_none());
    /// ```
    pub fn get_signal_by_name(&self, name: &str) -> Option<&Signal> {
        self.signals.get(name)
    }

    /// First signal, in name order, matching `pred`.
    pub fn find_signal<P>(&self, mut pred: P) -> Option<&Signal>
    where
        P: FnMut(&Signal) -> bool,
    {
        self.signals.values().find(|s| pred(s))
    }

    pub fn for_each_signal<F>(&self, f: F)
    where
        F: FnMut(&Signal),
    {
        self.signals.values().for_each(f);
    }

    /// Iterates the signals in name order.
    pub fn signals(&self) -> impl Iterator<Item = &Signal> {
        self.signals.values()
    }

    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }

    /// The multiplexer switch signal, if the message has one.
    pub fn mux_signal(&self) -> Option<&Signal> {
        self.mux_signal
            .as_deref()
            .and_then(|name| self.signals.get(name))
    }

    /// Signals present in `bytes`: plain signals, the switch, and the `m<N>` signals
    /// whose `N` equals the decoded switch value. Without a switch, `m<N>` signals are
    /// never yielded.
    ///
    /// # Panics
    /// If `bytes` does not cover the switch signal.
    pub fn active_signals<'a>(&'a self, bytes: &[u8]) -> impl Iterator<Item = &'a Signal> {
        let switch_value = self.mux_signal().map(|mux| mux.decode(bytes));
        self.signals
            .values()
            .filter(move |s| match s.multiplexer() {
                Multiplexer::Value(v) => switch_value == Some(v),
                Multiplexer::None | Multiplexer::Switch => true,
            })
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

    /// `true` if any signal of this message is `signal` itself (identity, not equality).
    pub(crate) fn owns_signal(&self, signal: &Signal) -> bool {
        self.signals.values().any(|s| std::ptr::eq(s, signal))
    }
}

/// Serialized form of a [`Message`]: only what [`Message::create`] takes, so the
/// switch and the error flags are recomputed on the way back in.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct MessageRepr {
    id: u64,
    name: String,
    message_size: u64,
    transmitter: String,
    #[serde(default)]
    message_transmitters: BTreeSet<String>,
    signals: Vec<Signal>,
    #[serde(default)]
    attribute_values: Vec<Attribute>,
    #[serde(default)]
    comment: String,
}

#[cfg(feature = "serde")]
impl From<Message> for MessageRepr {
    fn from(msg: Message) -> Self {
        MessageRepr {
            id: msg.id,
            name: msg.name,
            message_size: msg.message_size,
            transmitter: msg.transmitter,
            message_transmitters: msg.message_transmitters,
            signals: msg.signals.into_values().collect(),
            attribute_values: msg.attribute_values.into_values().collect(),
            comment: msg.comment,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<MessageRepr> for Message {
    type Error = NetworkError;

    fn try_from(repr: MessageRepr) -> Result<Self, Self::Error> {
        Message::create(
            repr.id,
            repr.name,
            repr.message_size,
            repr.transmitter,
            repr.message_transmitters,
            repr.signals,
            repr.attribute_values,
            repr.comment,
        )
    }
}

/// Picks the switch signal and computes the message error flags.
fn resolve_mux(
    owner: &str,
    signals: &BTreeMap<String, Signal>,
) -> (Option<String>, MessageErrors) {
    let switches: Vec<&Signal> = signals
        .values()
        .filter(|s| s.multiplexer() == Multiplexer::Switch)
        .collect();
    // the last switch in name order wins
    let mux_signal = switches.last().map(|s| s.name().to_string());
    if let Some(mux) = &mux_signal {
        if switches.len() > 1 {
            warn!(
                message_name = owner,
                switch = %mux,
                ignored = switches.len() - 1,
                "message declares more than one multiplexer switch, using the last"
            );
        }
    }

    let mut errors = MessageErrors::empty();
    let has_values = signals
        .values()
        .any(|s| matches!(s.multiplexer(), Multiplexer::Value(_)));
    if has_values && mux_signal.is_none() {
        warn!(message_name = owner, "multiplexed signals without a multiplexer switch");
        errors |= MessageErrors::MUX_VALUE_WITHOUT_MUX_SIGNAL;
    }
    (mux_signal, errors)
}
