use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::{
    attributes::{Attribute, AttributeDefinition, attribute_map},
    bit_timing::BitTiming,
    env_var::EnvironmentVariable,
    errors::NetworkError,
    message::Message,
    node::Node,
    signal::Signal,
    value_table::ValueTable,
};

/// Root of a CAN network description: everything one DBC file declares.
///
/// Built in one step by [`Network::create`] and read-only afterwards, except for
/// [`merge`](Network::merge) which absorbs another network.
///
/// Messages are keyed by numeric ID; nodes, value tables, environment variables,
/// attribute definitions, defaults and values are keyed by name. All `find_*` and
/// `for_each_*` traversals run in ascending key order.
#[derive(Default, Clone, PartialEq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "NetworkRepr", into = "NetworkRepr")
)]
pub struct Network {
    // --- General information ---
    /// DBC `VERSION` string.
    version: String,
    /// DBC `NS_` symbols.
    new_symbols: BTreeSet<String>,
    bit_timing: BitTiming,
    comment: String,

    // --- Owned collections ---
    nodes: BTreeMap<String, Node>,
    value_tables: BTreeMap<String, ValueTable>,
    messages: BTreeMap<u64, Message>,
    environment_variables: BTreeMap<String, EnvironmentVariable>,
    attribute_definitions: BTreeMap<String, AttributeDefinition>,
    /// Default values (`BA_DEF_DEF_`), keyed by definition name.
    attribute_defaults: BTreeMap<String, Attribute>,
    /// Network-level attribute values (`BA_ "<name>" <value>;`).
    attribute_values: BTreeMap<String, Attribute>,
}

/// Serialized form of a [`Network`]. Collections travel as lists and are keyed
/// again by [`Network::create`], so duplicates are rejected on load.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct NetworkRepr {
    #[serde(default)]
    version: String,
    #[serde(default)]
    new_symbols: BTreeSet<String>,
    #[serde(default)]
    bit_timing: BitTiming,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    value_tables: Vec<ValueTable>,
    #[serde(default)]
    messages: Vec<Message>,
    #[serde(default)]
    environment_variables: Vec<EnvironmentVariable>,
    #[serde(default)]
    attribute_definitions: Vec<AttributeDefinition>,
    #[serde(default)]
    attribute_defaults: Vec<Attribute>,
    #[serde(default)]
    attribute_values: Vec<Attribute>,
    #[serde(default)]
    comment: String,
}

#[cfg(feature = "serde")]
impl From<Network> for NetworkRepr {
    fn from(net: Network) -> Self {
        NetworkRepr {
            version: net.version,
            new_symbols: net.new_symbols,
            bit_timing: net.bit_timing,
            nodes: net.nodes.into_values().collect(),
            value_tables: net.value_tables.into_values().collect(),
            messages: net.messages.into_values().collect(),
            environment_variables: net.environment_variables.into_values().collect(),
            attribute_definitions: net.attribute_definitions.into_values().collect(),
            attribute_defaults: net.attribute_defaults.into_values().collect(),
            attribute_values: net.attribute_values.into_values().collect(),
            comment: net.comment,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<NetworkRepr> for Network {
    type Error = NetworkError;

    fn try_from(repr: NetworkRepr) -> Result<Self, Self::Error> {
        Network::create(
            repr.version,
            repr.new_symbols,
            repr.bit_timing,
            repr.nodes,
            repr.value_tables,
            repr.messages,
            repr.environment_variables,
            repr.attribute_definitions,
            repr.attribute_defaults,
            repr.attribute_values,
            repr.comment,
        )
    }
}

/// The top-level collections of a [`Network`], used to report merge conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Node,
    ValueTable,
    Message,
    EnvironmentVariable,
    AttributeDefinition,
    AttributeDefault,
    AttributeValue,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Collection::Node => "node",
            Collection::ValueTable => "value table",
            Collection::Message => "message",
            Collection::EnvironmentVariable => "environment variable",
            Collection::AttributeDefinition => "attribute definition",
            Collection::AttributeDefault => "attribute default",
            Collection::AttributeValue => "network attribute",
        })
    }
}

/// What to do when both networks of a merge hold the same key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// First wins: the entry already present is kept, the incoming one is dropped
    /// and listed in the [`MergeReport`].
    #[default]
    KeepExisting,
    /// Refuse the whole merge if any key collides; the receiving network is left untouched.
    Reject,
}

/// A key present in both networks of a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConflict {
    pub collection: Collection,
    /// The colliding name, or the message ID in decimal.
    pub key: String,
}

/// Outcome of a merge.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// Number of entries moved into the receiving network.
    pub added: usize,
    /// Entries of the incoming network that were dropped.
    pub conflicts: Vec<MergeConflict>,
}

impl MergeReport {
    /// `true` when nothing was dropped.
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

impl Network {
    /// Builds a network from fully built children.
    ///
    /// Fails as a whole if two children of one collection share a key.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        version: String,
        new_symbols: BTreeSet<String>,
        bit_timing: BitTiming,
        nodes: Vec<Node>,
        value_tables: Vec<ValueTable>,
        messages: Vec<Message>,
        environment_variables: Vec<EnvironmentVariable>,
        attribute_definitions: Vec<AttributeDefinition>,
        attribute_defaults: Vec<Attribute>,
        attribute_values: Vec<Attribute>,
        comment: String,
    ) -> Result<Self, NetworkError> {
        let nodes = keyed(
            nodes,
            |n| n.name().to_string(),
            |_, n| NetworkError::DuplicateNode {
                name: n.name().to_string(),
            },
        )?;
        let value_tables = keyed(
            value_tables,
            |v| v.name().to_string(),
            |_, v| NetworkError::DuplicateValueTable {
                name: v.name().to_string(),
            },
        )?;
        let messages = keyed(
            messages,
            |m| m.id(),
            |existing, m| NetworkError::DuplicateMessage {
                id: m.id(),
                name: existing.name().to_string(),
            },
        )?;
        let environment_variables = keyed(
            environment_variables,
            |e| e.name().to_string(),
            |_, e| NetworkError::DuplicateEnvironmentVariable {
                name: e.name().to_string(),
            },
        )?;
        let attribute_definitions = keyed(
            attribute_definitions,
            |d| d.name().to_string(),
            |_, d| NetworkError::DuplicateAttributeDefinition {
                name: d.name().to_string(),
            },
        )?;
        let attribute_defaults = attribute_map("attribute defaults", attribute_defaults)?;
        let attribute_values = attribute_map("network", attribute_values)?;

        Ok(Network {
            version,
            new_symbols,
            bit_timing,
            comment,
            nodes,
            value_tables,
            messages,
            environment_variables,
            attribute_definitions,
            attribute_defaults,
            attribute_values,
        })
    }

    // --- General information ---
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn bit_timing(&self) -> &BitTiming {
        &self.bit_timing
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn has_new_symbol(&self, symbol: &str) -> bool {
        self.new_symbols.contains(symbol)
    }

    pub fn for_each_new_symbol<F>(&self, mut f: F)
    where
        F: FnMut(&str),
    {
        self.new_symbols.iter().for_each(|s| f(s));
    }

    // --- Nodes ---
    pub fn get_node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    pub fn find_node<P>(&self, mut pred: P) -> Option<&Node>
    where
        P: FnMut(&Node) -> bool,
    {
        self.nodes.values().find(|n| pred(n))
    }

    pub fn for_each_node<F>(&self, f: F)
    where
        F: FnMut(&Node),
    {
        self.nodes.values().for_each(f);
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    // --- Value tables ---
    pub fn get_value_table_by_name(&self, name: &str) -> Option<&ValueTable> {
        self.value_tables.get(name)
    }

    pub fn find_value_table<P>(&self, mut pred: P) -> Option<&ValueTable>
    where
        P: FnMut(&ValueTable) -> bool,
    {
        self.value_tables.values().find(|v| pred(v))
    }

    pub fn for_each_value_table<F>(&self, f: F)
    where
        F: FnMut(&ValueTable),
    {
        self.value_tables.values().for_each(f);
    }

    // --- Messages ---

    /// Returns the message with the given CAN ID.
    ///
    /// # Parameters
    /// - `id`: the numeric ID as stored in the description.
    ///
    /// # Returns
    /// - `Some(&Message)` if a message has this ID.
    /// - `None` otherwise.
    pub fn get_message_by_id(&self, id: u64) -> Option<&Message> {
        self.messages.get(&id)
    }

    /// Returns the first message, in ID order, called `name`.
    pub fn get_message_by_name(&self, name: &str) -> Option<&Message> {
        self.messages.values().find(|m| m.name() == name)
    }

    pub fn find_message<P>(&self, mut pred: P) -> Option<&Message>
    where
        P: FnMut(&Message) -> bool,
    {
        self.messages.values().find(|m| pred(m))
    }

    pub fn for_each_message<F>(&self, f: F)
    where
        F: FnMut(&Message),
    {
        self.messages.values().for_each(f);
    }

    /// Iterates the messages in ascending ID order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.values()
    }

    /// Returns the message that owns `signal`.
    ///
    /// Ownership is checked by identity, so `signal` must be a reference obtained from
    /// this network; an equal signal living elsewhere is not found. Linear in the
    /// number of messages.
    pub fn find_parent_message(&self, signal: &Signal) -> Option<&Message> {
        self.messages.values().find(|m| m.owns_signal(signal))
    }

    // --- Environment variables ---
    pub fn get_environment_variable_by_name(&self, name: &str) -> Option<&EnvironmentVariable> {
        self.environment_variables.get(name)
    }

    pub fn find_environment_variable<P>(&self, mut pred: P) -> Option<&EnvironmentVariable>
    where
        P: FnMut(&EnvironmentVariable) -> bool,
    {
        self.environment_variables.values().find(|e| pred(e))
    }

    pub fn for_each_environment_variable<F>(&self, f: F)
    where
        F: FnMut(&EnvironmentVariable),
    {
        self.environment_variables.values().for_each(f);
    }

    // --- Attribute definitions ---
    pub fn get_attribute_definition_by_name(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attribute_definitions.get(name)
    }

    pub fn find_attribute_definition<P>(&self, mut pred: P) -> Option<&AttributeDefinition>
    where
        P: FnMut(&AttributeDefinition) -> bool,
    {
        self.attribute_definitions.values().find(|d| pred(d))
    }

    pub fn for_each_attribute_definition<F>(&self, f: F)
    where
        F: FnMut(&AttributeDefinition),
    {
        self.attribute_definitions.values().for_each(f);
    }

    // --- Attribute defaults ---
    pub fn get_attribute_default_by_name(&self, name: &str) -> Option<&Attribute> {
        self.attribute_defaults.get(name)
    }

    pub fn find_attribute_default<P>(&self, mut pred: P) -> Option<&Attribute>
    where
        P: FnMut(&Attribute) -> bool,
    {
        self.attribute_defaults.values().find(|a| pred(a))
    }

    pub fn for_each_attribute_default<F>(&self, f: F)
    where
        F: FnMut(&Attribute),
    {
        self.attribute_defaults.values().for_each(f);
    }

    // --- Network attribute values ---
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

    // --- Merging ---

    /// Moves every entry of `other` into `self`, keeping existing entries on key collisions.
    ///
    /// Equivalent to [`merge_with`](Self::merge_with) with [`MergePolicy::KeepExisting`].
    /// `self` keeps its version, bit timing and comment; new symbols are unioned.
    pub fn merge(&mut self, other: Network) -> MergeReport {
        self.absorb(other)
    }

    /// Moves every entry of `other` into `self` under `policy`.
    ///
    /// With [`MergePolicy::Reject`] nothing is moved when any key collides, and the
    /// error names the first collision and how many there are.
    pub fn merge_with(
        &mut self,
        other: Network,
        policy: MergePolicy,
    ) -> Result<MergeReport, NetworkError> {
        if policy == MergePolicy::Reject {
            let conflicts = self.conflicts_with(&other);
            if let Some(first) = conflicts.first() {
                return Err(NetworkError::MergeConflict {
                    collection: first.collection,
                    key: first.key.clone(),
                    count: conflicts.len(),
                });
            }
        }
        Ok(self.absorb(other))
    }

    /// Builds a new network from `a` and `b`, with `a` taking the role of the receiving side.
    pub fn combine(
        a: Network,
        b: Network,
        policy: MergePolicy,
    ) -> Result<(Network, MergeReport), NetworkError> {
        let mut out = a;
        let report = out.merge_with(b, policy)?;
        Ok((out, report))
    }

    /// Keys of `other` that already exist in `self`, in collection then key order.
    pub fn conflicts_with(&self, other: &Network) -> Vec<MergeConflict> {
        let mut out = Vec::new();
        collisions(&self.nodes, &other.nodes, Collection::Node, &mut out);
        collisions(&self.value_tables, &other.value_tables, Collection::ValueTable, &mut out);
        collisions(&self.messages, &other.messages, Collection::Message, &mut out);
        collisions(
            &self.environment_variables,
            &other.environment_variables,
            Collection::EnvironmentVariable,
            &mut out,
        );
        collisions(
            &self.attribute_definitions,
            &other.attribute_definitions,
            Collection::AttributeDefinition,
            &mut out,
        );
        collisions(
            &self.attribute_defaults,
            &other.attribute_defaults,
            Collection::AttributeDefault,
            &mut out,
        );
        collisions(
            &self.attribute_values,
            &other.attribute_values,
            Collection::AttributeValue,
            &mut out,
        );
        out
    }

    fn absorb(&mut self, other: Network) -> MergeReport {
        let mut report = MergeReport::default();
        self.new_symbols.extend(other.new_symbols);
        absorb_map(&mut self.nodes, other.nodes, Collection::Node, &mut report);
        absorb_map(
            &mut self.value_tables,
            other.value_tables,
            Collection::ValueTable,
            &mut report,
        );
        absorb_map(&mut self.messages, other.messages, Collection::Message, &mut report);
        absorb_map(
            &mut self.environment_variables,
            other.environment_variables,
            Collection::EnvironmentVariable,
            &mut report,
        );
        absorb_map(
            &mut self.attribute_definitions,
            other.attribute_definitions,
            Collection::AttributeDefinition,
            &mut report,
        );
        absorb_map(
            &mut self.attribute_defaults,
            other.attribute_defaults,
            Collection::AttributeDefault,
            &mut report,
        );
        absorb_map(
            &mut self.attribute_values,
            other.attribute_values,
            Collection::AttributeValue,
            &mut report,
        );
        debug!(
            added = report.added,
            conflicts = report.conflicts.len(),
            "merged network"
        );
        report
    }
}

/// Indexes `items` by `key`; `dup(existing, incoming)` builds the error for a repeated key.
fn keyed<K, V>(
    items: Vec<V>,
    key: impl Fn(&V) -> K,
    dup: impl Fn(&V, &V) -> NetworkError,
) -> Result<BTreeMap<K, V>, NetworkError>
where
    K: Ord,
{
    let mut map = BTreeMap::new();
    for item in items {
        let k = key(&item);
        if let Some(existing) = map.get(&k) {
            return Err(dup(existing, &item));
        }
        map.insert(k, item);
    }
    Ok(map)
}

fn collisions<K, V>(
    ours: &BTreeMap<K, V>,
    theirs: &BTreeMap<K, V>,
    collection: Collection,
    out: &mut Vec<MergeConflict>,
) where
    K: Ord + fmt::Display,
{
    out.extend(
        theirs
            .keys()
            .filter(|k| ours.contains_key(*k))
            .map(|k| MergeConflict {
                collection,
                key: k.to_string(),
            }),
    );
}

fn absorb_map<K, V>(
    ours: &mut BTreeMap<K, V>,
    theirs: BTreeMap<K, V>,
    collection: Collection,
    report: &mut MergeReport,
) where
    K: Ord + fmt::Display,
{
    for (k, v) in theirs {
        if ours.contains_key(&k) {
            warn!(%collection, key = %k, "merge conflict, keeping existing entry");
            report.conflicts.push(MergeConflict {
                collection,
                key: k.to_string(),
            });
        } else {
            ours.insert(k, v);
            report.added += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::attributes::{AttributeObject, AttributeValue, AttributeValueType};
    use crate::types::signal::SignalDef;

    fn build_test_message(id: u64, name: &str, signal: &str) -> Message {
        let sig = Signal::create(
            8,
            SignalDef {
                name: signal.to_string(),
                bit_size: 8,
                ..Default::default()
            },
        )
        .unwrap();
        Message::create(
            id,
            name.to_string(),
            8,
            "ECU".to_string(),
            BTreeSet::new(),
            vec![sig],
            Vec::new(),
            String::new(),
        )
        .unwrap()
    }

    fn build_test_node(name: &str) -> Node {
        Node::create(name.to_string(), Vec::new(), String::new()).unwrap()
    }

    fn build_test_network(
        nodes: Vec<Node>,
        messages: Vec<Message>,
    ) -> Result<Network, NetworkError> {
        Network::create(
            "1.0".to_string(),
            BTreeSet::from(["CM_".to_string(), "BA_DEF_".to_string()]),
            BitTiming::create(500_000, 0, 0),
            nodes,
            Vec::new(),
            messages,
            Vec::new(),
            vec![AttributeDefinition::create(
                "BusType".to_string(),
                AttributeObject::Network,
                AttributeValueType::String,
            )],
            vec![Attribute::create(
                "BusType".to_string(),
                AttributeObject::Network,
                AttributeValue::Str("CAN".to_string()),
            )],
            Vec::new(),
            "Test network".to_string(),
        )
    }

    #[test]
    fn test_create_and_lookup() {
        let net = build_test_network(
            vec![build_test_node("Motor"), build_test_node("Gateway")],
            vec![
                build_test_message(0x100, "EngineData", "Rpm"),
                build_test_message(0x200, "BrakeData", "Pressure"),
            ],
        )
        .unwrap();
        assert_eq!(net.version(), "1.0");
        assert_eq!(net.bit_timing().baudrate(), 500_000);
        assert!(net.has_new_symbol("CM_"));
        assert!(net.get_node_by_name("Motor").is_some());
        assert!(net.get_node_by_name("Body").is_none());
        assert_eq!(net.get_message_by_id(0x200).map(Message::name), Some("BrakeData"));
        assert_eq!(net.get_message_by_name("EngineData").map(Message::id), Some(0x100));
        assert!(net.get_message_by_id(0x300).is_none());
        assert!(net.find_message(|m| m.name().starts_with("Brake")).is_some());
        assert!(net.get_attribute_definition_by_name("BusType").is_some());
        assert_eq!(
            net.get_attribute_default_by_name("BusType").map(|a| a.value().to_string()),
            Some("CAN".to_string())
        );

        let mut ids = Vec::new();
        net.for_each_message(|m| ids.push(m.id()));
        assert_eq!(ids, vec![0x100, 0x200]);
    }

    #[test]
    fn test_duplicate_keys_fail() {
        let err = build_test_network(vec![build_test_node("Motor"), build_test_node("Motor")], Vec::new())
            .unwrap_err();
        assert_eq!(
            err,
            NetworkError::DuplicateNode {
                name: "Motor".to_string()
            }
        );

        let err = build_test_network(
            Vec::new(),
            vec![
                build_test_message(5, "First", "A"),
                build_test_message(5, "Second", "B"),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            NetworkError::DuplicateMessage {
                id: 5,
                name: "First".to_string()
            }
        );
    }

    #[test]
    fn test_find_parent_message() {
        let net = build_test_network(
            Vec::new(),
            vec![
                build_test_message(1, "One", "Alpha"),
                build_test_message(2, "Two", "Beta"),
            ],
        )
        .unwrap();
        let beta = net
            .get_message_by_id(2)
            .and_then(|m| m.get_signal_by_name("Beta"))
            .unwrap();
        assert_eq!(net.find_parent_message(beta).map(Message::id), Some(2));

        let copy = beta.clone();
        assert!(net.find_parent_message(&copy).is_none());
    }

    #[test]
    fn test_merge_keep_existing() {
        let mut a = build_test_network(
            vec![build_test_node("Motor")],
            vec![build_test_message(5, "FromA", "A")],
        )
        .unwrap();
        let b = build_test_network(
            vec![build_test_node("Gateway")],
            vec![
                build_test_message(5, "FromB", "B"),
                build_test_message(6, "Extra", "C"),
            ],
        )
        .unwrap();
        let report = a.merge(b);
        assert_eq!(a.get_message_by_id(5).map(Message::name), Some("FromA"));
        assert_eq!(a.get_message_by_id(6).map(Message::name), Some("Extra"));
        assert!(a.get_node_by_name("Gateway").is_some());
        assert_eq!(report.added, 2);
        assert!(!report.is_clean());
        assert!(report.conflicts.contains(&MergeConflict {
            collection: Collection::Message,
            key: "5".to_string()
        }));
        // the attribute definition and default exist on both sides
        assert_eq!(report.conflicts.len(), 3);
    }

    #[test]
    fn test_merge_reject_leaves_self_untouched() {
        let mut a = build_test_network(Vec::new(), vec![build_test_message(5, "FromA", "A")]).unwrap();
        let before = a.clone();
        let b = build_test_network(Vec::new(), vec![build_test_message(7, "FromB", "B")]).unwrap();
        let err = a.merge_with(b, MergePolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            NetworkError::MergeConflict {
                collection: Collection::AttributeDefinition,
                key: "BusType".to_string(),
                count: 2,
            }
        );
        assert_eq!(a, before);
    }

    #[test]
    fn test_combine() {
        let a = Network::default();
        let b = build_test_network(Vec::new(), vec![build_test_message(5, "Only", "S")]).unwrap();
        let (c, report) = Network::combine(a, b, MergePolicy::Reject).unwrap();
        assert!(report.is_clean());
        assert_eq!(c.get_message_by_id(5).map(Message::name), Some("Only"));
        assert!(c.has_new_symbol("BA_DEF_"));
        assert_eq!(c.version(), "");
    }

    #[test]
    fn test_collection_display() {
        assert_eq!(Collection::EnvironmentVariable.to_string(), "environment variable");
        let err = NetworkError::MergeConflict {
            collection: Collection::Message,
            key: "5".to_string(),
            count: 1,
        };
        assert_eq!(
            err.to_string(),
            "Merge rejected: 1 conflicting key(s), first is message '5'"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_duplicates() {
        let net = build_test_network(
            vec![build_test_node("ECU")],
            vec![build_test_message(100, "Engine", "Rpm")],
        )
        .unwrap();
        let json = serde_json::to_value(&net).unwrap();
        let back: Network = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back, net);

        let mut doubled = json.clone();
        let messages = doubled["messages"].as_array_mut().unwrap();
        let mut copy = messages[0].clone();
        copy["name"] = serde_json::json!("EngineCopy");
        messages.push(copy);
        let err = serde_json::from_value::<Network>(doubled).unwrap_err();
        assert!(
            err.to_string().contains("Message ID 0x64 already assigned to message 'Engine'"),
            "{err}"
        );

        let mut doubled = json;
        let nodes = doubled["nodes"].as_array_mut().unwrap();
        let first = nodes[0].clone();
        nodes.push(first);
        let err = serde_json::from_value::<Network>(doubled).unwrap_err();
        assert!(err.to_string().contains("Node 'ECU' already exists"), "{err}");
    }
}
