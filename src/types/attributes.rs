use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::errors::NetworkError;

/// Declares which entity kind an attribute targets (`BA_DEF_ <object>`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttributeObject {
    #[default]
    Network,
    Node,
    Message,
    Signal,
    EnvironmentVariable,
}

impl fmt::Display for AttributeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttributeObject::Network => "Network",
            AttributeObject::Node => "Node",
            AttributeObject::Message => "Message",
            AttributeObject::Signal => "Signal",
            AttributeObject::EnvironmentVariable => "EnvironmentVariable",
        })
    }
}

/// Value domain declared by an attribute definition.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttributeValueType {
    /// Integer with inclusive bounds.
    Int { min: i64, max: i64 },
    /// Integer with inclusive bounds, displayed as hexadecimal.
    Hex { min: u64, max: u64 },
    /// Float with inclusive bounds.
    Float { min: f64, max: f64 },
    /// Free-form string.
    #[default]
    String,
    /// One of the listed labels.
    Enum(Vec<String>),
}

impl fmt::Display for AttributeValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValueType::Int { min, max } => write!(f, "INT {} {}", min, max),
            AttributeValueType::Hex { min, max } => write!(f, "HEX 0x{:X} 0x{:X}", min, max),
            AttributeValueType::Float { min, max } => {
                write!(f, "FLOAT {} {}", compact_float(*min), compact_float(*max))
            }
            AttributeValueType::String => f.write_str("STRING"),
            AttributeValueType::Enum(values) => write!(f, "ENUM {}", values.join(",")),
        }
    }
}

/// Concrete attribute value stored on Network/Node/Message/Signal/EnvironmentVariable entities.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttributeValue {
    Str(String),
    Int(i64),
    Hex(u64), // memorize as a number, proper display later.
    Float(f64),
    Enum(String),
}

impl Default for AttributeValue {
    fn default() -> Self {
        AttributeValue::Str(String::new())
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Str(s) => write!(f, "{}", s),
            AttributeValue::Int(i) => write!(f, "{}", i),
            AttributeValue::Hex(h) => write!(f, "0x{:X}", h),
            AttributeValue::Float(x) => f.write_str(&compact_float(*x)),
            AttributeValue::Enum(s) => write!(f, "{}", s),
        }
    }
}

impl AttributeValue {
    /// Numeric view of the value; `None` for string and enum values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Int(i) => Some(*i as f64),
            AttributeValue::Hex(h) => Some(*h as f64),
            AttributeValue::Float(x) => Some(*x),
            AttributeValue::Str(_) | AttributeValue::Enum(_) => None,
        }
    }

    /// Text view of the value; `None` for numeric values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Str(s) | AttributeValue::Enum(s) => Some(s),
            _ => None,
        }
    }
}

// compact print, no superfluous trailing zeros
fn compact_float(x: f64) -> String {
    let mut s = format!("{}", x);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

/// Attribute definition (`BA_DEF_`): a name, its target object kind and its value domain.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttributeDefinition {
    name: String,
    object_type: AttributeObject,
    value_type: AttributeValueType,
}

impl AttributeDefinition {
    pub fn create(name: String, object_type: AttributeObject, value_type: AttributeValueType) -> Self {
        AttributeDefinition {
            name,
            object_type,
            value_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object_type(&self) -> AttributeObject {
        self.object_type
    }

    pub fn value_type(&self) -> &AttributeValueType {
        &self.value_type
    }
}

/// A single attribute value (`BA_` / `BA_DEF_DEF_`) attached to one entity.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attribute {
    name: String,
    object_type: AttributeObject,
    value: AttributeValue,
}

impl Attribute {
    pub fn create(name: String, object_type: AttributeObject, value: AttributeValue) -> Self {
        Attribute {
            name,
            object_type,
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object_type(&self) -> AttributeObject {
        self.object_type
    }

    pub fn value(&self) -> &AttributeValue {
        &self.value
    }
}

/// Indexes attributes by name, rejecting a second value for the same name on one owner.
pub(crate) fn attribute_map(
    owner: &str,
    attributes: impl IntoIterator<Item = Attribute>,
) -> Result<BTreeMap<String, Attribute>, NetworkError> {
    let mut map: BTreeMap<String, Attribute> = BTreeMap::new();
    for attr in attributes {
        if map.contains_key(attr.name()) {
            return Err(NetworkError::DuplicateAttribute {
                owner: owner.to_string(),
                name: attr.name,
            });
        }
        map.insert(attr.name.clone(), attr);
    }
    Ok(map)
}
