use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{
    attributes::{Attribute, attribute_map},
    errors::NetworkError,
};

/// Represents a node (ECU) in a CAN network.
///
/// A `Node` identifies a physical or logical unit that transmits or receives messages.
/// Messages and signals refer to nodes by name only.
///
/// # Example
/// ```
/// use can_network::Node;
///
/// let node = Node::create("Motor".to_string(), Vec::new(), "Engine ECU".to_string()).unwrap();
/// assert_eq!(node.name(), "Motor");
/// ```
#[derive(Default, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    name: String,
    comment: String,
    attribute_values: BTreeMap<String, Attribute>,
}

impl Node {
    /// Builds a node, failing if two attribute values share a name.
    pub fn create(
        name: String,
        attribute_values: Vec<Attribute>,
        comment: String,
    ) -> Result<Self, NetworkError> {
        let attribute_values = attribute_map(&format!("node '{}'", name), attribute_values)?;
        Ok(Node {
            name,
            comment,
            attribute_values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::attributes::{AttributeObject, AttributeValue};

    fn build_test_node() -> Node {
        Node::create(
            "Motor_ECU".to_string(),
            vec![Attribute::create(
                "NodeLayerModules".to_string(),
                AttributeObject::Node,
                AttributeValue::Str("CANoeILNLVector.dll".to_string()),
            )],
            "Comment about the Motor ECU.".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_accessors() {
        let node = build_test_node();
        assert_eq!(node.name(), "Motor_ECU");
        assert_eq!(node.comment(), "Comment about the Motor ECU.");
        assert!(node.get_attribute_value_by_name("NodeLayerModules").is_some());
        assert!(node.get_attribute_value_by_name("Missing").is_none());
        assert!(
            node.find_attribute_value(|a| a.value().as_str() == Some("CANoeILNLVector.dll"))
                .is_some()
        );
        let mut count = 0;
        node.for_each_attribute_value(|_| count += 1);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_duplicate_attribute() {
        let attr = Attribute::create(
            "ILUsed".to_string(),
            AttributeObject::Node,
            AttributeValue::Enum("Yes".to_string()),
        );
        let err = Node::create("Gateway".to_string(), vec![attr.clone(), attr], String::new());
        assert!(matches!(err, Err(NetworkError::DuplicateAttribute { .. })));
    }
}
