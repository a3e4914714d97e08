use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{
    attributes::{Attribute, attribute_map},
    errors::NetworkError,
};

/// Declared kind of an environment variable (DBC `EV_ <name> : <type>`).
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VarType {
    #[default]
    Integer,
    Float,
    String,
    /// Raw byte buffer of `data_size` bytes (DBC `ENVVAR_DATA_`).
    Data,
}

/// Access rights of the listed access nodes (`DUMMY_NODE_VECTOR0..3`).
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AccessType {
    #[default]
    Unrestricted,
    Read,
    Write,
    ReadWrite,
}

/// Named variable living outside any message, used by simulation and test tooling.
#[derive(Default, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnvironmentVariable {
    name: String,
    var_type: VarType,
    minimum: f64,
    maximum: f64,
    unit: String,
    initial_value: f64,
    ev_id: u64,
    access_type: AccessType,
    access_nodes: BTreeSet<String>,
    value_descriptions: BTreeMap<i64, String>,
    data_size: u64,
    attribute_values: BTreeMap<String, Attribute>,
    comment: String,
}

impl EnvironmentVariable {
    /// Builds an environment variable, failing if two attribute values share a name.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        name: String,
        var_type: VarType,
        minimum: f64,
        maximum: f64,
        unit: String,
        initial_value: f64,
        ev_id: u64,
        access_type: AccessType,
        access_nodes: BTreeSet<String>,
        value_descriptions: BTreeMap<i64, String>,
        data_size: u64,
        attribute_values: Vec<Attribute>,
        comment: String,
    ) -> Result<Self, NetworkError> {
        let attribute_values = attribute_map(
            &format!("environment variable '{}'", name),
            attribute_values,
        )?;
        Ok(EnvironmentVariable {
            name,
            var_type,
            minimum,
            maximum,
            unit,
            initial_value,
            ev_id,
            access_type,
            access_nodes,
            value_descriptions,
            data_size,
            attribute_values,
            comment,
        })
    }

    // --- General information ---
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn var_type(&self) -> VarType {
        self.var_type
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
    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }
    pub fn ev_id(&self) -> u64 {
        self.ev_id
    }
    pub fn access_type(&self) -> AccessType {
        self.access_type
    }
    /// Size in bytes of a [`VarType::Data`] variable, `0` otherwise.
    pub fn data_size(&self) -> u64 {
        self.data_size
    }
    pub fn comment(&self) -> &str {
        &self.comment
    }

    // --- Access nodes ---
    pub fn has_access_node(&self, name: &str) -> bool {
        self.access_nodes.contains(name)
    }

    pub fn for_each_access_node<F>(&self, mut f: F)
    where
        F: FnMut(&str),
    {
        self.access_nodes.iter().for_each(|n| f(n));
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
}
