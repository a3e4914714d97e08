use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::signal::{ByteOrder, ValueType};

/// Typed descriptor attached to a value table (DBC `SGTYPE_`).
#[derive(Default, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignalType {
    pub name: String,
    pub signal_size: u64,
    pub byte_order: ByteOrder,
    pub value_type: ValueType,
    pub factor: f64,
    pub offset: f64,
    pub minimum: f64,
    pub maximum: f64,
    pub unit: String,
    pub default_value: f64,
    /// Name of the value table the type refers to.
    pub value_table: String,
}

/// Named legend from raw integer value to description (DBC `VAL_TABLE_`).
#[derive(Default, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValueTable {
    name: String,
    signal_type: Option<SignalType>,
    value_descriptions: BTreeMap<i64, String>,
}

impl ValueTable {
    pub fn create(
        name: String,
        signal_type: Option<SignalType>,
        value_descriptions: BTreeMap<i64, String>,
    ) -> Self {
        ValueTable {
            name,
            signal_type,
            value_descriptions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signal_type(&self) -> Option<&SignalType> {
        self.signal_type.as_ref()
    }

    /// Description for `value`, if the table lists one.
    pub fn get_value_description_by_value(&self, value: i64) -> Option<&str> {
        self.value_descriptions.get(&value).map(String::as_str)
    }

    pub fn has_value_description(&self, value: i64) -> bool {
        self.value_descriptions.contains_key(&value)
    }

    /// Visits the entries in ascending value order.
    pub fn for_each_value_description<F>(&self, mut f: F)
    where
        F: FnMut(i64, &str),
    {
        for (value, desc) in &self.value_descriptions {
            f(*value, desc);
        }
    }

    pub fn value_descriptions(&self) -> &BTreeMap<i64, String> {
        &self.value_descriptions
    }
}
