//! Variant values for by-name element properties
//!
//! Runtime elements expose loosely-typed properties ("max-size-bytes",
//! "buffered-bytes", nested "stats" structures). `PropertyValue` is the
//! variant carrier for those values; `Structure` is a named field bag used
//! for nested values such as per-queue statistics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A loosely-typed element property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Unsigned 32-bit integer (byte counters, levels)
    UInt(u32),

    /// Unsigned 64-bit integer (large byte counters)
    UInt64(u64),

    /// Boolean flag
    Bool(bool),

    /// String value
    String(String),

    /// Nested named structure
    Structure(Structure),

    /// Array of values (e.g. one structure per queue)
    Array(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Get as `u32`, if this is a 32-bit unsigned value
    pub fn as_uint(&self) -> Option<u32> {
        match self {
            Self::UInt(value) => Some(*value),
            _ => None,
        }
    }

    /// Get as `u64`, widening a 32-bit value if necessary
    pub fn as_uint64(&self) -> Option<u64> {
        match self {
            Self::UInt(value) => Some(u64::from(*value)),
            Self::UInt64(value) => Some(*value),
            _ => None,
        }
    }

    /// Get as `bool`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Get as nested structure
    pub fn as_structure(&self) -> Option<&Structure> {
        match self {
            Self::Structure(value) => Some(value),
            _ => None,
        }
    }

    /// Get as array of values
    pub fn as_array(&self) -> Option<&[PropertyValue]> {
        match self {
            Self::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Human-readable kind name, for error reporting
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UInt(_) => "uint",
            Self::UInt64(_) => "uint64",
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
            Self::Structure(_) => "structure",
            Self::Array(_) => "array",
        }
    }
}

impl From<u32> for PropertyValue {
    fn from(value: u32) -> Self {
        Self::UInt(value)
    }
}

impl From<u64> for PropertyValue {
    fn from(value: u64) -> Self {
        Self::UInt64(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Structure> for PropertyValue {
    fn from(value: Structure) -> Self {
        Self::Structure(value)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(values: Vec<PropertyValue>) -> Self {
        Self::Array(values)
    }
}

/// A named bag of property values
///
/// The shape of the multi-queue `stats` property: a structure whose
/// `queues` field holds an array of per-queue structures, each carrying a
/// `bytes` counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    name: String,
    fields: BTreeMap<String, PropertyValue>,
}

impl Structure {
    /// Create an empty structure with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: BTreeMap::new(),
        }
    }

    /// Structure name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a field, replacing any previous value
    pub fn set(&mut self, field: &str, value: impl Into<PropertyValue>) {
        self.fields.insert(field.to_string(), value.into());
    }

    /// Builder-style field setter
    pub fn with_field(mut self, field: &str, value: impl Into<PropertyValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Get a field value
    pub fn get(&self, field: &str) -> Option<&PropertyValue> {
        self.fields.get(field)
    }

    /// Get a field as `u32`
    ///
    /// Returns `None` when the field is absent or holds a different kind,
    /// matching the "absent counts as zero contribution" convention of the
    /// callers.
    pub fn uint(&self, field: &str) -> Option<u32> {
        self.get(field).and_then(PropertyValue::as_uint)
    }

    /// Whether a field is present
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }
}
