//! Typed element values.
//!
//! An [`ElementValue`] is the boxed-value-plus-type-tag view of a leaf
//! value, used at the transport boundary. The tag is inferred from the
//! JSON shape when a value arrives untyped off the wire.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Declared type of an element value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    None,
    Boolean,
    Int,
    Double,
    String,
    Array,
    Object,
}

impl DataType {
    /// Infer the type tag from a JSON value's shape.
    pub fn of(value: &serde_json::Value) -> DataType {
        match value {
            serde_json::Value::Null => DataType::None,
            serde_json::Value::Bool(_) => DataType::Boolean,
            serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => DataType::Int,
            serde_json::Value::Number(_) => DataType::Double,
            serde_json::Value::String(_) => DataType::String,
            serde_json::Value::Array(_) => DataType::Array,
            serde_json::Value::Object(_) => DataType::Object,
        }
    }
}

/// A value together with its declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementValue {
    pub value: serde_json::Value,
    pub value_type: DataType,
}

impl ElementValue {
    pub fn new(value: serde_json::Value, value_type: DataType) -> Self {
        Self { value, value_type }
    }

    /// Wrap a raw wire value, inferring its type tag.
    pub fn from_json(value: serde_json::Value) -> Self {
        let value_type = DataType::of(&value);
        Self { value, value_type }
    }

    /// Build from a Rust value via serde.
    pub fn from_typed<T: Serialize>(value: &T) -> Result<Self, ValueError> {
        Ok(Self::from_json(serde_json::to_value(value)?))
    }

    /// Convert into a Rust value via serde.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, ValueError> {
        Ok(serde_json::from_value(self.value.clone())?)
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }
}
