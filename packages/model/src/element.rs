//! Wire shapes for submodel elements and their containers.
//!
//! These are minimal envelope types: enough structure for transport and
//! addressing. Elements are tagged by `modelType`; decoding resolves the
//! tag through the [model-type registry](crate::model_type) instead of
//! any runtime reflection.

use serde::{Deserialize, Serialize};

use crate::value::DataType;

/// A named, typed argument of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationVariable {
    pub id_short: String,
    #[serde(default)]
    pub value_type: DataType,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl OperationVariable {
    pub fn new(id_short: impl Into<String>, value: serde_json::Value) -> Self {
        let value_type = DataType::of(&value);
        Self {
            id_short: id_short.into(),
            value_type,
            value,
        }
    }
}

/// Envelope of a data property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyElement {
    pub id_short: String,
    #[serde(default)]
    pub value_type: DataType,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Envelope of an invokable operation: its argument declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationElement {
    pub id_short: String,
    #[serde(default)]
    pub input_variables: Vec<OperationVariable>,
    #[serde(default)]
    pub output_variables: Vec<OperationVariable>,
}

/// Envelope of a nested element collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementCollection {
    pub id_short: String,
    #[serde(default)]
    pub value: Vec<SubmodelElement>,
}

/// A submodel element, tagged on the wire by `modelType`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "modelType")]
pub enum SubmodelElement {
    Property(PropertyElement),
    Operation(OperationElement),
    #[serde(rename = "SubmodelElementCollection")]
    Collection(ElementCollection),
}

impl SubmodelElement {
    pub fn id_short(&self) -> &str {
        match self {
            SubmodelElement::Property(p) => &p.id_short,
            SubmodelElement::Operation(o) => &o.id_short,
            SubmodelElement::Collection(c) => &c.id_short,
        }
    }
}

impl<'de> Deserialize<'de> for SubmodelElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        crate::model_type::builtin()
            .decode(&raw)
            .map_err(serde::de::Error::custom)
    }
}

/// A submodel: a named set of elements under a shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submodel {
    pub id_short: String,
    #[serde(default)]
    pub identification: String,
    #[serde(default)]
    pub submodel_elements: Vec<SubmodelElement>,
}

/// An asset administration shell: the root resource of one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shell {
    pub id_short: String,
    #[serde(default)]
    pub identification: String,
    #[serde(default)]
    pub submodels: Vec<Submodel>,
}
