//! Explicit registry mapping `modelType` tags to element factories.
//!
//! Decoding resolves an element's kind through this table, assembled at
//! startup. Hosts that define additional element kinds register their own
//! factories on a registry of their own and call
//! [`ModelTypeRegistry::decode`] directly.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Deserialize;

use crate::element::{ElementCollection, OperationElement, PropertyElement, SubmodelElement};
use crate::error::ModelError;

/// Builds one element kind from its raw wire value. Receives the registry
/// so container kinds can decode nested elements through the same table.
pub type ElementFactory =
    fn(&ModelTypeRegistry, &serde_json::Value) -> Result<SubmodelElement, ModelError>;

pub struct ModelTypeRegistry {
    factories: HashMap<String, ElementFactory>,
}

impl ModelTypeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// A registry with the built-in kinds registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("Property", decode_property);
        registry.register("Operation", decode_operation);
        registry.register("SubmodelElementCollection", decode_collection);
        registry
    }

    /// Map `model_type` to `factory`, replacing any previous mapping.
    pub fn register(&mut self, model_type: impl Into<String>, factory: ElementFactory) {
        self.factories.insert(model_type.into(), factory);
    }

    /// Decode a raw element by resolving its `modelType` tag.
    pub fn decode(&self, raw: &serde_json::Value) -> Result<SubmodelElement, ModelError> {
        let tag = raw
            .get("modelType")
            .and_then(|v| v.as_str())
            .ok_or(ModelError::MissingModelType)?;
        let factory = self
            .factories
            .get(tag)
            .ok_or_else(|| ModelError::UnknownModelType {
                model_type: tag.to_string(),
            })?;
        factory(self, raw)
    }
}

impl Default for ModelTypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

lazy_static! {
    static ref BUILTIN: ModelTypeRegistry = ModelTypeRegistry::with_builtins();
}

/// The registry of built-in kinds, resolved once at startup.
pub fn builtin() -> &'static ModelTypeRegistry {
    &BUILTIN
}

fn decode_property(
    _registry: &ModelTypeRegistry,
    raw: &serde_json::Value,
) -> Result<SubmodelElement, ModelError> {
    let element: PropertyElement = serde_json::from_value(raw.clone())?;
    Ok(SubmodelElement::Property(element))
}

fn decode_operation(
    _registry: &ModelTypeRegistry,
    raw: &serde_json::Value,
) -> Result<SubmodelElement, ModelError> {
    let element: OperationElement = serde_json::from_value(raw.clone())?;
    Ok(SubmodelElement::Operation(element))
}

fn decode_collection(
    registry: &ModelTypeRegistry,
    raw: &serde_json::Value,
) -> Result<SubmodelElement, ModelError> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct RawCollection {
        id_short: String,
        #[serde(default)]
        value: Vec<serde_json::Value>,
    }

    let collection: RawCollection = serde_json::from_value(raw.clone())?;
    let mut value = Vec::with_capacity(collection.value.len());
    for entry in &collection.value {
        value.push(registry.decode(entry)?);
    }
    Ok(SubmodelElement::Collection(ElementCollection {
        id_short: collection.id_short,
        value,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtin_kinds_resolve() {
        let raw = json!({"modelType": "Property", "idShort": "P", "value": 1});
        let element = builtin().decode(&raw).unwrap();
        assert!(matches!(element, SubmodelElement::Property(_)));
    }

    #[test]
    fn missing_tag_is_an_error() {
        let raw = json!({"idShort": "P"});
        assert!(matches!(
            builtin().decode(&raw),
            Err(ModelError::MissingModelType)
        ));
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let raw = json!({"modelType": "Blob", "idShort": "B"});
        let err = builtin().decode(&raw).unwrap_err();
        assert!(matches!(err, ModelError::UnknownModelType { .. }));
        assert!(err.to_string().contains("Blob"));
    }

    #[test]
    fn custom_factory_extends_the_table() {
        fn decode_range(
            _registry: &ModelTypeRegistry,
            raw: &serde_json::Value,
        ) -> Result<SubmodelElement, ModelError> {
            // A host-defined kind re-expressed as a built-in envelope.
            let element: PropertyElement = serde_json::from_value(raw.clone())?;
            Ok(SubmodelElement::Property(element))
        }

        let mut registry = ModelTypeRegistry::with_builtins();
        registry.register("Range", decode_range);

        let raw = json!({"modelType": "Range", "idShort": "R", "value": [0, 10]});
        let element = registry.decode(&raw).unwrap();
        assert_eq!(element.id_short(), "R");
    }

    #[test]
    fn nested_collections_use_the_same_registry() {
        let raw = json!({
            "modelType": "SubmodelElementCollection",
            "idShort": "Outer",
            "value": [
                {
                    "modelType": "SubmodelElementCollection",
                    "idShort": "Inner",
                    "value": [{"modelType": "Property", "idShort": "Leaf"}]
                }
            ]
        });

        let element = builtin().decode(&raw).unwrap();
        let SubmodelElement::Collection(outer) = element else {
            panic!("expected collection");
        };
        let SubmodelElement::Collection(inner) = &outer.value[0] else {
            panic!("expected nested collection");
        };
        assert_eq!(inner.value[0].id_short(), "Leaf");
    }

    #[test]
    fn nested_decode_failure_propagates() {
        let raw = json!({
            "modelType": "SubmodelElementCollection",
            "idShort": "Outer",
            "value": [{"modelType": "Mystery", "idShort": "X"}]
        });
        assert!(matches!(
            builtin().decode(&raw),
            Err(ModelError::UnknownModelType { .. })
        ));
    }
}
