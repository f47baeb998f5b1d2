//! Registration descriptors: identity plus addressing for each level of
//! the hierarchy, independent of resource payloads.

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;

/// Descriptor of one submodel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmodelDescriptor {
    pub id_short: String,
    #[serde(default)]
    pub identification: String,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

impl SubmodelDescriptor {
    pub fn new(id_short: impl Into<String>, identification: impl Into<String>) -> Self {
        Self {
            id_short: id_short.into(),
            identification: identification.into(),
            endpoints: Vec::new(),
        }
    }
}

/// Descriptor of one shell and its submodels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellDescriptor {
    pub id_short: String,
    #[serde(default)]
    pub identification: String,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    #[serde(default)]
    pub submodels: Vec<SubmodelDescriptor>,
}

impl ShellDescriptor {
    pub fn new(id_short: impl Into<String>, identification: impl Into<String>) -> Self {
        Self {
            id_short: id_short.into(),
            identification: identification.into(),
            endpoints: Vec::new(),
            submodels: Vec::new(),
        }
    }

    pub fn with_submodel(mut self, submodel: SubmodelDescriptor) -> Self {
        self.submodels.push(submodel);
        self
    }

    pub fn submodel(&self, id_short: &str) -> Option<&SubmodelDescriptor> {
        self.submodels.iter().find(|s| s.id_short == id_short)
    }
}

/// Descriptor of a shell repository (the registry root).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryDescriptor {
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    #[serde(default)]
    pub shells: Vec<ShellDescriptor>,
}

impl RegistryDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shell(mut self, shell: ShellDescriptor) -> Self {
        self.shells.push(shell);
        self
    }

    pub fn shell(&self, id_short: &str) -> Option<&ShellDescriptor> {
        self.shells.iter().find(|s| s.id_short == id_short)
    }
}

/// Descriptor of a standalone submodel repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmodelRepositoryDescriptor {
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    #[serde(default)]
    pub submodels: Vec<SubmodelDescriptor>,
}

impl SubmodelRepositoryDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_submodel(mut self, submodel: SubmodelDescriptor) -> Self {
        self.submodels.push(submodel);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_lookup_by_id_short() {
        let registry = RegistryDescriptor::new().with_shell(
            ShellDescriptor::new("S1", "urn_example_s1")
                .with_submodel(SubmodelDescriptor::new("M1", "urn_example_m1")),
        );

        let shell = registry.shell("S1").unwrap();
        assert_eq!(shell.identification, "urn_example_s1");
        assert!(shell.submodel("M1").is_some());
        assert!(shell.submodel("M2").is_none());
        assert!(registry.shell("S2").is_none());
    }

    #[test]
    fn wire_format_round_trips() {
        let mut descriptor = ShellDescriptor::new("S1", "urn_example_s1");
        descriptor.endpoints.push(Endpoint::new(
            "http",
            "http://host:80/shells/S1/aas",
        ));

        let encoded = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(encoded["idShort"], "S1");
        assert_eq!(encoded["endpoints"][0]["scheme"], "http");

        let decoded: ShellDescriptor = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, descriptor);
    }

    #[test]
    fn defaults_tolerate_sparse_documents() {
        let decoded: ShellDescriptor =
            serde_json::from_value(serde_json::json!({"idShort": "S1"})).unwrap();
        assert!(decoded.endpoints.is_empty());
        assert!(decoded.submodels.is_empty());
        assert!(decoded.identification.is_empty());
    }
}
