//! Per-parse settings of the EA deserializer.

use indexmap::IndexMap;

use super::constants::{DEFAULT_IGNORED_TYPES, DEFAULT_TYPE_MAPPING, UML_2_1, XMI_2_1};

/// Settings for one [`EaXmlDeserializer`](super::EaXmlDeserializer).
#[derive(Debug, Clone)]
pub struct EaConfig {
    /// Fail when a relationship end references an id absent from the model.
    pub strict_resolution: bool,
    /// Namespace URI bound to the `uml:` prefix.
    pub uml_namespace: String,
    /// Namespace URI bound to the `xmi:` prefix.
    pub xmi_namespace: String,
    /// `xmi:type` values of packaged elements to skip.
    pub ignored_types: Vec<String>,
    /// Type reference (href or type attribute) → type name.
    pub type_mapping: IndexMap<String, String>,
}

impl Default for EaConfig {
    fn default() -> Self {
        Self {
            strict_resolution: false,
            uml_namespace: UML_2_1.to_string(),
            xmi_namespace: XMI_2_1.to_string(),
            ignored_types: DEFAULT_IGNORED_TYPES.iter().map(|t| t.to_string()).collect(),
            type_mapping: DEFAULT_TYPE_MAPPING
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl EaConfig {
    pub fn with_strict_resolution(mut self, strict: bool) -> Self {
        self.strict_resolution = strict;
        self
    }

    pub fn with_namespaces(mut self, uml: impl Into<String>, xmi: impl Into<String>) -> Self {
        self.uml_namespace = uml.into();
        self.xmi_namespace = xmi.into();
        self
    }

    pub fn with_ignored_type(mut self, xmi_type: impl Into<String>) -> Self {
        self.ignored_types.push(xmi_type.into());
        self
    }

    /// Add or replace one type mapping entry.
    pub fn with_type_mapping(mut self, reference: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.type_mapping.insert(reference.into(), type_name.into());
        self
    }

    pub fn is_ignored(&self, xmi_type: &str) -> bool {
        self.ignored_types.iter().any(|t| t == xmi_type)
    }

    /// Map a type reference to a type name; unknown references map to "".
    pub fn map_type(&self, reference: Option<&str>) -> String {
        reference
            .and_then(|r| self.type_mapping.get(r))
            .cloned()
            .unwrap_or_default()
    }
}
