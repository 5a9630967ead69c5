use serde::{Deserialize, Serialize};

use crate::errors::DocumentError;

/// Field and template names the normalizers act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Page-title prefix of pages that carry aliases, e.g. `Metaphor:`.
    pub alias_title_prefix: String,
    /// Field of the root template that groups the alias calls.
    pub alias_group: String,
    pub alias_template: String,
    pub alias_field: String,
    pub role_field: String,
    pub schema_fields: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            alias_title_prefix: "Metaphor:".to_string(),
            alias_group: "Aliases".to_string(),
            alias_template: "Metaphor.Alias".to_string(),
            alias_field: "Metaphor.Alias.Name".to_string(),
            role_field: "Role.Name".to_string(),
            schema_fields: vec![
                "Source schema".to_string(),
                "Target schema".to_string(),
                "Related schema.Name".to_string(),
            ],
        }
    }
}

impl NormalizerConfig {
    /// Loads a config from JSON; absent keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }
}
