use log::trace;

use crate::config::NormalizerConfig;
use crate::types::Branch;

use super::{rewrite_fields, Normalizer};

/// Separates the words of schema names with spaces instead of underscores.
#[derive(Debug, Clone)]
pub struct SchemaNameNormalizer {
    fields: Vec<String>,
}

impl SchemaNameNormalizer {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn from_config(config: &NormalizerConfig) -> Self {
        Self::new(config.schema_fields.clone())
    }
}

impl Normalizer for SchemaNameNormalizer {
    fn name(&self) -> &str {
        "schema"
    }

    fn apply(&self, title: &str, root: &mut Branch) -> usize {
        // Markup values are read back trimmed, so trim here too.
        let mut rewrite = |value: &str| value.contains('_').then(|| value.replace('_', " ").trim().to_string());
        let changed: usize = self.fields.iter().map(|field| rewrite_fields(root, field, &mut rewrite)).sum();
        trace!("Fixed {} schema names on '{}'", changed, title);
        changed
    }
}
