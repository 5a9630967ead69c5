use std::sync::{Arc, RwLock};

use log::{debug, error};

use crate::{
    config::NormalizerConfig,
    core::normalizers::{AliasNormalizer, Normalizer, RoleNameNormalizer, SchemaNameNormalizer},
    errors::DocumentError,
};

/// Named normalizers, kept in registration order.
pub struct NormalizerRegistry {
    normalizers: RwLock<Vec<Arc<dyn Normalizer>>>,
}

impl NormalizerRegistry {
    /// Registry holding the standard normalizers built from `config`.
    pub fn new(config: &NormalizerConfig) -> Self {
        Self { normalizers: RwLock::new(load_normalizers(config)) }
    }

    /// Registry with nothing registered.
    pub fn empty() -> Self {
        Self { normalizers: RwLock::new(Vec::new()) }
    }

    /// Registers a normalizer, replacing any other with the same name.
    pub fn register(&self, normalizer: Arc<dyn Normalizer>) -> Result<(), DocumentError> {
        let mut normalizers = self.normalizers.write().map_err(|_| {
            error!("Failed to acquire write lock on normalizers");
            DocumentError::Internal("Normalizer lock poisoned".to_string())
        })?;

        debug!("Registering normalizer: {}", normalizer.name());
        match normalizers.iter_mut().find(|existing| existing.name() == normalizer.name()) {
            Some(slot) => *slot = normalizer,
            None => normalizers.push(normalizer),
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Normalizer>, DocumentError> {
        self.all()?
            .into_iter()
            .find(|normalizer| normalizer.name() == name)
            .ok_or_else(|| DocumentError::UnknownNormalizer(name.to_string()))
    }

    /// Snapshot of every registered normalizer, in registration order.
    pub fn all(&self) -> Result<Vec<Arc<dyn Normalizer>>, DocumentError> {
        let normalizers = self.normalizers.read().map_err(|_| {
            error!("Failed to acquire read lock on normalizers");
            DocumentError::Internal("Normalizer lock poisoned".to_string())
        })?;
        Ok(normalizers.clone())
    }

    pub fn names(&self) -> Result<Vec<String>, DocumentError> {
        Ok(self.all()?.iter().map(|normalizer| normalizer.name().to_string()).collect())
    }
}

impl Default for NormalizerRegistry {
    fn default() -> Self {
        Self::new(&NormalizerConfig::default())
    }
}

fn load_normalizers(config: &NormalizerConfig) -> Vec<Arc<dyn Normalizer>> {
    vec![
        Arc::new(AliasNormalizer::from_config(config)) as Arc<dyn Normalizer>,
        Arc::new(RoleNameNormalizer::from_config(config)) as Arc<dyn Normalizer>,
        Arc::new(SchemaNameNormalizer::from_config(config)) as Arc<dyn Normalizer>,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_normalizers() {
        let registry = NormalizerRegistry::default();
        assert_eq!(registry.names().unwrap(), vec!["alias", "roles", "schema"]);
        assert_eq!(registry.get("roles").unwrap().name(), "roles");
        assert!(matches!(registry.get("spelling"), Err(DocumentError::UnknownNormalizer(name)) if name == "spelling"));
    }

    #[test]
    fn test_register_replaces_by_name() {
        let registry = NormalizerRegistry::empty();
        registry.register(Arc::new(RoleNameNormalizer::new("Role.Name"))).unwrap();
        registry.register(Arc::new(RoleNameNormalizer::new("Rol.Nombre"))).unwrap();
        assert_eq!(registry.names().unwrap(), vec!["roles"]);
    }
}
