//! Name-keyed provider registry

use super::{ElastiCacheProvider, Provider};
use crate::error::RegistryError;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Maps resource type names to providers.
///
/// Safe to share across tasks; lookups take a read lock and registration a
/// write lock. Registering a type twice replaces the earlier provider.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: RwLock<HashMap<String, Arc<dyn Provider>>>,
}

impl ProviderRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in provider
    pub fn with_default_providers() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(ElastiCacheProvider::new()));
        registry
    }

    pub fn register(&self, provider: Arc<dyn Provider>) {
        let resource_type = provider.resource_type().to_string();
        debug!(resource_type = %resource_type, "Registering provider");
        self.providers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(resource_type, provider);
    }

    pub fn get(&self, resource_type: &str) -> Result<Arc<dyn Provider>, RegistryError> {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(resource_type)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(resource_type.to_string()))
    }

    /// Registered type names, sorted
    pub fn resource_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self
            .providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        types.sort();
        types
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("resource_types", &self.resource_types())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, DiscoveryError};
    use crate::resources::ProviderConfig;
    use async_trait::async_trait;
    use ddconf_common::Resource;
    use ddconf_common::defaults::ELASTICACHE_REDIS_PROVIDER;

    struct StaticProvider {
        name: &'static str,
        port: u16,
    }

    #[async_trait]
    impl Provider for StaticProvider {
        fn resource_type(&self) -> &str {
            self.name
        }

        fn validate_config(&self, _config: &ProviderConfig) -> Result<(), ConfigError> {
            Ok(())
        }

        async fn discover(
            &self,
            _config: &ProviderConfig,
        ) -> Result<Vec<Resource>, DiscoveryError> {
            Ok(vec![Resource::new("localhost", self.port)])
        }
    }

    #[test]
    fn test_default_providers() {
        let registry = ProviderRegistry::with_default_providers();
        assert_eq!(registry.resource_types(), vec![ELASTICACHE_REDIS_PROVIDER]);
        let provider = registry.get(ELASTICACHE_REDIS_PROVIDER).unwrap();
        assert_eq!(provider.resource_type(), ELASTICACHE_REDIS_PROVIDER);
    }

    #[test]
    fn test_unknown_type() {
        let registry = ProviderRegistry::new();
        let err = registry.get("memcached").err().unwrap();
        assert_eq!(err.to_string(), "provider not found for resource type: memcached");
    }

    #[tokio::test]
    async fn test_register_replaces_existing() {
        let registry = ProviderRegistry::new();
        registry.register(Arc::new(StaticProvider {
            name: "static",
            port: 1,
        }));
        registry.register(Arc::new(StaticProvider {
            name: "static",
            port: 2,
        }));

        assert_eq!(registry.resource_types().len(), 1);
        let provider = registry.get("static").unwrap();
        let found = provider.discover(&ProviderConfig::default()).await.unwrap();
        assert_eq!(found[0].port, 2);
    }

    #[tokio::test]
    async fn test_concurrent_lookups() {
        let registry = Arc::new(ProviderRegistry::with_default_providers());
        let mut handles = Vec::new();
        for i in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                if i % 2 == 0 {
                    registry.register(Arc::new(StaticProvider {
                        name: "static",
                        port: i,
                    }));
                }
                registry.get(ELASTICACHE_REDIS_PROVIDER).is_ok()
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }
        assert_eq!(registry.resource_types().len(), 2);
    }
}
