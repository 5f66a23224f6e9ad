//! Resource providers
//!
//! A provider discovers concrete endpoints for one resource type. Providers
//! are looked up by type name through the [`ProviderRegistry`].
//!
//! ## Modules
//!
//! - [`elasticache`]: ElastiCache for Redis replication groups
//! - [`registry`]: name-keyed provider lookup

pub mod elasticache;
pub mod registry;

pub use elasticache::ElastiCacheProvider;
pub use registry::ProviderRegistry;

use crate::error::{ConfigError, DiscoveryError};
use async_trait::async_trait;
use ddconf_common::tag_filter::TAGS_FILTER_KEY;
use ddconf_common::value::expect_mapping;
use ddconf_common::{Resource, Tags};
use serde_json::{Map, Value};

/// Everything a provider needs for one discovery call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderConfig {
    pub region: String,
    /// Provider-specific filters; `filters.tags` drives the tag search
    pub filters: Map<String, Value>,
    /// `output key -> source key`. Empty means raw tags pass through.
    pub tag_mapping: Tags,
}

impl ProviderConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Default::default()
        }
    }

    pub fn with_filters(mut self, filters: Map<String, Value>) -> Self {
        self.filters = filters;
        self
    }

    /// Set `filters.tags` from a plain tag map.
    pub fn with_tag_filters(mut self, tags: &Tags) -> Self {
        let tags: Map<String, Value> = tags
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        self.filters
            .insert(TAGS_FILTER_KEY.to_string(), Value::Object(tags));
        self
    }

    pub fn with_tag_mapping(mut self, tag_mapping: Tags) -> Self {
        self.tag_mapping = tag_mapping;
        self
    }

    /// Checks shared by every provider: a region, and `filters.tags` being a
    /// mapping when present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region.is_empty() {
            return Err(ConfigError::MissingRegion);
        }
        if let Some(tags) = self.filters.get(TAGS_FILTER_KEY) {
            expect_mapping(tags, "filters.tags")?;
        }
        Ok(())
    }
}

/// A pluggable resource provider.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Type name used in configs, e.g. `elasticache_redis`.
    fn resource_type(&self) -> &str;

    /// Reject configs this provider cannot run with.
    fn validate_config(&self, config: &ProviderConfig) -> Result<(), ConfigError>;

    /// Discover resources.
    ///
    /// Implementations validate `config` first and make no API calls when it
    /// is invalid.
    async fn discover(&self, config: &ProviderConfig) -> Result<Vec<Resource>, DiscoveryError>;
}
