//! Discovered resource record
//!
//! One [`Resource`] is produced per addressable endpoint (for ElastiCache,
//! per primary or replica member of a shard). Templates address its fields
//! as `Host`, `Port`, `Tags` and `Metadata`.

use crate::Tags;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Metadata keys attached by topology-aware providers
pub mod metadata {
    /// Provider-native identifier of the owning cluster
    pub const CLUSTER_NAME: &str = "ClusterName";

    /// Identifier of the shard (node group) the endpoint belongs to
    pub const SHARD_NAME: &str = "ShardName";

    /// Whether the endpoint is the shard's primary
    pub const IS_PRIMARY: &str = "IsPrimary";
}

/// Discovered network endpoint with its tags and provider metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resource {
    /// Hostname or endpoint address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Tags after mapping (raw provider tags when no mapping is configured)
    #[serde(default)]
    pub tags: Tags,
    /// Type-specific additional data
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl Resource {
    /// Create a resource with no tags or metadata
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            tags: Tags::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Replace the tag set
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Attach ElastiCache-style cluster/shard/role metadata
    pub fn with_node_metadata(
        mut self,
        cluster_name: impl Into<String>,
        shard_name: impl Into<String>,
        is_primary: bool,
    ) -> Self {
        self.metadata
            .insert(metadata::CLUSTER_NAME.to_string(), Value::String(cluster_name.into()));
        self.metadata
            .insert(metadata::SHARD_NAME.to_string(), Value::String(shard_name.into()));
        self.metadata
            .insert(metadata::IS_PRIMARY.to_string(), Value::Bool(is_primary));
        self
    }

    /// `host:port` form, used in log fields and error messages
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn cluster_name(&self) -> Option<&str> {
        self.metadata.get(metadata::CLUSTER_NAME).and_then(Value::as_str)
    }

    pub fn shard_name(&self) -> Option<&str> {
        self.metadata.get(metadata::SHARD_NAME).and_then(Value::as_str)
    }

    pub fn is_primary(&self) -> Option<bool> {
        self.metadata.get(metadata::IS_PRIMARY).and_then(Value::as_bool)
    }
}
