//! ElastiCache for Redis provider
//!
//! Discovery runs in three steps:
//!
//! 1. Search the tagging API for replication groups matching `filters.tags`
//! 2. Describe each matching group to get its shards and members
//! 3. Emit one [`Resource`] per member that has a read endpoint
//!
//! Every node carries the tags of its replication group, optionally renamed
//! through the config's tag mapping.

use super::{Provider, ProviderConfig};
use crate::aws::{
    AwsContext, ElastiCacheClient, ElastiCacheOperations, FromAwsContext, TaggedResource,
    TaggingClient, TaggingOperations, TopologyGroup,
};
use crate::error::{ConfigError, DiscoveryError};
use async_trait::async_trait;
use ddconf_common::defaults::{
    ELASTICACHE_REDIS_PROVIDER, ELASTICACHE_REPLICATION_GROUP_RESOURCE_TYPE, PRIMARY_ROLE,
};
use ddconf_common::{
    Resource, Tags, build_tag_filters, extract_tag_filters, map_tags, resource_id_from_arn,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Provider for `elasticache_redis` resources
#[derive(Default)]
pub struct ElastiCacheProvider {
    tagging: Option<Arc<dyn TaggingOperations>>,
    elasticache: Option<Arc<dyn ElastiCacheOperations>>,
}

impl ElastiCacheProvider {
    /// Provider that builds SDK clients for the configured region on each
    /// discovery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider using pre-built clients, regardless of the configured region.
    pub fn with_clients(
        tagging: Arc<dyn TaggingOperations>,
        elasticache: Arc<dyn ElastiCacheOperations>,
    ) -> Self {
        Self {
            tagging: Some(tagging),
            elasticache: Some(elasticache),
        }
    }

    async fn clients(
        &self,
        region: &str,
    ) -> (Arc<dyn TaggingOperations>, Arc<dyn ElastiCacheOperations>) {
        if let (Some(tagging), Some(elasticache)) = (&self.tagging, &self.elasticache) {
            return (Arc::clone(tagging), Arc::clone(elasticache));
        }

        debug!(region, "Loading AWS configuration");
        let ctx = AwsContext::new(region).await;
        let tagging = self
            .tagging
            .clone()
            .unwrap_or_else(|| Arc::new(TaggingClient::from_context(&ctx)));
        let elasticache = self
            .elasticache
            .clone()
            .unwrap_or_else(|| Arc::new(ElastiCacheClient::from_context(&ctx)));
        (tagging, elasticache)
    }
}

#[async_trait]
impl Provider for ElastiCacheProvider {
    fn resource_type(&self) -> &str {
        ELASTICACHE_REDIS_PROVIDER
    }

    fn validate_config(&self, config: &ProviderConfig) -> Result<(), ConfigError> {
        config.validate()
    }

    async fn discover(&self, config: &ProviderConfig) -> Result<Vec<Resource>, DiscoveryError> {
        self.validate_config(config)?;
        debug!(region = %config.region, "Starting ElastiCache Redis discovery");

        let (tagging, elasticache) = self.clients(&config.region).await;

        let tags = extract_tag_filters(Some(&config.filters));
        debug!(tag_count = tags.len(), ?tags, "Extracted tag filters");

        let groups = tagging
            .get_resources(
                ELASTICACHE_REPLICATION_GROUP_RESOURCE_TYPE,
                &build_tag_filters(&tags),
            )
            .await
            .map_err(DiscoveryError::TagSearch)?;

        if groups.is_empty() {
            info!(?tags, "No replication groups found matching tag filters");
            return Ok(Vec::new());
        }
        info!(count = groups.len(), "Found replication groups by tags");

        let mut nodes = Vec::new();
        for TaggedResource { arn, tags: raw_tags } in &groups {
            let resource_id = resource_id_from_arn(arn);
            debug!(resource_id, arn = %arn, "Describing replication group");

            let topology = elasticache
                .describe_replication_group(resource_id)
                .await
                .map_err(|source| DiscoveryError::DescribeTopology {
                    resource_id: resource_id.to_string(),
                    source,
                })?;

            if topology.is_empty() {
                warn!(resource_id, "No replication group details found");
                continue;
            }

            let node_tags = if config.tag_mapping.is_empty() {
                raw_tags.clone()
            } else {
                map_tags(raw_tags, &config.tag_mapping)
            };

            let found = resolve_nodes(&topology, resource_id, &node_tags);
            debug!(resource_id, nodes = found.len(), "Extracted nodes from replication group");
            nodes.extend(found);
        }

        info!(total_nodes = nodes.len(), "ElastiCache Redis discovery completed");
        Ok(nodes)
    }
}

/// Flatten replication group topology into one resource per addressable node.
///
/// Order follows groups, then shards, then members as AWS returned them.
/// `cluster_name` is the ID that was looked up, not the ID in the response.
pub fn resolve_nodes(groups: &[TopologyGroup], cluster_name: &str, tags: &Tags) -> Vec<Resource> {
    let mut nodes = Vec::new();

    for group in groups {
        debug!(
            replication_group_id = group.id.as_deref().unwrap_or_default(),
            shards = group.shards.len(),
            "Processing replication group"
        );

        for shard in &group.shards {
            for member in &shard.members {
                let Some(endpoint) = &member.read_endpoint else {
                    warn!(
                        shard = %shard.id,
                        cache_cluster_id = member.cache_cluster_id.as_deref().unwrap_or_default(),
                        "Node member has no read endpoint"
                    );
                    continue;
                };

                let is_primary = member.role.as_deref() == Some(PRIMARY_ROLE);
                let node = Resource::new(endpoint.address.clone(), endpoint.port)
                    .with_tags(tags.clone())
                    .with_node_metadata(cluster_name, shard.id.clone(), is_primary);
                debug!(address = %node.address(), is_primary, shard = %shard.id, "Extracted node");
                nodes.push(node);
            }
        }
    }

    nodes
}
