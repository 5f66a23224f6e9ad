//! In-process fakes for the AWS operation traits

#![allow(dead_code)]

use async_trait::async_trait;
use ddconf_common::{TagFilter, Tags};
use ddconf_gen::aws::{
    AwsError, ElastiCacheOperations, Endpoint, Shard, ShardMember, TaggedResource,
    TaggingOperations, TopologyGroup,
};
use ddconf_test_utils::replication_group_arn;
use std::collections::HashMap;
use std::sync::Mutex;

/// Returns the configured groups whose tags match every filter.
#[derive(Default)]
pub struct FakeTagging {
    pub groups: Vec<TaggedResource>,
    pub calls: Mutex<Vec<Vec<TagFilter>>>,
}

impl FakeTagging {
    pub fn with_group(mut self, region: &str, id: &str, tags: Tags) -> Self {
        self.groups.push(TaggedResource {
            arn: replication_group_arn(region, id),
            tags,
        });
        self
    }
}

#[async_trait]
impl TaggingOperations for FakeTagging {
    async fn get_resources(
        &self,
        _resource_type: &str,
        tag_filters: &[TagFilter],
    ) -> Result<Vec<TaggedResource>, AwsError> {
        self.calls.lock().unwrap().push(tag_filters.to_vec());
        Ok(self
            .groups
            .iter()
            .filter(|group| {
                tag_filters.iter().all(|filter| {
                    group
                        .tags
                        .get(&filter.key)
                        .is_some_and(|value| filter.values.contains(value))
                })
            })
            .cloned()
            .collect())
    }
}

/// Serves fixed topologies by replication group ID.
#[derive(Default)]
pub struct FakeElastiCache {
    pub topologies: HashMap<String, Vec<TopologyGroup>>,
}

impl FakeElastiCache {
    /// Add a group with `shards` shards of one primary and one replica each.
    pub fn with_group(mut self, id: &str, shards: usize) -> Self {
        let shards = (1..=shards)
            .map(|n| {
                let shard_id = format!("{n:04}");
                let node = |member: usize, role: &str| ShardMember {
                    cache_cluster_id: Some(format!("{id}-{shard_id}-{member:03}")),
                    role: Some(role.to_string()),
                    read_endpoint: Some(Endpoint {
                        address: format!("{id}-{shard_id}-{member:03}.cache.amazonaws.com"),
                        port: 6379,
                    }),
                };
                Shard {
                    id: shard_id.clone(),
                    members: vec![node(1, "primary"), node(2, "replica")],
                }
            })
            .collect();

        self.topologies.insert(
            id.to_string(),
            vec![TopologyGroup {
                id: Some(id.to_string()),
                shards,
            }],
        );
        self
    }
}

#[async_trait]
impl ElastiCacheOperations for FakeElastiCache {
    async fn describe_replication_group(
        &self,
        replication_group_id: &str,
    ) -> Result<Vec<TopologyGroup>, AwsError> {
        self.topologies
            .get(replication_group_id)
            .cloned()
            .ok_or_else(|| AwsError::NotFound {
                message: format!("Replication group {replication_group_id} not found."),
            })
    }
}
