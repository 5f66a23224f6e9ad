//! ElastiCache replication group topology

use super::context::{AwsContext, FromAwsContext};
use super::error::{AwsError, classify_sdk_error};
use async_trait::async_trait;
use aws_sdk_elasticache::Client;
use aws_sdk_elasticache::types::{
    Endpoint as SdkEndpoint, NodeGroup, NodeGroupMember, ReplicationGroup,
};
use tracing::debug;

/// Network endpoint of a cache node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub address: String,
    pub port: u16,
}

/// One node inside a shard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShardMember {
    pub cache_cluster_id: Option<String>,
    /// `"primary"` or `"replica"` when AWS reports it
    pub role: Option<String>,
    /// Node-specific read endpoint; members without one are not addressable
    pub read_endpoint: Option<Endpoint>,
}

/// A shard (node group) of a replication group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shard {
    pub id: String,
    pub members: Vec<ShardMember>,
}

/// A replication group with its shards, as returned by a describe call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologyGroup {
    pub id: Option<String>,
    pub shards: Vec<Shard>,
}

/// ElastiCache operations, mockable in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ElastiCacheOperations: Send + Sync {
    /// Describe one replication group by ID.
    ///
    /// AWS answers with a list. It normally holds exactly one group, but an
    /// empty list is passed through as-is.
    async fn describe_replication_group(
        &self,
        replication_group_id: &str,
    ) -> Result<Vec<TopologyGroup>, AwsError>;
}

/// ElastiCache client backed by the AWS SDK
pub struct ElastiCacheClient {
    client: Client,
}

impl FromAwsContext for ElastiCacheClient {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.elasticache_client(),
        }
    }
}

impl ElastiCacheClient {
    /// Create an ElastiCache client (loads AWS config from the environment)
    pub async fn new(region: &str) -> Self {
        let ctx = AwsContext::new(region).await;
        Self::from_context(&ctx)
    }
}

#[async_trait]
impl ElastiCacheOperations for ElastiCacheClient {
    async fn describe_replication_group(
        &self,
        replication_group_id: &str,
    ) -> Result<Vec<TopologyGroup>, AwsError> {
        let response = self
            .client
            .describe_replication_groups()
            .replication_group_id(replication_group_id)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;

        Ok(response
            .replication_groups()
            .iter()
            .map(topology_from_sdk)
            .collect())
    }
}

fn topology_from_sdk(group: &ReplicationGroup) -> TopologyGroup {
    TopologyGroup {
        id: group.replication_group_id().map(str::to_string),
        shards: group.node_groups().iter().map(shard_from_sdk).collect(),
    }
}

fn shard_from_sdk(node_group: &NodeGroup) -> Shard {
    Shard {
        id: node_group.node_group_id().unwrap_or_default().to_string(),
        members: node_group
            .node_group_members()
            .iter()
            .map(member_from_sdk)
            .collect(),
    }
}

fn member_from_sdk(member: &NodeGroupMember) -> ShardMember {
    ShardMember {
        cache_cluster_id: member.cache_cluster_id().map(str::to_string),
        role: member.current_role().map(str::to_string),
        read_endpoint: member.read_endpoint().and_then(endpoint_from_sdk),
    }
}

/// An endpoint is only usable with both an address and a valid port.
fn endpoint_from_sdk(endpoint: &SdkEndpoint) -> Option<Endpoint> {
    let address = endpoint.address()?;
    let port = endpoint.port().and_then(|p| u16::try_from(p).ok());
    match port {
        Some(port) => Some(Endpoint {
            address: address.to_string(),
            port,
        }),
        None => {
            debug!(address, port = ?endpoint.port(), "Ignoring endpoint without a usable port");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sdk_member(address: Option<&str>, port: Option<i32>, role: &str) -> NodeGroupMember {
        let mut endpoint = SdkEndpoint::builder();
        if let Some(address) = address {
            endpoint = endpoint.address(address);
        }
        if let Some(port) = port {
            endpoint = endpoint.port(port);
        }
        NodeGroupMember::builder()
            .cache_cluster_id("my-redis-0001-001")
            .current_role(role)
            .read_endpoint(endpoint.build())
            .build()
    }

    #[test]
    fn test_topology_from_sdk() {
        let group = ReplicationGroup::builder()
            .replication_group_id("my-redis")
            .node_groups(
                NodeGroup::builder()
                    .node_group_id("0001")
                    .node_group_members(sdk_member(
                        Some("my-redis-0001-001.abc.cache.amazonaws.com"),
                        Some(6379),
                        "primary",
                    ))
                    .node_group_members(NodeGroupMember::builder().build())
                    .build(),
            )
            .build();

        let topology = topology_from_sdk(&group);
        assert_eq!(topology.id.as_deref(), Some("my-redis"));
        assert_eq!(topology.shards.len(), 1);

        let shard = &topology.shards[0];
        assert_eq!(shard.id, "0001");
        assert_eq!(shard.members.len(), 2);
        assert_eq!(shard.members[0].role.as_deref(), Some("primary"));
        assert_eq!(
            shard.members[0].read_endpoint,
            Some(Endpoint {
                address: "my-redis-0001-001.abc.cache.amazonaws.com".to_string(),
                port: 6379,
            })
        );
        assert_eq!(shard.members[1], ShardMember::default());
    }

    #[test]
    fn test_endpoint_requires_address_and_valid_port() {
        let no_address = sdk_member(None, Some(6379), "replica");
        assert!(member_from_sdk(&no_address).read_endpoint.is_none());

        let no_port = sdk_member(Some("host"), None, "replica");
        assert!(member_from_sdk(&no_port).read_endpoint.is_none());

        let bad_port = sdk_member(Some("host"), Some(70000), "replica");
        assert!(member_from_sdk(&bad_port).read_endpoint.is_none());
    }
}
