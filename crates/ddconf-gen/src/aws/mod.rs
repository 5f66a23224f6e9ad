//! AWS client modules
//!
//! Wrappers around the AWS SDK clients used for discovery:
//! - context: shared SDK config per region
//! - tagging: Resource Groups Tagging API search
//! - elasticache: replication group topology
//! - error: typed classification of SDK errors

pub mod context;
pub mod elasticache;
pub mod error;
pub mod tagging;

pub use context::{AwsContext, FromAwsContext};
pub use elasticache::{
    ElastiCacheClient, ElastiCacheOperations, Endpoint, Shard, ShardMember, TopologyGroup,
};
pub use error::{AwsError, classify_aws_error, classify_sdk_error};
pub use tagging::{TaggedResource, TaggingClient, TaggingOperations};

#[cfg(test)]
pub use elasticache::MockElastiCacheOperations;
#[cfg(test)]
pub use tagging::MockTaggingOperations;
