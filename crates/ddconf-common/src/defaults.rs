//! Default values shared between the generator and its check commands
//!
//! These constants keep provider names, API filters and environment variable
//! names consistent across the workspace.

/// Provider type for ElastiCache (Redis OSS / Valkey) replication groups
pub const ELASTICACHE_REDIS_PROVIDER: &str = "elasticache_redis";

/// Resource type filter understood by the Resource Groups Tagging API
pub const ELASTICACHE_REPLICATION_GROUP_RESOURCE_TYPE: &str = "elasticache:replicationgroup";

/// Role string ElastiCache reports for the writable member of a shard
pub const PRIMARY_ROLE: &str = "primary";

/// Default log level for the CLI
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variables that override the RedisDB check config
pub mod env {
    /// Overrides `generate_config.region` (plain string)
    pub const REGION: &str = "GENERATE_CONFIG_REGION";

    /// Overrides `generate_config.find_tags` (JSON object)
    pub const FIND_TAGS: &str = "GENERATE_CONFIG_FIND_TAGS";

    /// Overrides `generate_config.check_tags` (JSON object)
    pub const CHECK_TAGS: &str = "GENERATE_CONFIG_CHECK_TAGS";

    /// Overrides `instance_template` (JSON value)
    pub const INSTANCE_TEMPLATE: &str = "INSTANCE_TEMPLATE";

    /// Merged key by key into the passthrough top-level configs (JSON object)
    pub const OTHER_CONFIGS: &str = "OTHER_CONFIGS";
}
