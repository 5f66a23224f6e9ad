//! Datadog `redisdb` check config generator
//!
//! Discovers ElastiCache Redis nodes by `generate_config.find_tags` and emits
//! one check instance per node.

pub mod config;
pub mod generate;

pub use config::{GenerateConfig, RedisDbConfig};
pub use generate::generate_redisdb_config;

use crate::resources::{Provider, ProviderConfig};
use anyhow::{Context, Result};
use tracing::info;

/// Discover nodes with `provider` and render the check config.
///
/// Nodes keep their raw tags; `check_tags` decides which end up in the output.
pub async fn run(config: &RedisDbConfig, provider: &dyn Provider) -> Result<String> {
    let generate = &config.generate_config;
    let provider_config =
        ProviderConfig::new(generate.region.clone()).with_tag_filters(&generate.find_tags);

    let nodes = provider
        .discover(&provider_config)
        .await
        .context("failed to get Redis nodes")?;
    info!(nodes = nodes.len(), region = %generate.region, "Discovered Redis nodes");

    generate_redisdb_config(&nodes, config).context("failed to generate Redis config")
}
