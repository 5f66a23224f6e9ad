//! RedisDB check config rendering

use super::config::RedisDbConfig;
use anyhow::{Context, Result};
use ddconf_common::{Resource, build_instance};
use serde_json::{Map, Value};

const INIT_CONFIG_KEY: &str = "init_config";
const INSTANCES_KEY: &str = "instances";

/// Build the `redisdb` check config for `nodes` as YAML.
///
/// The document has exactly two keys: `init_config` (taken from the other
/// configs, `null` when absent) and `instances` (one per node, in order).
pub fn generate_redisdb_config(nodes: &[Resource], config: &RedisDbConfig) -> Result<String> {
    let template = config.instance_template()?;
    let check_tags = &config.generate_config.check_tags;

    let instances = nodes
        .iter()
        .map(|node| {
            build_instance(node, template, check_tags)
                .map(Value::Object)
                .with_context(|| format!("failed to build instance for node {}", node.address()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut output = Map::new();
    output.insert(INIT_CONFIG_KEY.to_string(), config.init_config());
    output.insert(INSTANCES_KEY.to_string(), Value::Array(instances));

    serde_yaml::to_string(&output).context("failed to marshal config to YAML")
}
