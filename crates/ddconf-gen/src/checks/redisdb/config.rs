//! RedisDB check generator config
//!
//! ```yaml
//! generate_config:
//!   region: ap-northeast-1
//!   find_tags: {Environment: production}
//!   check_tags: {env: Environment}
//! instance_template:
//!   username: "%%env_REDIS_USERNAME%%"
//! init_config: {}
//! ```
//!
//! Top-level keys other than `generate_config` and `instance_template` are
//! kept as "other configs"; only `init_config` is currently emitted.
//!
//! A missing file is treated as an empty config, so everything can also come
//! from environment variables (see [`ddconf_common::defaults::env`]).

use crate::error::ConfigError;
use ddconf_common::Tags;
use ddconf_common::defaults::env;
use ddconf_common::value::expect_mapping;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// The whole check generator config
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RedisDbConfig {
    #[serde(default)]
    pub generate_config: GenerateConfig,
    /// Base mapping copied into every instance
    #[serde(default)]
    pub instance_template: Option<Value>,
    /// Every other top-level key
    #[serde(flatten)]
    pub other_configs: Map<String, Value>,
}

/// Discovery settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GenerateConfig {
    /// Tags a replication group must carry to be included
    #[serde(default)]
    pub find_tags: Tags,
    /// `check tag key -> node tag key`; e.g. `{env: awsenv}` turns a node
    /// tagged `awsenv=production` into the check tag `env:production`
    #[serde(default)]
    pub check_tags: Tags,
    #[serde(default)]
    pub region: String,
}

impl RedisDbConfig {
    /// Load from `path` (if any) with overrides from the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Load from `path` (if any) with overrides read through `lookup`.
    ///
    /// Empty variables are ignored. JSON variables that decode to `null`
    /// leave the file value in place.
    pub fn load_with_env<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::read_file(path)?,
            None => Self::default(),
        };

        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(region) = var(env::REGION) {
            config.generate_config.region = region;
        }
        if let Some(tags) = json_var::<Tags>(env::FIND_TAGS, var(env::FIND_TAGS))? {
            config.generate_config.find_tags = tags;
        }
        if let Some(tags) = json_var::<Tags>(env::CHECK_TAGS, var(env::CHECK_TAGS))? {
            config.generate_config.check_tags = tags;
        }
        if let Some(template) =
            json_var::<Value>(env::INSTANCE_TEMPLATE, var(env::INSTANCE_TEMPLATE))?
        {
            config.instance_template = Some(template);
        }
        if let Some(others) =
            json_var::<Map<String, Value>>(env::OTHER_CONFIGS, var(env::OTHER_CONFIGS))?
        {
            config.other_configs.extend(others);
        }

        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Config file not found, using environment only");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::io(path, e)),
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| ConfigError::parse(path, e))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.generate_config.region.is_empty() {
            return Err(ConfigError::RegionNotSpecified);
        }
        self.instance_template()?;
        Ok(())
    }

    /// The instance template as a mapping; absent or `null` means none.
    pub fn instance_template(&self) -> Result<Option<&Map<String, Value>>, ConfigError> {
        match &self.instance_template {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(expect_mapping(value, "instance_template")?)),
        }
    }

    /// `init_config` from the other configs, `null` when absent.
    pub fn init_config(&self) -> Value {
        self.other_configs
            .get("init_config")
            .cloned()
            .unwrap_or(Value::Null)
    }
}

/// Decode an optional JSON environment value. `null` decodes to `None`.
fn json_var<T: DeserializeOwned>(
    name: &'static str,
    raw: Option<String>,
) -> Result<Option<T>, ConfigError> {
    match raw {
        Some(raw) => serde_json::from_str::<Option<T>>(&raw)
            .map_err(|source| ConfigError::EnvOverride { var: name, source }),
        None => Ok(None),
    }
}
