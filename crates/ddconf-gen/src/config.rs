//! Generation config
//!
//! A generation config names the resources to discover and the templates to
//! render them into. See [`GenConfig::load`].

use crate::error::ConfigError;
use crate::resources::ProviderConfig;
use ddconf_common::Tags;
use ddconf_common::value::expect_mapping;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level generation config
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenConfig {
    /// Config format version, required but otherwise uninterpreted
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub resources: Vec<ResourceDefinition>,
    #[serde(default)]
    pub outputs: Vec<OutputDefinition>,
}

/// A named resource to discover
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceDefinition {
    /// Unique name referenced by outputs
    #[serde(default)]
    pub name: String,
    /// Provider type, e.g. `elasticache_redis`
    #[serde(default, rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub region: String,
    /// Provider-specific filters; must be a mapping when present
    #[serde(default)]
    pub filters: Option<Value>,
    /// `output key -> source key` applied to discovered tags
    #[serde(default)]
    pub tag_mapping: Tags,
}

/// A template to render into a file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputDefinition {
    /// Template path, relative to the config file's directory unless absolute
    #[serde(default)]
    pub template: PathBuf,
    #[serde(default)]
    pub output_file: PathBuf,
    #[serde(default)]
    pub data: OutputData,
}

/// What an output renders
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputData {
    /// Name of the resource definition whose discovery results are rendered
    #[serde(default)]
    pub resource_name: String,
    /// Exposed to the template as `Static`
    #[serde(default, rename = "static")]
    pub static_data: Map<String, Value>,
}

impl ResourceDefinition {
    /// Provider input for this definition.
    pub fn provider_config(&self) -> Result<ProviderConfig, ConfigError> {
        let filters = match &self.filters {
            Some(value) => expect_mapping(value, "filters")?.clone(),
            None => Map::new(),
        };
        Ok(ProviderConfig::new(self.region.clone())
            .with_filters(filters)
            .with_tag_mapping(self.tag_mapping.clone()))
    }
}

impl GenConfig {
    /// Read, parse and validate a generation config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        debug!(path = %path.display(), bytes = content.len(), "Read generation config file");

        let config = Self::parse(&content).map_err(|e| ConfigError::parse(path, e))?;
        debug!(
            resources = config.resources.len(),
            outputs = config.outputs.len(),
            "Parsed generation config"
        );

        config.validate()?;
        Ok(config)
    }

    /// Parse a config from YAML without validating it.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Check the structural rules every config must satisfy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version.is_empty() {
            return Err(ConfigError::MissingVersion);
        }
        if self.resources.is_empty() {
            return Err(ConfigError::NoResources);
        }
        if self.outputs.is_empty() {
            return Err(ConfigError::NoOutputs);
        }

        let mut names = HashSet::new();
        for (index, resource) in self.resources.iter().enumerate() {
            let missing = |field| ConfigError::MissingResourceField { index, field };
            if resource.name.is_empty() {
                return Err(missing("name"));
            }
            if resource.resource_type.is_empty() {
                return Err(missing("type"));
            }
            if resource.region.is_empty() {
                return Err(missing("region"));
            }
            if let Some(filters) = &resource.filters {
                expect_mapping(filters, &format!("resource[{index}].filters"))?;
            }
            if !names.insert(resource.name.as_str()) {
                return Err(ConfigError::DuplicateResourceName {
                    index,
                    name: resource.name.clone(),
                });
            }
        }

        for (index, output) in self.outputs.iter().enumerate() {
            let missing = |field| ConfigError::MissingOutputField { index, field };
            if output.template.as_os_str().is_empty() {
                return Err(missing("template"));
            }
            if output.output_file.as_os_str().is_empty() {
                return Err(missing("output_file"));
            }
            if output.data.resource_name.is_empty() {
                return Err(missing("data.resource_name"));
            }
            if !names.contains(output.data.resource_name.as_str()) {
                return Err(ConfigError::UnknownResource {
                    index,
                    name: output.data.resource_name.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Resolve a template path against the directory holding the config file.
pub fn resolve_template_path(config_path: &Path, template: &Path) -> PathBuf {
    if template.is_absolute() {
        return template.to_path_buf();
    }
    match config_path.parent() {
        Some(dir) => dir.join(template),
        None => template.to_path_buf(),
    }
}
