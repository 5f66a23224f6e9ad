//! Typed errors for configuration, discovery and rendering

use crate::aws::AwsError;
use ddconf_common::ValueError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors in a generator or check configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("version is required")]
    MissingVersion,

    #[error("at least one resource must be defined")]
    NoResources,

    #[error("at least one output must be defined")]
    NoOutputs,

    #[error("resource[{index}]: {field} is required")]
    MissingResourceField { index: usize, field: &'static str },

    #[error("resource[{index}]: duplicate resource name: {name}")]
    DuplicateResourceName { index: usize, name: String },

    #[error("output[{index}]: {field} is required")]
    MissingOutputField { index: usize, field: &'static str },

    #[error("output[{index}]: resource_name '{name}' not found in resources")]
    UnknownResource { index: usize, name: String },

    #[error("region is required")]
    MissingRegion,

    #[error("region is not specified in config or environment variable")]
    RegionNotSpecified,

    #[error("invalid value for environment variable {var}")]
    EnvOverride {
        var: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Value(#[from] ValueError),
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        ConfigError::Parse {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while discovering resources.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("invalid provider config")]
    InvalidConfig(#[from] ConfigError),

    #[error("failed to get resources by tags")]
    TagSearch(#[source] AwsError),

    #[error("failed to describe replication group {resource_id}")]
    DescribeTopology {
        resource_id: String,
        #[source]
        source: AwsError,
    },
}

impl DiscoveryError {
    /// The underlying AWS error, when discovery failed on an API call.
    pub fn aws_error(&self) -> Option<&AwsError> {
        match self {
            DiscoveryError::TagSearch(e) | DiscoveryError::DescribeTopology { source: e, .. } => {
                Some(e)
            }
            DiscoveryError::InvalidConfig(_) => None,
        }
    }
}

/// Errors from the provider registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("provider not found for resource type: {0}")]
    NotFound(String),
}

/// Errors from loading or rendering a template.
///
/// Reading, parsing and executing are reported as distinct variants.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse template {name}")]
    Parse {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("failed to execute template {name}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}
