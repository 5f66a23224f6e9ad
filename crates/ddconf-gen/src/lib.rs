//! ddconf-gen - Datadog check config generation from cloud topology
//!
//! This crate discovers cache clusters through AWS tagging and ElastiCache
//! APIs, flattens them into per-node [`Resource`](ddconf_common::Resource)
//! records and renders those into Agent configuration files.

pub mod aws;
pub mod checks;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod renderer;
pub mod resources;

pub use error::{ConfigError, DiscoveryError, RegistryError, TemplateError};
pub use resources::{Provider, ProviderConfig, ProviderRegistry};
