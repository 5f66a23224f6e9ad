//! ddconf-common - Shared types and pure transformations
//!
//! This crate holds everything in the discovery pipeline that does not talk to
//! AWS, so it stays free of SDK dependencies and is cheap to test.
//!
//! ## Modules
//!
//! - [`arn`]: Resource ID extraction from ARNs
//! - [`defaults`]: Default values and environment variable names
//! - [`instance`]: Check-instance builder and tag combination
//! - [`resource`]: The discovered [`Resource`] record
//! - [`tag_filter`]: Tag filter extraction and building
//! - [`tag_mapping`]: Declarative tag renaming
//! - [`value`]: Typed accessors over dynamic configuration values

pub mod arn;
pub mod defaults;
pub mod instance;
pub mod resource;
pub mod tag_filter;
pub mod tag_mapping;
pub mod value;

// Re-export commonly used types
pub use arn::{resource_id_from_arn, resource_ids_from_arns};
pub use instance::{build_instance, combine_tags};
pub use resource::{Resource, metadata};
pub use tag_filter::{TagFilter, build_tag_filters, extract_tag_filters};
pub use tag_mapping::map_tags;
pub use value::{ValueError, ValueKind};

/// Ordered string-to-string tag map used throughout the pipeline.
pub type Tags = std::collections::BTreeMap<String, String>;
