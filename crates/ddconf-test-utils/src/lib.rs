//! Shared test utilities for dd-conf-gen
//!
//! Common fixtures used by unit and integration tests across the workspace.
//!
//! ## Modules
//!
//! - [`aws`]: AWS region detection and sample ARNs
//! - [`fixtures`]: Temp files and sample discovered resources

pub mod aws;
pub mod fixtures;

// Re-export commonly used items
pub use aws::{get_test_region, replication_group_arn};
pub use fixtures::{sample_node, tags, write_temp_file};
