//! Per-check config generators
//!
//! Each check module builds the complete config document for one Datadog
//! Agent integration, without a user-supplied template.

pub mod redisdb;
