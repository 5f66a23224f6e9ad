//! Temp files and sample resources

use ddconf_common::{Resource, Tags};
use std::io::Write;
use tempfile::NamedTempFile;

/// Build a tag map from pairs.
pub fn tags(pairs: &[(&str, &str)]) -> Tags {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// An ElastiCache-style node in cluster `my-redis`.
pub fn sample_node(host: &str, shard: &str, is_primary: bool, node_tags: Tags) -> Resource {
    Resource::new(host, 6379)
        .with_tags(node_tags)
        .with_node_metadata("my-redis", shard, is_primary)
}

/// Write `content` to a fresh temp file with the given suffix.
///
/// The file is removed when the returned handle is dropped.
pub fn write_temp_file(content: &str, suffix: &str) -> std::io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("ddconf-")
        .suffix(suffix)
        .tempfile()?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(file)
}
