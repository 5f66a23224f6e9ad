//! Tag filter extraction and building
//!
//! Resource definitions carry their tag filters under `filters.tags`. These
//! are turned into provider-neutral [`TagFilter`] entries, which the AWS
//! adapter converts into SDK filter types.

use crate::Tags;
use crate::value::string_entries;
use serde_json::{Map, Value};

/// Key of the tag filter inside a resource definition's `filters`
pub const TAGS_FILTER_KEY: &str = "tags";

/// One tag-search condition: resource must carry `key` with one of `values`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    pub key: String,
    pub values: Vec<String>,
}

/// Pull the string-valued entries out of `filters.tags`.
///
/// Missing filters, a missing `tags` key, a non-mapping `tags` value and
/// non-string tag values all contribute nothing. Shape errors are reported by
/// provider config validation before discovery gets here.
pub fn extract_tag_filters(filters: Option<&Map<String, Value>>) -> Tags {
    filters
        .and_then(|f| f.get(TAGS_FILTER_KEY))
        .and_then(Value::as_object)
        .map(string_entries)
        .unwrap_or_default()
}

/// One single-valued filter per tag. An empty map yields no filters, which the
/// tagging API treats as "match every resource of the requested type".
pub fn build_tag_filters(tags: &Tags) -> Vec<TagFilter> {
    tags.iter()
        .map(|(key, value)| TagFilter {
            key: key.clone(),
            values: vec![value.clone()],
        })
        .collect()
}
