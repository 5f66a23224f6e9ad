//! Declarative tag renaming
//!
//! A tag mapping is a table of `output key -> source key`. For example
//! `{"env": "Environment"}` turns a resource tagged `Environment=production`
//! into one tagged `env=production`.

use crate::Tags;

/// Translate `raw` through `mapping`.
///
/// Source tags that no mapping entry names are dropped, and mapping entries
/// whose source tag is absent are left out of the result entirely.
pub fn map_tags(raw: &Tags, mapping: &Tags) -> Tags {
    mapping
        .iter()
        .filter_map(|(output_key, source_key)| {
            raw.get(source_key)
                .map(|value| (output_key.clone(), value.clone()))
        })
        .collect()
}
