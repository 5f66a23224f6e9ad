//! Check-instance builder
//!
//! Turns a discovered node into one entry of a check's `instances:` list by
//! layering host, port and tags over a user-supplied instance template.

use crate::value::{ValueError, expect_list};
use crate::{Resource, Tags};
use serde_json::{Map, Value};

const HOST_KEY: &str = "host";
const PORT_KEY: &str = "port";
const TAGS_KEY: &str = "tags";

/// Combine template tags with check tags derived from the node.
///
/// The template's string entries come first, in order (non-strings are
/// skipped). Then one `"<output key>:<value>"` per `check_tags` entry whose
/// source tag the node carries, in key order. Duplicates are kept.
pub fn combine_tags(
    template_tags: Option<&Value>,
    check_tags: &Tags,
    node_tags: &Tags,
) -> Result<Vec<String>, ValueError> {
    let mut tags: Vec<String> = match template_tags {
        Some(value) => expect_list(value, "instance_template.tags")?
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };

    for (check_key, node_key) in check_tags {
        if let Some(value) = node_tags.get(node_key) {
            tags.push(format!("{check_key}:{value}"));
        }
    }

    Ok(tags)
}

/// Build one check instance for `node`.
///
/// Starts from a shallow copy of `template`, sets `host` and `port`, and sets
/// `tags` only when the combined tag list is non-empty.
pub fn build_instance(
    node: &Resource,
    template: Option<&Map<String, Value>>,
    check_tags: &Tags,
) -> Result<Map<String, Value>, ValueError> {
    let mut instance = Map::new();
    if let Some(template) = template {
        for (key, value) in template {
            if key != TAGS_KEY {
                instance.insert(key.clone(), value.clone());
            }
        }
    }

    instance.insert(HOST_KEY.to_string(), Value::String(node.host.clone()));
    instance.insert(PORT_KEY.to_string(), Value::from(node.port));

    let tags = combine_tags(
        template.and_then(|t| t.get(TAGS_KEY)),
        check_tags,
        &node.tags,
    )?;
    if !tags.is_empty() {
        instance.insert(
            TAGS_KEY.to_string(),
            Value::Array(tags.into_iter().map(Value::String).collect()),
        );
    }

    Ok(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn template(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_template_tags_then_check_tags() {
        let node =
            Resource::new("redis.example.com", 6379).with_tags(tags(&[("awsenv", "Production")]));
        let tmpl = template(json!({"tags": ["instancetag:bar"]}));
        let check_tags = tags(&[("env", "awsenv")]);

        let instance = build_instance(&node, Some(&tmpl), &check_tags).unwrap();
        assert_eq!(instance["tags"], json!(["instancetag:bar", "env:Production"]));
    }

    #[test]
    fn test_template_fields_copied_and_host_port_set() {
        let node = Resource::new("redis.example.com", 6379).with_tags(tags(&[
            ("Environment", "production"),
            ("Team", "backend"),
        ]));
        let tmpl = template(json!({
            "username": "%%env_REDIS_USERNAME%%",
            "password": "%%env_REDIS_PASSWORD%%",
            "host": "overridden.example.com"
        }));
        let check_tags = tags(&[("env", "Environment"), ("team", "Team")]);

        let instance = build_instance(&node, Some(&tmpl), &check_tags).unwrap();
        assert_eq!(instance["host"], json!("redis.example.com"));
        assert_eq!(instance["port"], json!(6379));
        assert_eq!(instance["username"], json!("%%env_REDIS_USERNAME%%"));
        assert_eq!(instance["password"], json!("%%env_REDIS_PASSWORD%%"));
        assert_eq!(instance["tags"], json!(["env:production", "team:backend"]));
    }

    #[test]
    fn test_tags_key_omitted_when_empty() {
        let node = Resource::new("redis.example.com", 6379);
        let tmpl = template(json!({"tags": []}));

        let instance =
            build_instance(&node, Some(&tmpl), &tags(&[("env", "Environment")])).unwrap();
        assert!(!instance.contains_key("tags"));

        let bare = build_instance(&node, None, &Tags::new()).unwrap();
        assert_eq!(bare.len(), 2);
        assert!(!bare.contains_key("tags"));
    }

    #[test]
    fn test_non_string_template_tags_skipped() {
        let tmpl_tags = json!(["keep:me", 42, {"nested": true}, "also:kept"]);
        let combined = combine_tags(Some(&tmpl_tags), &Tags::new(), &Tags::new()).unwrap();
        assert_eq!(combined, vec!["keep:me", "also:kept"]);
    }

    #[test]
    fn test_duplicates_not_removed() {
        let tmpl_tags = json!(["env:prod"]);
        let combined = combine_tags(
            Some(&tmpl_tags),
            &tags(&[("env", "Environment")]),
            &tags(&[("Environment", "prod")]),
        )
        .unwrap();
        assert_eq!(combined, vec!["env:prod", "env:prod"]);
    }

    #[test]
    fn test_template_tags_must_be_a_list() {
        let node = Resource::new("redis.example.com", 6379);
        let tmpl = template(json!({"tags": "env:prod"}));
        let err = build_instance(&node, Some(&tmpl), &Tags::new()).unwrap_err();
        assert!(err.to_string().contains("instance_template.tags must be a list"));
    }
}
