//! Resource Groups Tagging API search

use super::context::{AwsContext, FromAwsContext};
use super::error::{AwsError, classify_sdk_error};
use async_trait::async_trait;
use aws_sdk_resourcegroupstagging::Client;
use aws_sdk_resourcegroupstagging::types::TagFilter as SdkTagFilter;
use ddconf_common::{TagFilter, Tags};
use tracing::debug;

/// A tagged resource returned by a tag search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedResource {
    pub arn: String,
    pub tags: Tags,
}

/// Tag search operations, mockable in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaggingOperations: Send + Sync {
    /// Find every resource of `resource_type` matching all `tag_filters`.
    ///
    /// Results from every page are concatenated in the order AWS returns them.
    async fn get_resources(
        &self,
        resource_type: &str,
        tag_filters: &[TagFilter],
    ) -> Result<Vec<TaggedResource>, AwsError>;
}

/// Tagging client backed by the AWS SDK
pub struct TaggingClient {
    client: Client,
}

impl FromAwsContext for TaggingClient {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.tagging_client(),
        }
    }
}

impl TaggingClient {
    /// Create a tagging client (loads AWS config from the environment)
    pub async fn new(region: &str) -> Self {
        let ctx = AwsContext::new(region).await;
        Self::from_context(&ctx)
    }
}

fn to_sdk_filter(filter: &TagFilter) -> SdkTagFilter {
    SdkTagFilter::builder()
        .key(&filter.key)
        .set_values(Some(filter.values.clone()))
        .build()
}

#[async_trait]
impl TaggingOperations for TaggingClient {
    async fn get_resources(
        &self,
        resource_type: &str,
        tag_filters: &[TagFilter],
    ) -> Result<Vec<TaggedResource>, AwsError> {
        let sdk_filters: Vec<SdkTagFilter> = tag_filters.iter().map(to_sdk_filter).collect();
        let mut resources = Vec::new();
        let mut pagination_token: Option<String> = None;

        loop {
            let response = self
                .client
                .get_resources()
                .resource_type_filters(resource_type)
                .set_tag_filters(Some(sdk_filters.clone()))
                .set_pagination_token(pagination_token.take())
                .send()
                .await
                .map_err(|e| classify_sdk_error(&e))?;

            for mapping in response.resource_tag_mapping_list() {
                let Some(arn) = mapping.resource_arn() else {
                    debug!("Skipping tag mapping without ARN");
                    continue;
                };
                let tags = mapping
                    .tags()
                    .iter()
                    .map(|tag| (tag.key().to_string(), tag.value().to_string()))
                    .collect();
                resources.push(TaggedResource {
                    arn: arn.to_string(),
                    tags,
                });
            }

            match response.pagination_token() {
                Some(token) if !token.is_empty() => {
                    debug!(count = resources.len(), "Fetching next tag search page");
                    pagination_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        Ok(resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_sdk_filter() {
        let filter = TagFilter {
            key: "Environment".to_string(),
            values: vec!["production".to_string()],
        };
        let sdk = to_sdk_filter(&filter);
        assert_eq!(sdk.key(), Some("Environment"));
        assert_eq!(sdk.values(), ["production".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_tagging_operations() {
        let mut mock = MockTaggingOperations::new();
        mock.expect_get_resources()
            .withf(|resource_type, filters| {
                resource_type == "elasticache:replicationgroup" && filters.len() == 1
            })
            .times(1)
            .returning(|_, _| {
                Ok(vec![TaggedResource {
                    arn: "arn:aws:elasticache:ap-northeast-1:123456789012:replicationgroup:my-redis"
                        .to_string(),
                    tags: Tags::new(),
                }])
            });

        let filters = vec![TagFilter {
            key: "Environment".to_string(),
            values: vec!["production".to_string()],
        }];
        let found = mock
            .get_resources("elasticache:replicationgroup", &filters)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_get_resources_follows_pagination_token() {
        use aws_sdk_resourcegroupstagging::operation::get_resources::GetResourcesOutput;
        use aws_sdk_resourcegroupstagging::types::{ResourceTagMapping, Tag};
        use aws_smithy_mocks::{RuleMode, mock, mock_client};

        fn mapping(id: &str) -> ResourceTagMapping {
            ResourceTagMapping::builder()
                .resource_arn(format!(
                    "arn:aws:elasticache:ap-northeast-1:123456789012:replicationgroup:{id}"
                ))
                .tags(
                    Tag::builder()
                        .key("Environment")
                        .value("production")
                        .build()
                        .unwrap(),
                )
                .build()
        }

        let first_page = mock!(Client::get_resources)
            .match_requests(|req| {
                req.pagination_token().is_none()
                    && req.resource_type_filters() == ["elasticache:replicationgroup"]
                    && req.tag_filters().len() == 1
            })
            .then_output(|| {
                GetResourcesOutput::builder()
                    .resource_tag_mapping_list(mapping("cache-a"))
                    .pagination_token("page-2")
                    .build()
            });
        let last_page = mock!(Client::get_resources)
            .match_requests(|req| req.pagination_token() == Some("page-2"))
            .then_output(|| {
                GetResourcesOutput::builder()
                    .resource_tag_mapping_list(mapping("cache-b"))
                    .pagination_token("")
                    .build()
            });
        let client = mock_client!(
            aws_sdk_resourcegroupstagging,
            RuleMode::Sequential,
            [&first_page, &last_page]
        );

        let tagging = TaggingClient { client };
        let filters = [TagFilter {
            key: "Environment".to_string(),
            values: vec!["production".to_string()],
        }];
        let resources = tagging
            .get_resources("elasticache:replicationgroup", &filters)
            .await
            .unwrap();

        let arns: Vec<_> = resources.iter().map(|r| r.arn.as_str()).collect();
        assert_eq!(
            arns,
            [
                "arn:aws:elasticache:ap-northeast-1:123456789012:replicationgroup:cache-a",
                "arn:aws:elasticache:ap-northeast-1:123456789012:replicationgroup:cache-b",
            ]
        );
        assert_eq!(
            resources[1].tags.get("Environment").map(String::as_str),
            Some("production")
        );
        assert_eq!(first_page.num_calls(), 1);
        assert_eq!(last_page.num_calls(), 1);
    }
}
