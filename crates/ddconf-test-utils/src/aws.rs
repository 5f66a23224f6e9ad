//! AWS test utilities
//!
//! Region detection for integration tests and ARN builders for fixtures.

/// Account ID used in fixture ARNs
pub const TEST_ACCOUNT_ID: &str = "123456789012";

/// Get the AWS region for tests.
///
/// Checks environment variables in order:
/// 1. AWS_REGION
/// 2. AWS_DEFAULT_REGION
/// 3. Falls back to ap-northeast-1
pub fn get_test_region() -> String {
    std::env::var("AWS_REGION")
        .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
        .unwrap_or_else(|_| "ap-northeast-1".to_string())
}

/// ARN of a replication group in the fixture account.
///
/// ```
/// use ddconf_test_utils::aws::replication_group_arn;
///
/// assert_eq!(
///     replication_group_arn("us-east-1", "my-redis"),
///     "arn:aws:elasticache:us-east-1:123456789012:replicationgroup:my-redis"
/// );
/// ```
pub fn replication_group_arn(region: &str, replication_group_id: &str) -> String {
    format!(
        "arn:aws:elasticache:{region}:{TEST_ACCOUNT_ID}:replicationgroup:{replication_group_id}"
    )
}
