//! AWS error classification
//!
//! SDK errors are classified through their `.code()` metadata rather than by
//! matching on Debug output.

use aws_sdk_elasticache::error::{DisplayErrorContext, ProvideErrorMetadata};
use thiserror::Error;

/// AWS error categories surfaced by discovery
#[derive(Debug, Error)]
pub enum AwsError {
    /// The requested replication group does not exist
    #[error("Resource not found: {message}")]
    NotFound { message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    Throttled,

    /// Credentials are missing, expired or lack the needed permissions
    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    /// Generic AWS SDK error with code and message
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AwsError::NotFound { .. })
    }

    /// Get a user-facing hint for resolving this error, if one is known.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            AwsError::Throttled => suggestion_for_code("Throttling"),
            AwsError::AccessDenied { .. } => suggestion_for_code("AccessDenied"),
            AwsError::Sdk { code: Some(c), .. } => suggestion_for_code(c),
            _ => None,
        }
    }
}

const NOT_FOUND_CODES: &[&str] = &["ReplicationGroupNotFoundFault", "CacheClusterNotFound"];

const THROTTLING_CODES: &[&str] = &["Throttling", "ThrottlingException", "RequestLimitExceeded"];

const ACCESS_DENIED_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "UnauthorizedOperation",
    "InvalidClientTokenId",
    "UnrecognizedClientException",
];

/// Classify an AWS error from its code and message.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if NOT_FOUND_CODES.contains(&c) => AwsError::NotFound { message },
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled,
        Some(c) if ACCESS_DENIED_CODES.contains(&c) => AwsError::AccessDenied { message },
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Classify any SDK operation error.
///
/// Errors without service metadata (dispatch failures, timeouts, missing
/// credentials) fall back to the full display chain as the message.
pub fn classify_sdk_error<E>(error: &E) -> AwsError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    match (error.code(), error.message()) {
        (None, None) => AwsError::Sdk {
            code: None,
            message: DisplayErrorContext(error).to_string(),
        },
        (code, message) => classify_aws_error(code, message),
    }
}

const SUGGESTIONS: &[(&str, &str)] = &[
    (
        "AccessDenied",
        concat!(
            "Check that the credentials allow tag:GetResources ",
            "and elasticache:DescribeReplicationGroups."
        ),
    ),
    (
        "ExpiredToken",
        "AWS session credentials have expired. Refresh them and retry.",
    ),
    (
        "ExpiredTokenException",
        "AWS session credentials have expired. Refresh them and retry.",
    ),
    (
        "Throttling",
        "AWS API rate limit hit. Re-run later or reduce the number of resources per config.",
    ),
    (
        "InvalidParameterValue",
        "Check the region and tag filters in the config file.",
    ),
];

fn suggestion_for_code(code: &str) -> Option<String> {
    SUGGESTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| (*s).to_string())
}
