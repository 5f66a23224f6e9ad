//! Resource ID extraction from ARNs
//!
//! Every supported resource type keeps its provider-native identifier in the
//! final colon-delimited segment, e.g.
//! `arn:aws:elasticache:ap-northeast-1:123456789012:replicationgroup:my-cluster`.

/// Return the text after the final `:` (the whole string if there is none).
pub fn resource_id_from_arn(arn: &str) -> &str {
    arn.rsplit(':').next().unwrap_or(arn)
}

/// Element-wise [`resource_id_from_arn`], order preserved.
pub fn resource_ids_from_arns<S: AsRef<str>>(arns: &[S]) -> Vec<String> {
    arns.iter()
        .map(|arn| resource_id_from_arn(arn.as_ref()).to_string())
        .collect()
}
