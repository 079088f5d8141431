use crate::types::Post;
use async_trait::async_trait;

/// The search capability the aggregator consumes.
///
/// Implementations absorb their own failures: a query that errors out must
/// come back as an empty sequence so one bad query can never abort a
/// platform's analysis. The signature is infallible on purpose.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch(&self, query: &str, limit: u32) -> Vec<Post>;
}
