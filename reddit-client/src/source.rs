use crate::api::RedditSearchClient;
use async_trait::async_trait;
use rivalscan_core::{Post, PostSource};
use tracing::warn;

/// `PostSource` backed by the live search client.
///
/// Failures stop here: a transport or parse error is logged with its query
/// context and surfaces as an empty result, so aggregation stays isolated
/// per query. This absorption is the contract, not a shortcut.
pub struct RedditPostSource {
    client: RedditSearchClient,
}

impl RedditPostSource {
    pub fn new(client: RedditSearchClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PostSource for RedditPostSource {
    async fn fetch(&self, query: &str, limit: u32) -> Vec<Post> {
        match self.client.search(query, limit).await {
            Ok(posts) => posts,
            Err(e) => {
                warn!(query, error = %e, "Search failed, treating query as empty");
                Vec::new()
            }
        }
    }
}
