use crate::metrics::{MetricsCollector, RequestMetrics};
use reqwest::Client;
use rivalscan_core::{CoreError, Post, SearchApiError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

const REDDIT_BASE: &str = "https://www.reddit.com";

// The search capability is fixed to fresh posts from the last week.
const SEARCH_SORT: &str = "new";
const SEARCH_WINDOW: &str = "week";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    pub after: Option<String>,
    pub before: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    pub kind: String,
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditPostData {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub author: Option<String>,
    pub subreddit: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub url: Option<String>,
    pub created_utc: f64,
    pub score: i64,
    pub num_comments: u32,
    #[serde(default)]
    pub over_18: bool,
    #[serde(default)]
    pub stickied: bool,
}

/// Unauthenticated client for Reddit's public search endpoint. The caller
/// is identified by its User-Agent string only; there are no retries, and
/// the only timeout is the transport's.
#[derive(Debug)]
pub struct RedditSearchClient {
    http_client: Client,
    metrics: Arc<MetricsCollector>,
    user_agent: String,
}

impl RedditSearchClient {
    pub fn new(user_agent: String) -> Result<Self, CoreError> {
        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            metrics: Arc::new(MetricsCollector::new()),
            user_agent,
        })
    }

    /// Search recent posts matching `query`. `limit` must be at least 1.
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<Post>, CoreError> {
        if query.trim().is_empty() {
            return Err(CoreError::InvalidInput {
                message: "search query must not be empty".to_string(),
            });
        }
        if limit < 1 {
            return Err(CoreError::InvalidInput {
                message: "search limit must be at least 1".to_string(),
            });
        }

        let start_time = Instant::now();
        let result = self.execute_search(query, limit).await;

        let rate_limited = matches!(
            &result,
            Err(CoreError::SearchApi(SearchApiError::RateLimitExceeded { .. }))
        );
        self.metrics
            .record_request(RequestMetrics {
                response_time: start_time.elapsed(),
                success: result.is_ok(),
                rate_limited,
            })
            .await;

        result
    }

    async fn execute_search(&self, query: &str, limit: u32) -> Result<Vec<Post>, CoreError> {
        let url = format!("{REDDIT_BASE}/search.json");
        let limit_str = limit.to_string();
        let params = [
            ("q", query),
            ("limit", limit_str.as_str()),
            ("sort", SEARCH_SORT),
            ("t", SEARCH_WINDOW),
            ("raw_json", "1"),
        ];

        debug!(query, limit, "Making Reddit search request");
        let response = match self.http_client.get(&url).query(&params).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(query, error = %e, "Network error during search");
                if e.is_timeout() {
                    return Err(CoreError::SearchApi(SearchApiError::RequestTimeout));
                }
                return Err(CoreError::Network(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            error!(query, status = status.as_u16(), "Search request failed");

            if status.as_u16() == 429 {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                return Err(CoreError::SearchApi(SearchApiError::RateLimitExceeded {
                    retry_after,
                }));
            }
            if status.as_u16() == 403 {
                return Err(CoreError::SearchApi(SearchApiError::Forbidden {
                    resource: query.to_string(),
                }));
            }
            if status.is_server_error() {
                return Err(CoreError::SearchApi(SearchApiError::ServerError {
                    status_code: status.as_u16(),
                }));
            }
            return Err(CoreError::SearchApi(SearchApiError::InvalidResponse {
                details: format!("unexpected status {status}"),
            }));
        }

        let listing: RedditListing<RedditPostData> = response.json().await.map_err(|e| {
            error!(query, error = %e, "Failed to parse search response");
            CoreError::SearchApi(SearchApiError::InvalidResponse {
                details: format!("failed to parse search results for \"{query}\""),
            })
        })?;

        let posts: Vec<Post> = listing
            .data
            .children
            .into_iter()
            .map(|child| Post::from(child.data))
            .collect();

        info!(query, count = posts.len(), "Retrieved search results");
        Ok(posts)
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub async fn get_metrics(&self) -> crate::metrics::ApiMetrics {
        self.metrics.get_metrics().await
    }
}

impl From<RedditPostData> for Post {
    fn from(data: RedditPostData) -> Self {
        let url = if data.permalink.is_empty() {
            data.url
        } else {
            Some(format!("https://www.reddit.com{}", data.permalink))
        };

        Self {
            id: data.id,
            title: data.title,
            body: data.selftext,
            subreddit: data.subreddit,
            upvotes: data.score.max(0) as u32,
            comment_count: data.num_comments,
            created_utc: Some(data.created_utc as i64),
            url,
            author: data.author,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post_data() -> RedditPostData {
        RedditPostData {
            id: "test123".to_string(),
            title: "Substack vs Medium in 2025".to_string(),
            selftext: "Thinking about moving my newsletter".to_string(),
            author: Some("test_user".to_string()),
            subreddit: "blogging".to_string(),
            permalink: "/r/blogging/comments/test123".to_string(),
            url: Some("https://example.com/article".to_string()),
            created_utc: 1_640_995_200.0,
            score: 42,
            num_comments: 5,
            over_18: false,
            stickied: false,
        }
    }

    #[test]
    fn test_post_conversion() {
        let post: Post = sample_post_data().into();
        assert_eq!(post.id, "test123");
        assert_eq!(post.title, "Substack vs Medium in 2025");
        assert_eq!(post.body, "Thinking about moving my newsletter");
        assert_eq!(post.subreddit, "blogging");
        assert_eq!(post.upvotes, 42);
        assert_eq!(post.comment_count, 5);
        assert_eq!(post.created_utc, Some(1_640_995_200));
        assert_eq!(
            post.url.as_deref(),
            Some("https://www.reddit.com/r/blogging/comments/test123")
        );
    }

    #[test]
    fn test_negative_score_clamps_to_zero() {
        let mut data = sample_post_data();
        data.score = -17;
        let post: Post = data.into();
        assert_eq!(post.upvotes, 0);
    }

    #[test]
    fn test_listing_deserialization() {
        let raw = r#"{
            "kind": "Listing",
            "data": {
                "children": [
                    {
                        "kind": "t3",
                        "data": {
                            "id": "abc",
                            "title": "Ghost CMS pricing",
                            "subreddit": "selfhosted",
                            "created_utc": 1700000000.0,
                            "score": 12,
                            "num_comments": 3
                        }
                    }
                ],
                "after": null,
                "before": null
            }
        }"#;

        let listing: RedditListing<RedditPostData> = serde_json::from_str(raw).unwrap();
        assert_eq!(listing.data.children.len(), 1);

        let post: Post = listing.data.children[0].data.clone().into();
        assert_eq!(post.id, "abc");
        assert_eq!(post.body, "");
        assert!(post.author.is_none());
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = RedditSearchClient::new("rivalscan-test/1.0".to_string()).unwrap();
        assert_eq!(client.user_agent(), "rivalscan-test/1.0");

        let metrics = client.get_metrics().await;
        assert_eq!(metrics.total_requests, 0);
    }

    #[tokio::test]
    async fn test_empty_query_rejected_before_network() {
        let client = RedditSearchClient::new("rivalscan-test/1.0".to_string()).unwrap();
        let result = client.search("   ", 10).await;
        assert!(matches!(result, Err(CoreError::InvalidInput { .. })));

        let result = client.search("substack", 0).await;
        assert!(matches!(result, Err(CoreError::InvalidInput { .. })));
    }
}
