use crate::pacing::Pacer;
use crate::sentiment::SentimentScorer;
use rivalscan_core::{Platform, PlatformMetrics, Post, PostSource};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Fans one platform's queries out through the post source.
///
/// Queries run sequentially with the pacer's pause after every fetch; the
/// concatenated results are deduplicated by post id (first occurrence in
/// fetch order wins) and truncated to the per-platform cap.
pub struct PlatformAggregator {
    source: Arc<dyn PostSource>,
    pacer: Arc<dyn Pacer>,
    per_query_limit: u32,
    platform_post_cap: usize,
}

impl PlatformAggregator {
    pub fn new(
        source: Arc<dyn PostSource>,
        pacer: Arc<dyn Pacer>,
        per_query_limit: u32,
        platform_post_cap: usize,
    ) -> Self {
        Self {
            source,
            pacer,
            per_query_limit,
            platform_post_cap,
        }
    }

    pub async fn collect(&self, platform: Platform, queries: &[String]) -> Vec<Post> {
        let mut posts = Vec::new();
        for query in queries {
            let fetched = self.source.fetch(query, self.per_query_limit).await;
            debug!(%platform, query = query.as_str(), count = fetched.len(), "Query returned");
            posts.extend(fetched);
            self.pacer.pause().await;
        }

        let mut seen = HashSet::new();
        posts.retain(|post| seen.insert(post.id.clone()));
        posts.truncate(self.platform_post_cap);

        info!(%platform, count = posts.len(), "Aggregated platform posts");
        posts
    }
}

/// Per-platform aggregates. An empty post set yields 0.5 average sentiment
/// (no signal, not negative) and zero engagement.
pub fn compute_metrics(
    platform: Platform,
    posts: &[Post],
    scorer: &SentimentScorer,
) -> PlatformMetrics {
    let post_count = posts.len();
    let avg_sentiment = if post_count == 0 {
        0.5
    } else {
        posts
            .iter()
            .map(|post| scorer.score(&post.combined_text()).score)
            .sum::<f64>()
            / post_count as f64
    };
    let total_engagement: u64 = posts.iter().map(|post| post.engagement()).sum();
    let avg_engagement = if post_count == 0 {
        0.0
    } else {
        total_engagement as f64 / post_count as f64
    };

    PlatformMetrics {
        platform,
        post_count,
        avg_sentiment,
        total_engagement,
        avg_engagement,
    }
}
