use chrono::Utc;
use rivalscan_core::{
    AnalysisData, CompetitorSummary, Insight, Platform, PlatformMetrics, Post, PostPreview,
    ThemeCount,
};

/// Folds the per-platform results into the response payload: one summary
/// per platform in configuration order, a preview of the leading posts in
/// fetch order, and the grand totals.
pub fn assemble(
    collected: &[(Platform, Vec<Post>)],
    metrics: &[PlatformMetrics],
    insights: Vec<Insight>,
    themes: Vec<ThemeCount>,
    preview_posts: usize,
) -> AnalysisData {
    let competitors: Vec<CompetitorSummary> = collected
        .iter()
        .zip(metrics)
        .map(|((platform, posts), m)| CompetitorSummary {
            platform: *platform,
            mentions: m.post_count,
            avg_sentiment: m.avg_sentiment,
            total_engagement: m.total_engagement,
            top_posts: posts
                .iter()
                .take(preview_posts)
                .map(|post| PostPreview {
                    title: post.title.clone(),
                    community: post.subreddit.clone(),
                    upvotes: post.upvotes,
                    comments: post.comment_count,
                })
                .collect(),
        })
        .collect();

    let total_posts = collected.iter().map(|(_, posts)| posts.len()).sum();

    AnalysisData {
        insights,
        themes,
        competitors,
        total_posts,
        timestamp: Utc::now(),
    }
}
