use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One deduplicated forum post attributed to a platform via its search
/// queries. Identity is `id`; two posts with the same id are the same post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
    pub subreddit: String,
    pub upvotes: u32,
    pub comment_count: u32,
    pub created_utc: Option<i64>,
    pub url: Option<String>,
    pub author: Option<String>,
}

impl Post {
    /// Upvotes plus comments, the engagement measure used everywhere.
    pub fn engagement(&self) -> u64 {
        self.upvotes as u64 + self.comment_count as u64
    }

    /// Title and body joined for text scoring.
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}

/// A tracked brand. `Medium` is the home brand the others are benchmarked
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Medium,
    Substack,
    Ghost,
    LinkedIn,
    #[serde(rename = "dev.to")]
    DevTo,
    Hashnode,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Medium => "Medium",
            Platform::Substack => "Substack",
            Platform::Ghost => "Ghost",
            Platform::LinkedIn => "LinkedIn",
            Platform::DevTo => "dev.to",
            Platform::Hashnode => "Hashnode",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

/// Output of the sentiment heuristic. `score` is the continuous value in
/// [0,1] used for averaging, independent of the discrete label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub score: f64,
}

/// Per-platform aggregates computed fresh on every run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformMetrics {
    pub platform: Platform,
    pub post_count: usize,
    pub avg_sentiment: f64,
    pub total_engagement: u64,
    pub avg_engagement: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Threat,
    Opportunity,
    Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

/// A rule-triggered finding. Ordering in the report is the order the rules
/// fired, not confidence or impact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub confidence: u8,
    pub impact: Impact,
    pub description: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeCount {
    pub theme: String,
    pub count: u32,
}

/// Preview of a top post in a competitor summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPreview {
    pub title: String,
    pub community: String,
    pub upvotes: u32,
    pub comments: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorSummary {
    pub platform: Platform,
    pub mentions: usize,
    pub avg_sentiment: f64,
    pub total_engagement: u64,
    pub top_posts: Vec<PostPreview>,
}

/// The full analysis snapshot returned by `/api/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisData {
    pub insights: Vec<Insight>,
    pub themes: Vec<ThemeCount>,
    pub competitors: Vec<CompetitorSummary>,
    pub total_posts: usize,
    pub timestamp: DateTime<Utc>,
}

/// Success/failure envelope wrapped around every API payload.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
