use crate::error::ConfigError;
use crate::types::Platform;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Search queries issued for one tracked brand, in fixed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformQueries {
    pub platform: Platform,
    pub queries: Vec<String>,
}

/// Fixed delay applied between consecutive search requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub inter_query_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            inter_query_delay_ms: 500,
        }
    }
}

/// Tunable thresholds for the insight rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightThresholds {
    /// Minimum post count before the dominant-mentions rule fires.
    pub dominant_mentions: usize,
    /// Minimum post count before the low-sentiment rule considers a platform.
    pub low_sentiment_mentions: usize,
    /// Average sentiment below this marks a platform as dissatisfied.
    pub low_sentiment: f64,
    /// Average engagement above this marks a platform as trending.
    pub high_engagement: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            dominant_mentions: 10,
            low_sentiment_mentions: 5,
            low_sentiment: 0.4,
            high_engagement: 50.0,
        }
    }
}

/// Keyword lists for the sentiment heuristic, matched case-insensitively
/// by substring containment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentLexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self {
            positive: words(&[
                "love",
                "great",
                "awesome",
                "excellent",
                "amazing",
                "fantastic",
                "helpful",
                "recommend",
                "happy",
                "impressed",
                "works well",
                "easy to use",
            ]),
            negative: words(&[
                "hate",
                "terrible",
                "awful",
                "worst",
                "broken",
                "scam",
                "frustrating",
                "annoying",
                "disappointed",
                "useless",
                "buggy",
                "overpriced",
                "leaving",
            ]),
        }
    }
}

/// Everything the pipeline needs, passed in at construction so tests can
/// swap lexicons, queries, and thresholds without touching core logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// The brand the insight rules benchmark against.
    pub home: Platform,
    pub platforms: Vec<PlatformQueries>,
    /// Result limit passed to each search call.
    pub per_query_limit: u32,
    /// Deduplicated posts kept per platform.
    pub platform_post_cap: usize,
    /// Posts previewed in each competitor summary.
    pub preview_posts: usize,
    /// Themes kept in the report.
    pub top_themes: usize,
    pub pacing: PacingConfig,
    pub thresholds: InsightThresholds,
    pub lexicon: SentimentLexicon,
    pub theme_keywords: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            home: Platform::Medium,
            platforms: vec![
                PlatformQueries {
                    platform: Platform::Medium,
                    queries: words(&["medium.com blogging", "medium partner program"]),
                },
                PlatformQueries {
                    platform: Platform::Substack,
                    queries: words(&["substack", "substack newsletter"]),
                },
                PlatformQueries {
                    platform: Platform::Ghost,
                    queries: words(&["ghost cms", "ghost blogging"]),
                },
                PlatformQueries {
                    platform: Platform::LinkedIn,
                    queries: words(&["linkedin newsletter", "linkedin articles"]),
                },
                PlatformQueries {
                    platform: Platform::DevTo,
                    queries: words(&["dev.to blogging"]),
                },
                PlatformQueries {
                    platform: Platform::Hashnode,
                    queries: words(&["hashnode"]),
                },
            ],
            per_query_limit: 10,
            platform_post_cap: 25,
            preview_posts: 3,
            top_themes: 10,
            pacing: PacingConfig::default(),
            thresholds: InsightThresholds::default(),
            lexicon: SentimentLexicon::default(),
            theme_keywords: words(&[
                "newsletter",
                "paywall",
                "monetization",
                "subscription",
                "audience",
                "seo",
                "email list",
                "pricing",
                "migration",
                "editor",
                "analytics",
                "community",
                "custom domain",
                "discoverability",
                "algorithm",
            ]),
        }
    }
}

impl AnalysisConfig {
    /// Load a TOML override file. Missing fields fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.per_query_limit < 1 {
            return Err(ConfigError::ValidationFailed {
                reason: "per_query_limit must be at least 1".to_string(),
            });
        }
        if self.platform_post_cap < 1 {
            return Err(ConfigError::ValidationFailed {
                reason: "platform_post_cap must be at least 1".to_string(),
            });
        }
        if self.platforms.is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "at least one platform must be configured".to_string(),
            });
        }
        for entry in &self.platforms {
            if entry.queries.is_empty() || entry.queries.iter().any(|q| q.trim().is_empty()) {
                return Err(ConfigError::ValidationFailed {
                    reason: format!("platform {} has an empty query list or query", entry.platform),
                });
            }
        }
        if self.lexicon.positive.is_empty() || self.lexicon.negative.is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "sentiment lexicon must have positive and negative words".to_string(),
            });
        }
        if self.theme_keywords.is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "theme keyword list must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.home, Platform::Medium);
        assert_eq!(config.platforms.len(), 6);
        assert_eq!(config.platforms[0].platform, Platform::Medium);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let config = AnalysisConfig {
            per_query_limit: 0,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn test_empty_query_list_rejected() {
        let mut config = AnalysisConfig::default();
        config.platforms[1].queries.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_override_keeps_defaults_for_missing_fields() {
        let parsed: AnalysisConfig = toml::from_str(
            r#"
            per_query_limit = 5

            [pacing]
            inter_query_delay_ms = 50
            "#,
        )
        .unwrap();
        assert_eq!(parsed.per_query_limit, 5);
        assert_eq!(parsed.pacing.inter_query_delay_ms, 50);
        assert_eq!(parsed.platform_post_cap, 25);
        assert_eq!(parsed.thresholds.dominant_mentions, 10);
    }
}
