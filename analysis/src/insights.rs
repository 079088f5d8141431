use rivalscan_core::{Impact, Insight, InsightKind, InsightThresholds, Platform, PlatformMetrics};

/// Rule engine over the per-platform metrics.
///
/// Rules evaluate in a fixed order and every rule that fires emits an
/// insight; output order is emission order, never re-sorted by confidence
/// or impact. Pure function of its inputs.
pub struct InsightGenerator {
    thresholds: InsightThresholds,
    home: Platform,
}

impl InsightGenerator {
    pub fn new(thresholds: InsightThresholds, home: Platform) -> Self {
        Self { thresholds, home }
    }

    pub fn generate(&self, metrics: &[PlatformMetrics]) -> Vec<Insight> {
        let mut insights = Vec::new();

        let home_mentions = metrics
            .iter()
            .find(|m| m.platform == self.home)
            .map(|m| m.post_count)
            .unwrap_or(0);

        self.dominant_mentions_rule(metrics, home_mentions, &mut insights);
        self.low_sentiment_rule(metrics, &mut insights);
        self.high_engagement_rule(metrics, &mut insights);

        insights
    }

    /// Threat: the busiest rival, when its mention count clears the bar.
    /// The first platform encountered wins ties.
    fn dominant_mentions_rule(
        &self,
        metrics: &[PlatformMetrics],
        home_mentions: usize,
        insights: &mut Vec<Insight>,
    ) {
        let top = metrics
            .iter()
            .filter(|m| m.platform != self.home)
            .fold(None::<&PlatformMetrics>, |best, m| match best {
                Some(b) if m.post_count <= b.post_count => Some(b),
                _ => Some(m),
            });

        if let Some(top) = top {
            if top.post_count > self.thresholds.dominant_mentions {
                insights.push(Insight {
                    kind: InsightKind::Threat,
                    title: format!("{} dominates this week's conversation", top.platform),
                    confidence: (70 + top.post_count).min(95) as u8,
                    impact: Impact::High,
                    description: format!(
                        "{} drew {} mentions this week against {} for {}.",
                        top.platform, top.post_count, home_mentions, self.home
                    ),
                    recommendation: format!(
                        "Review the top {} threads to find out what is driving the volume.",
                        top.platform
                    ),
                });
            }
        }
    }

    /// Opportunity: every rival with enough mentions whose average
    /// sentiment has dropped below the threshold.
    fn low_sentiment_rule(&self, metrics: &[PlatformMetrics], insights: &mut Vec<Insight>) {
        for m in metrics.iter().filter(|m| m.platform != self.home) {
            if m.post_count > self.thresholds.low_sentiment_mentions
                && m.avg_sentiment < self.thresholds.low_sentiment
            {
                let confidence =
                    (60.0 + (0.5 - m.avg_sentiment) * 80.0).floor().clamp(0.0, 100.0) as u8;
                insights.push(Insight {
                    kind: InsightKind::Opportunity,
                    title: format!("Users are souring on {}", m.platform),
                    confidence,
                    impact: Impact::Medium,
                    description: format!(
                        "Average sentiment for {} sits at {:.0}% across {} mentions.",
                        m.platform,
                        m.avg_sentiment * 100.0,
                        m.post_count
                    ),
                    recommendation: format!(
                        "Reach the dissatisfied {} users in these threads with a concrete migration path.",
                        m.platform
                    ),
                });
            }
        }
    }

    /// Trend: the first rival in input order over the engagement bar.
    /// First encountered, not the maximum.
    fn high_engagement_rule(&self, metrics: &[PlatformMetrics], insights: &mut Vec<Insight>) {
        let hit = metrics
            .iter()
            .find(|m| m.platform != self.home && m.avg_engagement > self.thresholds.high_engagement);

        if let Some(m) = hit {
            insights.push(Insight {
                kind: InsightKind::Trend,
                title: format!("{} threads are pulling outsized engagement", m.platform),
                confidence: 75,
                impact: Impact::Medium,
                description: format!(
                    "Discussions mentioning {} average {:.0} upvotes and comments per post.",
                    m.platform, m.avg_engagement
                ),
                recommendation:
                    "Engage early in the high-traffic threads while they are still climbing."
                        .to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(
        platform: Platform,
        post_count: usize,
        avg_sentiment: f64,
        avg_engagement: f64,
    ) -> PlatformMetrics {
        PlatformMetrics {
            platform,
            post_count,
            avg_sentiment,
            total_engagement: (avg_engagement * post_count as f64) as u64,
            avg_engagement,
        }
    }

    fn generator() -> InsightGenerator {
        InsightGenerator::new(InsightThresholds::default(), Platform::Medium)
    }

    #[test]
    fn test_threat_rule_scenario() {
        let input = vec![
            metrics(Platform::Medium, 3, 0.5, 10.0),
            metrics(Platform::Substack, 15, 0.5, 10.0),
        ];

        let insights = generator().generate(&input);
        assert_eq!(insights.len(), 1);

        let threat = &insights[0];
        assert_eq!(threat.kind, InsightKind::Threat);
        assert_eq!(threat.confidence, 85);
        assert_eq!(threat.impact, Impact::High);
        assert!(threat.title.contains("Substack"));
        assert!(threat.description.contains("15"));
        assert!(threat.description.contains('3'));
    }

    #[test]
    fn test_threat_confidence_caps_at_95() {
        let input = vec![metrics(Platform::Ghost, 40, 0.5, 10.0)];
        let insights = generator().generate(&input);
        assert_eq!(insights[0].confidence, 95);
    }

    #[test]
    fn test_threat_needs_strictly_more_than_threshold() {
        let input = vec![metrics(Platform::Substack, 10, 0.5, 10.0)];
        assert!(generator().generate(&input).is_empty());
    }

    #[test]
    fn test_home_brand_never_a_threat() {
        let input = vec![metrics(Platform::Medium, 50, 0.5, 10.0)];
        assert!(generator().generate(&input).is_empty());
    }

    #[test]
    fn test_threat_tie_goes_to_first_platform() {
        let input = vec![
            metrics(Platform::Substack, 12, 0.5, 10.0),
            metrics(Platform::Ghost, 12, 0.5, 10.0),
        ];

        let insights = generator().generate(&input);
        assert!(insights[0].title.contains("Substack"));
    }

    #[test]
    fn test_low_sentiment_rule_confidence_formula() {
        let input = vec![metrics(Platform::Ghost, 6, 0.3, 10.0)];

        let insights = generator().generate(&input);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Opportunity);
        // floor(60 + (0.5 - 0.3) * 80) = 76
        assert_eq!(insights[0].confidence, 76);
        assert_eq!(insights[0].impact, Impact::Medium);
        assert!(insights[0].description.contains("30%"));
    }

    #[test]
    fn test_low_sentiment_fires_per_platform() {
        let input = vec![
            metrics(Platform::Substack, 8, 0.2, 10.0),
            metrics(Platform::Ghost, 7, 0.35, 10.0),
        ];

        let insights = generator().generate(&input);
        let opportunities: Vec<_> = insights
            .iter()
            .filter(|i| i.kind == InsightKind::Opportunity)
            .collect();
        assert_eq!(opportunities.len(), 2);
    }

    #[test]
    fn test_low_sentiment_needs_enough_mentions() {
        let input = vec![metrics(Platform::Ghost, 5, 0.2, 10.0)];
        assert!(generator().generate(&input).is_empty());
    }

    #[test]
    fn test_trend_rule_picks_first_not_max() {
        let input = vec![
            metrics(Platform::Substack, 4, 0.5, 60.0),
            metrics(Platform::Ghost, 4, 0.5, 200.0),
        ];

        let insights = generator().generate(&input);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Trend);
        assert_eq!(insights[0].confidence, 75);
        assert!(insights[0].title.contains("Substack"));
    }

    #[test]
    fn test_rule_order_is_fixed() {
        let input = vec![
            metrics(Platform::Medium, 2, 0.5, 5.0),
            metrics(Platform::Substack, 15, 0.3, 80.0),
        ];

        let insights = generator().generate(&input);
        let kinds: Vec<InsightKind> = insights.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                InsightKind::Threat,
                InsightKind::Opportunity,
                InsightKind::Trend
            ]
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let input = vec![
            metrics(Platform::Medium, 2, 0.5, 5.0),
            metrics(Platform::Substack, 15, 0.3, 80.0),
            metrics(Platform::Ghost, 7, 0.35, 20.0),
        ];

        let generator = generator();
        assert_eq!(generator.generate(&input), generator.generate(&input));
    }

    #[test]
    fn test_all_platforms_empty_fires_nothing() {
        let input = vec![
            metrics(Platform::Medium, 0, 0.5, 0.0),
            metrics(Platform::Substack, 0, 0.5, 0.0),
        ];
        assert!(generator().generate(&input).is_empty());
    }
}
