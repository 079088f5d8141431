pub mod aggregator;
pub mod insights;
pub mod pacing;
pub mod report;
pub mod sentiment;
pub mod themes;

use crate::aggregator::{compute_metrics, PlatformAggregator};
use crate::insights::InsightGenerator;
use crate::pacing::{FixedDelayPacer, Pacer};
use crate::sentiment::SentimentScorer;
use crate::themes::ThemeExtractor;
use rivalscan_core::{AnalysisConfig, AnalysisData, CoreError, Platform, PlatformMetrics, Post, PostSource};
use std::sync::Arc;
use tracing::info;

/// The one-invocation competitor analysis pipeline.
///
/// Each `run` fans the configured queries out per platform, scores and
/// aggregates the results, and derives insights, all from scratch; nothing
/// is cached or shared between runs.
pub struct CompetitorAnalyzer {
    config: AnalysisConfig,
    aggregator: PlatformAggregator,
    scorer: SentimentScorer,
    themes: ThemeExtractor,
    insights: InsightGenerator,
}

impl CompetitorAnalyzer {
    pub fn new(config: AnalysisConfig, source: Arc<dyn PostSource>) -> Self {
        let pacer = Arc::new(FixedDelayPacer::new(&config.pacing));
        Self::with_pacer(config, source, pacer)
    }

    /// Construction with an explicit pacing policy; tests pass a no-op.
    pub fn with_pacer(
        config: AnalysisConfig,
        source: Arc<dyn PostSource>,
        pacer: Arc<dyn Pacer>,
    ) -> Self {
        let aggregator = PlatformAggregator::new(
            source,
            pacer,
            config.per_query_limit,
            config.platform_post_cap,
        );
        let scorer = SentimentScorer::new(&config.lexicon);
        let themes = ThemeExtractor::new(&config.theme_keywords, config.top_themes);
        let insights = InsightGenerator::new(config.thresholds.clone(), config.home);

        Self {
            config,
            aggregator,
            scorer,
            themes,
            insights,
        }
    }

    pub async fn run(&self) -> Result<AnalysisData, CoreError> {
        let mut collected: Vec<(Platform, Vec<Post>)> =
            Vec::with_capacity(self.config.platforms.len());
        for entry in &self.config.platforms {
            let posts = self.aggregator.collect(entry.platform, &entry.queries).await;
            collected.push((entry.platform, posts));
        }

        let metrics: Vec<PlatformMetrics> = collected
            .iter()
            .map(|(platform, posts)| compute_metrics(*platform, posts, &self.scorer))
            .collect();

        let insights = self.insights.generate(&metrics);
        let themes = self
            .themes
            .extract(collected.iter().flat_map(|(_, posts)| posts));

        let data = report::assemble(
            &collected,
            &metrics,
            insights,
            themes,
            self.config.preview_posts,
        );
        info!(
            total_posts = data.total_posts,
            insights = data.insights.len(),
            "Analysis run complete"
        );
        Ok(data)
    }
}
