use analysis::CompetitorAnalyzer;
use anyhow::Result;
use axum::{http::Method, routing::get, Router};
use reddit_client::{RedditPostSource, RedditSearchClient};
use rivalscan_core::AnalysisConfig;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;

pub struct AppState {
    pub analyzer: CompetitorAnalyzer,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rivalscan=info,analysis=info,reddit_client=info")),
        )
        .init();

    info!("Starting Rivalscan - competitor brand monitor");

    let config = match std::env::var("RIVALSCAN_CONFIG") {
        Ok(path) => AnalysisConfig::load(&path)?,
        Err(_) => {
            let config = AnalysisConfig::default();
            config.validate()?;
            config
        }
    };

    let user_agent = std::env::var("RIVALSCAN_USER_AGENT")
        .unwrap_or_else(|_| "rivalscan/0.1 (competitor brand monitor)".to_string());
    let client = RedditSearchClient::new(user_agent)?;
    let source = Arc::new(RedditPostSource::new(client));

    let state = Arc::new(AppState {
        analyzer: CompetitorAnalyzer::new(config, source),
    });

    let app = Router::new()
        .route("/api/analyze", get(routes::analyze))
        .route("/health", get(routes::health))
        .with_state(state)
        // CORS: any origin, GET only
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET]),
        )
        // Logging layer: method + path only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let host = std::env::var("RIVALSCAN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("RIVALSCAN_PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{host}:{port}");
    info!("Rivalscan API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
