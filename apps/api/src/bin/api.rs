use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use skillgap::analysis::analyzer::SkillGapAnalyzer;
use skillgap::analysis::extractor::PlaceholderExtractor;
use skillgap::config::Config;
use skillgap::routes::build_router;
use skillgap::state::AppState;
use skillgap::{init_tracing, store};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing store credentials)
    let config = Config::from_env()?;
    init_tracing(&config);

    info!("Starting Skill Gap API v{}", env!("CARGO_PKG_VERSION"));

    // Connects eagerly and applies pending migrations on the Postgres backend
    let store = store::connect(&config).await?;

    // Extraction is a placeholder until a real backend implements SkillExtractor
    let analyzer =
        SkillGapAnalyzer::new(store, Arc::new(PlaceholderExtractor), config.denominator);

    let state = AppState {
        analyzer: Arc::new(analyzer),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
