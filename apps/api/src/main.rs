use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use skillgap::analysis::analyzer::SkillGapAnalyzer;
use skillgap::analysis::extractor::PlaceholderExtractor;
use skillgap::config::Config;
use skillgap::{init_tracing, store};

#[tokio::main]
async fn main() -> Result<()> {
    // Missing store credentials abort here, before anything is printed.
    let config = Config::from_env()?;
    init_tracing(&config);

    // No connection is opened and no migration runs; the banner is the only action.
    let store = store::connect_lazy(&config)?;
    let _analyzer =
        SkillGapAnalyzer::new(store, Arc::new(PlaceholderExtractor), config.denominator);
    info!("skillgap v{} initialized", env!("CARGO_PKG_VERSION"));

    println!("AI Skill Gap Analyzer");
    println!("====================");

    Ok(())
}
