use std::sync::Arc;

use crate::analysis::analyzer::SkillGapAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owns the injected store and extractor.
    pub analyzer: Arc<SkillGapAnalyzer>,
    pub config: Config,
}
