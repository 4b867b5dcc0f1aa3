//! Skill extraction — pluggable, trait-based capability that turns raw text into skills.
//!
//! Default: `PlaceholderExtractor`, which extracts nothing. A real NLP backend implements
//! `SkillExtractor` and is handed to the analyzer at startup; nothing else changes.

use async_trait::async_trait;
use thiserror::Error;

/// Failure inside an extraction backend. Converts into `AppError` at the HTTP layer.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("extraction backend failed: {0}")]
    Backend(String),
}

/// Extracts skill names from a job description or resume.
///
/// Carried by `SkillGapAnalyzer` as `Arc<dyn SkillExtractor>`.
#[async_trait]
pub trait SkillExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<Vec<String>, ExtractionError>;

    /// Short label for logs.
    fn backend(&self) -> &'static str;
}

/// Extraction backend that always returns an empty list.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderExtractor;

#[async_trait]
impl SkillExtractor for PlaceholderExtractor {
    async fn extract(&self, _text: &str) -> Result<Vec<String>, ExtractionError> {
        Ok(Vec::new())
    }

    fn backend(&self) -> &'static str {
        "placeholder"
    }
}
