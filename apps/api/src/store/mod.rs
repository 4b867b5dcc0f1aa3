//! Persistence façade over job descriptions, candidate resumes, and skill analyses.
//!
//! Every operation maps to exactly one insert or one filtered read against the backend.
//! Failures are logged where they happen and returned as a `StoreError` so callers can
//! tell a missing record apart from an unreachable store.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::gap::SkillGapReport;
use crate::config::Config;
use crate::db::{create_lazy_pool, create_pool, run_migrations};
use crate::models::{CandidateResumeRow, JobDescriptionRow, SkillAnalysisRow};

pub mod memory;
pub mod postgres;
pub mod rest;

pub use memory::InMemoryStore;
pub use postgres::PgStore;
pub use rest::RestStore;

/// The three persisted record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    JobDescriptions,
    CandidateResumes,
    SkillAnalyses,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::JobDescriptions => "job_descriptions",
            Table::CandidateResumes => "candidate_resumes",
            Table::SkillAnalyses => "skill_analyses",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{table} record {id} not found")]
    NotFound { table: Table, id: Uuid },

    /// Network failure, timeout, or a 5xx/429 from the backend.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the request (bad payload, auth, constraint violation).
    #[error("store rejected request: {0}")]
    Rejected(String),

    #[error("unexpected store response: {0}")]
    Decode(String),

    /// The record could not be built locally; nothing was sent.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

impl StoreError {
    /// True when retrying the same call could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Persistence backend. Swap implementations without touching the analyzer or handlers.
///
/// Carried as `Arc<dyn SkillStore>`.
#[async_trait]
pub trait SkillStore: Send + Sync {
    async fn save_job_description(
        &self,
        description: &str,
        skills: &[String],
    ) -> Result<Uuid, StoreError>;

    async fn save_candidate_resume(
        &self,
        resume: &str,
        skills: &[String],
    ) -> Result<Uuid, StoreError>;

    async fn save_skill_analysis(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
        analysis: &SkillGapReport,
    ) -> Result<Uuid, StoreError>;

    async fn get_job_description(&self, id: Uuid) -> Result<JobDescriptionRow, StoreError>;

    async fn get_candidate_resume(&self, id: Uuid) -> Result<CandidateResumeRow, StoreError>;

    async fn get_skill_analysis(&self, id: Uuid) -> Result<SkillAnalysisRow, StoreError>;

    fn backend(&self) -> &'static str;
}

/// Builds the store selected by configuration: direct Postgres when `DATABASE_URL` is set,
/// otherwise the hosted REST API.
///
/// The Postgres backend connects eagerly and applies pending migrations, so a bad
/// `DATABASE_URL` fails server startup instead of the first request.
pub async fn connect(config: &Config) -> Result<Arc<dyn SkillStore>> {
    let store: Arc<dyn SkillStore> = match &config.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url).await?;
            run_migrations(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
        None => Arc::new(rest_store(config)?),
    };
    info!("Skill store initialized (backend: {})", store.backend());
    Ok(store)
}

/// Builds the same backend as [`connect`] without touching the network or the schema.
///
/// The Postgres pool connects on its first query. Must be called inside a tokio runtime.
pub fn connect_lazy(config: &Config) -> Result<Arc<dyn SkillStore>> {
    let store: Arc<dyn SkillStore> = match &config.database_url {
        Some(database_url) => Arc::new(PgStore::new(create_lazy_pool(database_url)?)),
        None => Arc::new(rest_store(config)?),
    };
    debug!("Skill store prepared lazily (backend: {})", store.backend());
    Ok(store)
}

fn rest_store(config: &Config) -> Result<RestStore> {
    RestStore::new(&config.supabase_url, &config.supabase_anon_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        assert_eq!(Table::JobDescriptions.as_str(), "job_descriptions");
        assert_eq!(Table::CandidateResumes.as_str(), "candidate_resumes");
        assert_eq!(Table::SkillAnalyses.to_string(), "skill_analyses");
    }

    #[test]
    fn test_only_unavailable_is_transient() {
        let id = Uuid::new_v4();
        assert!(StoreError::Unavailable("timeout".into()).is_transient());
        assert!(!StoreError::NotFound {
            table: Table::JobDescriptions,
            id
        }
        .is_transient());
        assert!(!StoreError::Rejected("401".into()).is_transient());
        assert!(!StoreError::Decode("empty body".into()).is_transient());
        assert!(!StoreError::InvalidRecord("too many skills".into()).is_transient());
    }

    #[test]
    fn test_not_found_message_names_table_and_id() {
        let id = Uuid::nil();
        let err = StoreError::NotFound {
            table: Table::CandidateResumes,
            id,
        };
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            format!("candidate_resumes record {id} not found")
        );
    }

    fn config_with(database_url: Option<&str>) -> Config {
        Config::from_lookup(|key: &str| match key {
            "SUPABASE_URL" => Some("http://127.0.0.1:1".to_string()),
            "SUPABASE_ANON_KEY" => Some("anon-key".to_string()),
            "DATABASE_URL" => database_url.map(str::to_string),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_connect_lazy_with_unreachable_database_still_builds() {
        let config = config_with(Some("postgres://skillgap@127.0.0.1:1/skillgap"));
        let store = connect_lazy(&config).unwrap();
        assert_eq!(store.backend(), "postgres");
    }

    #[tokio::test]
    async fn test_connect_lazy_defaults_to_rest() {
        let store = connect_lazy(&config_with(None)).unwrap();
        assert_eq!(store.backend(), "rest");
    }
}
