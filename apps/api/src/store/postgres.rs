use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error};
use uuid::Uuid;

use super::{SkillStore, StoreError, Table};
use crate::analysis::gap::SkillGapReport;
use crate::models::{
    CandidateResumeRow, JobDescriptionRow, NewCandidateResume, NewJobDescription,
    NewSkillAnalysis, SkillAnalysisRow,
};

/// Direct Postgres backend over the same three tables the hosted API exposes.
/// Insert-only: rows are never updated or deleted.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a driver error onto the store taxonomy, logging it with the table it concerned.
fn classify(table: Table, e: sqlx::Error) -> StoreError {
    error!(%table, "Database error: {e}");
    match e {
        sqlx::Error::Database(db) => StoreError::Rejected(db.to_string()),
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::Decode(_)
        | sqlx::Error::TypeNotFound { .. } => StoreError::Decode(e.to_string()),
        other => StoreError::Unavailable(other.to_string()),
    }
}

fn found<T>(table: Table, id: Uuid, row: Option<T>) -> Result<T, StoreError> {
    row.ok_or_else(|| {
        debug!(%table, %id, "No record found");
        StoreError::NotFound { table, id }
    })
}

#[async_trait]
impl SkillStore for PgStore {
    async fn save_job_description(
        &self,
        description: &str,
        skills: &[String],
    ) -> Result<Uuid, StoreError> {
        let row = NewJobDescription::new(description, skills)?;
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO job_descriptions (description, skills, skill_count)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(row.description)
        .bind(row.skills)
        .bind(row.skill_count)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(Table::JobDescriptions, e))
    }

    async fn save_candidate_resume(
        &self,
        resume: &str,
        skills: &[String],
    ) -> Result<Uuid, StoreError> {
        let row = NewCandidateResume::new(resume, skills)?;
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO candidate_resumes (resume, skills, skill_count)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(row.resume)
        .bind(row.skills)
        .bind(row.skill_count)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(Table::CandidateResumes, e))
    }

    async fn save_skill_analysis(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
        analysis: &SkillGapReport,
    ) -> Result<Uuid, StoreError> {
        let row = NewSkillAnalysis::new(job_id, candidate_id, analysis);
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO skill_analyses
                (job_id, candidate_id, missing_skills, matching_skills,
                 gap_percentage, match_percentage)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(row.job_id)
        .bind(row.candidate_id)
        .bind(row.missing_skills)
        .bind(row.matching_skills)
        .bind(row.gap_percentage)
        .bind(row.match_percentage)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(Table::SkillAnalyses, e))
    }

    async fn get_job_description(&self, id: Uuid) -> Result<JobDescriptionRow, StoreError> {
        let row = sqlx::query_as::<_, JobDescriptionRow>(
            "SELECT * FROM job_descriptions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(Table::JobDescriptions, e))?;
        found(Table::JobDescriptions, id, row)
    }

    async fn get_candidate_resume(&self, id: Uuid) -> Result<CandidateResumeRow, StoreError> {
        let row = sqlx::query_as::<_, CandidateResumeRow>(
            "SELECT * FROM candidate_resumes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(Table::CandidateResumes, e))?;
        found(Table::CandidateResumes, id, row)
    }

    async fn get_skill_analysis(&self, id: Uuid) -> Result<SkillAnalysisRow, StoreError> {
        let row = sqlx::query_as::<_, SkillAnalysisRow>(
            "SELECT * FROM skill_analyses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(Table::SkillAnalyses, e))?;
        found(Table::SkillAnalyses, id, row)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
