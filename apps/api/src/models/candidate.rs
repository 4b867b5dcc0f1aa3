use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::skill_count;
use crate::store::{StoreError, Table};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateResumeRow {
    pub id: Uuid,
    pub resume: String,
    pub skills: Vec<String>,
    pub skill_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Insert payload. `skill_count` is always derived from `skills` and must fit the
/// `INTEGER` column.
#[derive(Debug, Clone, Serialize)]
pub struct NewCandidateResume<'a> {
    pub resume: &'a str,
    pub skills: &'a [String],
    pub skill_count: i32,
}

impl<'a> NewCandidateResume<'a> {
    pub fn new(resume: &'a str, skills: &'a [String]) -> Result<Self, StoreError> {
        Ok(Self {
            resume,
            skills,
            skill_count: skill_count(Table::CandidateResumes, skills.len())?,
        })
    }
}
