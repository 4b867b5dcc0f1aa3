use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::analysis::gap::SkillGapReport;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillAnalysisRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub missing_skills: Vec<String>,
    pub matching_skills: Vec<String>,
    pub gap_percentage: f64,
    pub match_percentage: f64,
    pub created_at: DateTime<Utc>,
}

impl SkillAnalysisRow {
    pub fn report(&self) -> SkillGapReport {
        SkillGapReport {
            missing_skills: self.missing_skills.clone(),
            matching_skills: self.matching_skills.clone(),
            gap_percentage: self.gap_percentage,
            match_percentage: self.match_percentage,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSkillAnalysis<'a> {
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub missing_skills: &'a [String],
    pub matching_skills: &'a [String],
    pub gap_percentage: f64,
    pub match_percentage: f64,
}

impl<'a> NewSkillAnalysis<'a> {
    pub fn new(job_id: Uuid, candidate_id: Uuid, report: &'a SkillGapReport) -> Self {
        Self {
            job_id,
            candidate_id,
            missing_skills: &report.missing_skills,
            matching_skills: &report.matching_skills,
            gap_percentage: report.gap_percentage,
            match_percentage: report.match_percentage,
        }
    }
}
