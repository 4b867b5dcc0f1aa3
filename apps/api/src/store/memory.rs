use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{SkillStore, StoreError, Table};
use crate::analysis::gap::SkillGapReport;
use crate::models::{
    CandidateResumeRow, JobDescriptionRow, NewCandidateResume, NewJobDescription,
    NewSkillAnalysis, SkillAnalysisRow,
};

/// In-process store with the same contract as the remote backends: server-style ids and
/// timestamps, insert-only, `NotFound` for unknown ids.
#[derive(Default)]
pub struct InMemoryStore {
    jobs: RwLock<HashMap<Uuid, JobDescriptionRow>>,
    candidates: RwLock<HashMap<Uuid, CandidateResumeRow>>,
    analyses: RwLock<HashMap<Uuid, SkillAnalysisRow>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn job_count(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn candidate_count(&self) -> usize {
        self.candidates.read().await.len()
    }

    pub async fn analysis_count(&self) -> usize {
        self.analyses.read().await.len()
    }
}

fn lookup<T: Clone>(
    rows: &HashMap<Uuid, T>,
    table: Table,
    id: Uuid,
) -> Result<T, StoreError> {
    rows.get(&id)
        .cloned()
        .ok_or(StoreError::NotFound { table, id })
}

#[async_trait]
impl SkillStore for InMemoryStore {
    async fn save_job_description(
        &self,
        description: &str,
        skills: &[String],
    ) -> Result<Uuid, StoreError> {
        let new = NewJobDescription::new(description, skills)?;
        let id = Uuid::new_v4();
        let row = JobDescriptionRow {
            id,
            description: new.description.to_string(),
            skills: new.skills.to_vec(),
            skill_count: new.skill_count,
            created_at: Utc::now(),
        };
        self.jobs.write().await.insert(id, row);
        Ok(id)
    }

    async fn save_candidate_resume(
        &self,
        resume: &str,
        skills: &[String],
    ) -> Result<Uuid, StoreError> {
        let new = NewCandidateResume::new(resume, skills)?;
        let id = Uuid::new_v4();
        let row = CandidateResumeRow {
            id,
            resume: new.resume.to_string(),
            skills: new.skills.to_vec(),
            skill_count: new.skill_count,
            created_at: Utc::now(),
        };
        self.candidates.write().await.insert(id, row);
        Ok(id)
    }

    async fn save_skill_analysis(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
        analysis: &SkillGapReport,
    ) -> Result<Uuid, StoreError> {
        let new = NewSkillAnalysis::new(job_id, candidate_id, analysis);
        let id = Uuid::new_v4();
        let row = SkillAnalysisRow {
            id,
            job_id: new.job_id,
            candidate_id: new.candidate_id,
            missing_skills: new.missing_skills.to_vec(),
            matching_skills: new.matching_skills.to_vec(),
            gap_percentage: new.gap_percentage,
            match_percentage: new.match_percentage,
            created_at: Utc::now(),
        };
        self.analyses.write().await.insert(id, row);
        Ok(id)
    }

    async fn get_job_description(&self, id: Uuid) -> Result<JobDescriptionRow, StoreError> {
        lookup(&*self.jobs.read().await, Table::JobDescriptions, id)
    }

    async fn get_candidate_resume(&self, id: Uuid) -> Result<CandidateResumeRow, StoreError> {
        lookup(&*self.candidates.read().await, Table::CandidateResumes, id)
    }

    async fn get_skill_analysis(&self, id: Uuid) -> Result<SkillAnalysisRow, StoreError> {
        lookup(&*self.analyses.read().await, Table::SkillAnalyses, id)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
