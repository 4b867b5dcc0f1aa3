//! Skill gap analyzer — ties extraction, gap analysis, and persistence together.
//!
//! Dependencies are injected: the analyzer never builds its own store or extractor.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::extractor::{ExtractionError, SkillExtractor};
use crate::analysis::gap::{analyze_skill_gap, DenominatorPolicy, SkillGapReport};
use crate::errors::AppError;
use crate::store::SkillStore;

/// Outcome of processing a job description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedJob {
    pub job_id: Uuid,
    pub extracted_skills: Vec<String>,
    pub skill_count: usize,
}

/// Outcome of processing a resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedResume {
    pub candidate_id: Uuid,
    pub extracted_skills: Vec<String>,
    pub skill_count: usize,
}

/// A gap report that has been persisted as a skill analysis record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAnalysis {
    pub analysis_id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    #[serde(flatten)]
    pub report: SkillGapReport,
}

pub struct SkillGapAnalyzer {
    store: Arc<dyn SkillStore>,
    extractor: Arc<dyn SkillExtractor>,
    policy: DenominatorPolicy,
}

impl SkillGapAnalyzer {
    pub fn new(
        store: Arc<dyn SkillStore>,
        extractor: Arc<dyn SkillExtractor>,
        policy: DenominatorPolicy,
    ) -> Self {
        info!(
            "Skill gap analyzer ready (store: {}, extractor: {}, denominator: {})",
            store.backend(),
            extractor.backend(),
            policy
        );
        Self {
            store,
            extractor,
            policy,
        }
    }

    pub fn store(&self) -> &dyn SkillStore {
        self.store.as_ref()
    }

    pub fn policy(&self) -> DenominatorPolicy {
        self.policy
    }

    pub async fn extract_skills(&self, text: &str) -> Result<Vec<String>, ExtractionError> {
        let skills = self.extractor.extract(text).await?;
        debug!(
            "Extracted {} skills from {} chars via {}",
            skills.len(),
            text.len(),
            self.extractor.backend()
        );
        Ok(skills)
    }

    pub fn analyze_skill_gap<J, C>(
        &self,
        job_skills: &[J],
        candidate_skills: &[C],
    ) -> SkillGapReport
    where
        J: AsRef<str>,
        C: AsRef<str>,
    {
        analyze_skill_gap(job_skills, candidate_skills, self.policy)
    }

    /// Extracts skills from a job description and stores both.
    pub async fn process_job_description(
        &self,
        description: &str,
    ) -> Result<ProcessedJob, AppError> {
        let skills = self.extract_skills(description).await?;
        let job_id = self.store.save_job_description(description, &skills).await?;
        info!("Stored job description {job_id} with {} skills", skills.len());

        Ok(ProcessedJob {
            job_id,
            skill_count: skills.len(),
            extracted_skills: skills,
        })
    }

    /// Extracts skills from a resume and stores both.
    pub async fn process_resume(&self, resume: &str) -> Result<ProcessedResume, AppError> {
        let skills = self.extract_skills(resume).await?;
        let candidate_id = self.store.save_candidate_resume(resume, &skills).await?;
        info!("Stored candidate resume {candidate_id} with {} skills", skills.len());

        Ok(ProcessedResume {
            candidate_id,
            skill_count: skills.len(),
            extracted_skills: skills,
        })
    }

    /// Loads a stored job and candidate, compares their skills, and stores the result.
    pub async fn analyze_stored(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
    ) -> Result<StoredAnalysis, AppError> {
        let job = self.store.get_job_description(job_id).await?;
        let candidate = self.store.get_candidate_resume(candidate_id).await?;

        let report = self.analyze_skill_gap(job.skills.as_slice(), candidate.skills.as_slice());
        let analysis_id = self
            .store
            .save_skill_analysis(job_id, candidate_id, &report)
            .await?;
        info!(
            "Stored skill analysis {analysis_id} (job {job_id}, candidate {candidate_id}): \
             match {:.1}%",
            report.match_percentage
        );

        Ok(StoredAnalysis {
            analysis_id,
            job_id,
            candidate_id,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::analysis::extractor::PlaceholderExtractor;
    use crate::models::{CandidateResumeRow, JobDescriptionRow, SkillAnalysisRow};
    use crate::store::{InMemoryStore, StoreError};

    /// Returns a fixed skill list for text containing "job", another for everything else.
    struct FixedExtractor;

    #[async_trait]
    impl SkillExtractor for FixedExtractor {
        async fn extract(&self, text: &str) -> Result<Vec<String>, ExtractionError> {
            let skills: &[&str] = if text.contains("job") {
                &["Python", "SQL", "Docker"]
            } else {
                &["Python", "Docker"]
            };
            Ok(skills.iter().map(|s| s.to_string()).collect())
        }

        fn backend(&self) -> &'static str {
            "fixed"
        }
    }

    struct BrokenExtractor;

    #[async_trait]
    impl SkillExtractor for BrokenExtractor {
        async fn extract(&self, _: &str) -> Result<Vec<String>, ExtractionError> {
            Err(ExtractionError::Backend("model unavailable".into()))
        }

        fn backend(&self) -> &'static str {
            "broken"
        }
    }

    /// Store double whose every call fails as if the network were down.
    struct DownStore;

    #[async_trait]
    impl SkillStore for DownStore {
        async fn save_job_description(&self, _: &str, _: &[String]) -> Result<Uuid, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn save_candidate_resume(&self, _: &str, _: &[String]) -> Result<Uuid, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn save_skill_analysis(
            &self,
            _: Uuid,
            _: Uuid,
            _: &SkillGapReport,
        ) -> Result<Uuid, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn get_job_description(&self, _: Uuid) -> Result<JobDescriptionRow, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn get_candidate_resume(&self, _: Uuid) -> Result<CandidateResumeRow, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn get_skill_analysis(&self, _: Uuid) -> Result<SkillAnalysisRow, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        fn backend(&self) -> &'static str {
            "down"
        }
    }

    fn analyzer_with(
        extractor: Arc<dyn SkillExtractor>,
    ) -> (Arc<InMemoryStore>, SkillGapAnalyzer) {
        let store = Arc::new(InMemoryStore::new());
        let analyzer = SkillGapAnalyzer::new(store.clone(), extractor, DenominatorPolicy::Raw);
        (store, analyzer)
    }

    #[tokio::test]
    async fn test_process_job_with_placeholder_stores_empty_skills() {
        let (store, analyzer) = analyzer_with(Arc::new(PlaceholderExtractor));
        let processed = analyzer
            .process_job_description("Senior Rust engineer, Kafka required")
            .await
            .unwrap();

        assert!(processed.extracted_skills.is_empty());
        assert_eq!(processed.skill_count, 0);

        let row = store.get_job_description(processed.job_id).await.unwrap();
        assert_eq!(row.description, "Senior Rust engineer, Kafka required");
        assert_eq!(row.skill_count, 0);
    }

    #[tokio::test]
    async fn test_process_resume_stores_extracted_skills() {
        let (store, analyzer) = analyzer_with(Arc::new(FixedExtractor));
        let processed = analyzer.process_resume("my resume").await.unwrap();

        assert_eq!(processed.extracted_skills, vec!["Python", "Docker"]);
        assert_eq!(processed.skill_count, 2);
        let row = store.get_candidate_resume(processed.candidate_id).await.unwrap();
        assert_eq!(row.skills, vec!["Python", "Docker"]);
        assert_eq!(row.skill_count, 2);
    }

    #[tokio::test]
    async fn test_processing_same_text_twice_is_not_idempotent() {
        let (store, analyzer) = analyzer_with(Arc::new(PlaceholderExtractor));
        let first = analyzer.process_job_description("same").await.unwrap();
        let second = analyzer.process_job_description("same").await.unwrap();
        assert_ne!(first.job_id, second.job_id);
        assert_eq!(store.job_count().await, 2);
    }

    #[tokio::test]
    async fn test_analyze_stored_persists_report() {
        let (store, analyzer) = analyzer_with(Arc::new(FixedExtractor));
        let job = analyzer.process_job_description("job posting").await.unwrap();
        let candidate = analyzer.process_resume("resume").await.unwrap();

        let stored = analyzer
            .analyze_stored(job.job_id, candidate.candidate_id)
            .await
            .unwrap();

        assert_eq!(stored.report.missing_skills, vec!["SQL"]);
        assert_eq!(stored.report.matching_skills, vec!["Python", "Docker"]);
        assert!((stored.report.gap_percentage - 100.0 / 3.0).abs() < 1e-9);

        let row = store.get_skill_analysis(stored.analysis_id).await.unwrap();
        assert_eq!(row.job_id, job.job_id);
        assert_eq!(row.candidate_id, candidate.candidate_id);
        assert_eq!(row.report(), stored.report);
    }

    #[tokio::test]
    async fn test_analyze_stored_unknown_job_is_not_found() {
        let (store, analyzer) = analyzer_with(Arc::new(FixedExtractor));
        let candidate = analyzer.process_resume("resume").await.unwrap();

        let err = analyzer
            .analyze_stored(Uuid::new_v4(), candidate.candidate_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Store(ref e) if e.is_not_found()));
        assert_eq!(store.analysis_count().await, 0);
    }

    #[tokio::test]
    async fn test_unavailable_store_is_distinguishable_from_missing() {
        let analyzer = SkillGapAnalyzer::new(
            Arc::new(DownStore),
            Arc::new(PlaceholderExtractor),
            DenominatorPolicy::Raw,
        );

        let err = analyzer.process_resume("cv").await.unwrap_err();
        assert!(matches!(err, AppError::Store(ref e) if e.is_transient()));

        let err = analyzer
            .analyze_stored(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Store(ref e) if e.is_transient() && !e.is_not_found()));
    }

    #[test]
    fn test_analyze_uses_configured_policy() {
        let store = Arc::new(InMemoryStore::new());
        let analyzer = SkillGapAnalyzer::new(
            store,
            Arc::new(PlaceholderExtractor),
            DenominatorPolicy::Distinct,
        );
        let report = analyzer.analyze_skill_gap(&["Go", "Go", "Rust"], &["Go"]);
        assert_eq!(report.match_percentage, 50.0);
        assert_eq!(analyzer.policy(), DenominatorPolicy::Distinct);
    }

    #[tokio::test]
    async fn test_extract_skills_delegates_to_extractor() {
        let (_, analyzer) = analyzer_with(Arc::new(PlaceholderExtractor));
        assert!(analyzer.extract_skills("anything").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_extraction_failure_stores_nothing() {
        let (store, analyzer) = analyzer_with(Arc::new(BrokenExtractor));

        let err = analyzer.process_job_description("job posting").await.unwrap_err();
        assert!(matches!(err, AppError::Extraction(ExtractionError::Backend(_))));
        let err = analyzer.process_resume("resume").await.unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));

        assert_eq!(store.job_count().await, 0);
        assert_eq!(store.candidate_count().await, 0);
    }
}
