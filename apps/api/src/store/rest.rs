//! Hosted store backend — a PostgREST-style API (`{url}/rest/v1/{table}`).
//!
//! Inserts ask for `Prefer: return=representation` and read the server-assigned id off the
//! returned row. Lookups filter with `id=eq.{id}`. No retries: one HTTP round trip per call.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::{SkillStore, StoreError, Table};
use crate::analysis::gap::SkillGapReport;
use crate::models::{
    CandidateResumeRow, JobDescriptionRow, NewCandidateResume, NewJobDescription,
    NewSkillAnalysis, SkillAnalysisRow,
};

const REST_PATH: &str = "rest/v1";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/{}/{}", self.base_url, REST_PATH, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Issues one INSERT and returns the stored row.
    async fn insert<T, R>(&self, table: Table, row: &T) -> Result<R, StoreError>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        let request = self
            .authorized(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(row);

        let rows: Vec<R> = send(table, request).await?;
        rows.into_iter().next().ok_or_else(|| {
            error!(%table, "Insert returned no rows");
            StoreError::Decode(format!("insert into {table} returned no rows"))
        })
    }

    /// Issues one filtered SELECT by id.
    async fn fetch<R>(&self, table: Table, id: Uuid) -> Result<R, StoreError>
    where
        R: DeserializeOwned,
    {
        let request = self
            .authorized(self.client.get(self.table_url(table)))
            .query(&[("id", format!("eq.{id}")), ("select", "*".to_string())]);

        let rows: Vec<R> = send(table, request).await?;
        match rows.into_iter().next() {
            Some(row) => Ok(row),
            None => {
                debug!(%table, %id, "No record found");
                Err(StoreError::NotFound { table, id })
            }
        }
    }
}

/// Sends the request and decodes a JSON array of rows, classifying failures.
async fn send<R: DeserializeOwned>(
    table: Table,
    request: RequestBuilder,
) -> Result<Vec<R>, StoreError> {
    let response = request.send().await.map_err(|e| {
        error!(%table, "Store request failed: {e}");
        StoreError::Unavailable(e.to_string())
    })?;

    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        let body = response.text().await.unwrap_or_default();
        error!(%table, "Store returned {status}: {body}");
        return Err(StoreError::Unavailable(format!("{status}: {body}")));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(%table, "Store rejected request with {status}: {body}");
        return Err(StoreError::Rejected(format!("{status}: {body}")));
    }

    response.json::<Vec<R>>().await.map_err(|e| {
        error!(%table, "Failed to decode store response: {e}");
        StoreError::Decode(e.to_string())
    })
}

#[async_trait]
impl SkillStore for RestStore {
    async fn save_job_description(
        &self,
        description: &str,
        skills: &[String],
    ) -> Result<Uuid, StoreError> {
        let row: JobDescriptionRow = self
            .insert(
                Table::JobDescriptions,
                &NewJobDescription::new(description, skills)?,
            )
            .await?;
        Ok(row.id)
    }

    async fn save_candidate_resume(
        &self,
        resume: &str,
        skills: &[String],
    ) -> Result<Uuid, StoreError> {
        let row: CandidateResumeRow = self
            .insert(
                Table::CandidateResumes,
                &NewCandidateResume::new(resume, skills)?,
            )
            .await?;
        Ok(row.id)
    }

    async fn save_skill_analysis(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
        analysis: &SkillGapReport,
    ) -> Result<Uuid, StoreError> {
        let row: SkillAnalysisRow = self
            .insert(
                Table::SkillAnalyses,
                &NewSkillAnalysis::new(job_id, candidate_id, analysis),
            )
            .await?;
        Ok(row.id)
    }

    async fn get_job_description(&self, id: Uuid) -> Result<JobDescriptionRow, StoreError> {
        self.fetch(Table::JobDescriptions, id).await
    }

    async fn get_candidate_resume(&self, id: Uuid) -> Result<CandidateResumeRow, StoreError> {
        self.fetch(Table::CandidateResumes, id).await
    }

    async fn get_skill_analysis(&self, id: Uuid) -> Result<SkillAnalysisRow, StoreError> {
        self.fetch(Table::SkillAnalyses, id).await
    }

    fn backend(&self) -> &'static str {
        "rest"
    }
}
