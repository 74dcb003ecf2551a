//! RSE API batch gateway — `/rseapi/api/v1/jobs/*`.
//!
//! Endpoint set:
//! - `POST   /rseapi/api/v1/jobs` — submit JCL (JSON `{"jcl": "..."}`)
//! - `GET    /rseapi/api/v1/jobs?prefix=&owner=` — list jobs
//! - `GET    /rseapi/api/v1/jobs/{jobname}/{jobid}` — job status
//! - `GET    /rseapi/api/v1/jobs/{jobname}/{jobid}/files` — spool files
//! - `GET    /rseapi/api/v1/jobs/{jobname}/{jobid}/files/{id}/content` — spool content
//! - `PUT    /rseapi/api/v1/jobs/{jobname}/{jobid}` — cancel (JSON request body)
//! - `DELETE /rseapi/api/v1/jobs/{jobname}/{jobid}` — purge
//!
//! The RSE dialect wraps lists in an `items` envelope and spool content in a
//! `content` field, and reports status strings like HOLD, ACTIVE,
//! COMPLETION, and ABEND.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use zosgate::{RestClient, StatusCode};

use crate::error::BatchError;
use crate::gateway::{BatchGateway, JobInfo, SpoolFileRef};
use crate::status::JobStatus;

/// A job object in RSE API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RseJob {
    pub job_name: String,
    pub job_id: String,
    pub owner: String,
    /// HOLD, ACTIVE, COMPLETION, or ABEND.
    pub status: String,
    #[serde(rename = "type", default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    /// Return code string (e.g. "CC 0000", "ABEND S0C4").
    #[serde(default)]
    pub return_code: Option<String>,
    #[serde(default)]
    pub subsystem: Option<String>,
}

impl RseJob {
    fn into_info(self) -> JobInfo {
        JobInfo {
            status: JobStatus::from_rseapi(&self.status),
            jobname: self.job_name,
            jobid: self.job_id,
            owner: self.owner,
            job_type: self.job_type,
            class: self.class,
            retcode: self.return_code,
        }
    }
}

/// A spool file object in RSE API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RseSpoolFile {
    pub id: u32,
    pub dd_name: String,
    #[serde(default)]
    pub step_name: Option<String>,
    #[serde(default)]
    pub proc_step: Option<String>,
    #[serde(default)]
    pub record_count: Option<u64>,
}

/// The `items` list envelope common to RSE API collection responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RseItems<T> {
    pub items: Vec<T>,
}

/// Spool content envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RseContent {
    pub content: String,
}

/// Submit request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RseSubmitRequest {
    pub jcl: String,
}

/// Job action request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RseJobAction {
    pub request: String,
}

/// The RSE API implementation of [`BatchGateway`].
#[derive(Debug, Clone)]
pub struct RseapiBatch {
    client: RestClient,
}

impl RseapiBatch {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    fn job_path(jobname: &str, jobid: &str) -> String {
        format!("/rseapi/api/v1/jobs/{}/{}", jobname, jobid)
    }
}

#[async_trait]
impl BatchGateway for RseapiBatch {
    async fn submit(&self, jcl: &str) -> Result<JobInfo, BatchError> {
        let body = RseSubmitRequest {
            jcl: jcl.to_string(),
        };
        let response = self
            .client
            .post_json("/rseapi/api/v1/jobs", &body, &[])
            .await?
            .expect(&[StatusCode::CREATED])?;
        let job: RseJob = response.json()?;
        tracing::info!(jobname = %job.job_name, jobid = %job.job_id, "job submitted via RSE API");
        Ok(job.into_info())
    }

    async fn status(&self, jobname: &str, jobid: &str) -> Result<Option<JobInfo>, BatchError> {
        let response = self
            .client
            .get(&Self::job_path(jobname, jobid), &[])
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response.expect(&[StatusCode::OK])?;
        let job: RseJob = response.json()?;
        Ok(Some(job.into_info()))
    }

    async fn list(&self, prefix: &str, owner: &str) -> Result<Vec<JobInfo>, BatchError> {
        let path = format!("/rseapi/api/v1/jobs?prefix={}&owner={}", prefix, owner);
        let response = self.client.get(&path, &[]).await?.expect(&[StatusCode::OK])?;
        let jobs: RseItems<RseJob> = response.json()?;
        Ok(jobs.items.into_iter().map(RseJob::into_info).collect())
    }

    async fn spool_files(
        &self,
        jobname: &str,
        jobid: &str,
    ) -> Result<Vec<SpoolFileRef>, BatchError> {
        let path = format!("{}/files", Self::job_path(jobname, jobid));
        let response = self.client.get(&path, &[]).await?.expect(&[StatusCode::OK])?;
        let files: RseItems<RseSpoolFile> = response.json()?;
        Ok(files
            .items
            .into_iter()
            .map(|f| SpoolFileRef {
                id: f.id,
                ddname: f.dd_name,
                stepname: f.step_name,
                procstep: f.proc_step,
                record_count: f.record_count,
            })
            .collect())
    }

    async fn spool_content(
        &self,
        jobname: &str,
        jobid: &str,
        file: &SpoolFileRef,
    ) -> Result<String, BatchError> {
        let path = format!(
            "{}/files/{}/content",
            Self::job_path(jobname, jobid),
            file.id
        );
        let response = self.client.get(&path, &[]).await?.expect(&[StatusCode::OK])?;
        let content: RseContent = response.json()?;
        Ok(content.content)
    }

    async fn cancel(&self, jobname: &str, jobid: &str) -> Result<(), BatchError> {
        let body = RseJobAction {
            request: "cancel".to_string(),
        };
        self.client
            .put_json(&Self::job_path(jobname, jobid), &body, &[])
            .await?
            .expect(&[StatusCode::OK])?;
        Ok(())
    }

    async fn purge(&self, jobname: &str, jobid: &str) -> Result<(), BatchError> {
        self.client
            .delete(&Self::job_path(jobname, jobid), &[])
            .await?
            .expect(&[StatusCode::NO_CONTENT])?;
        tracing::debug!(jobname, jobid, "job purged via RSE API");
        Ok(())
    }
}
