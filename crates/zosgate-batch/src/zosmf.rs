//! z/OSMF batch gateway — `/zosmf/restjobs/jobs/*`.
//!
//! Endpoint set:
//! - `PUT    /zosmf/restjobs/jobs` — submit JCL (text/plain body)
//! - `GET    /zosmf/restjobs/jobs?owner=&prefix=` — list jobs
//! - `GET    /zosmf/restjobs/jobs/{jobname}/{jobid}` — job status
//! - `GET    /zosmf/restjobs/jobs/{jobname}/{jobid}/files` — spool files
//! - `GET    /zosmf/restjobs/jobs/{jobname}/{jobid}/files/{id}/records` — spool content
//! - `PUT    /zosmf/restjobs/jobs/{jobname}/{jobid}` — cancel
//! - `DELETE /zosmf/restjobs/jobs/{jobname}/{jobid}` — purge

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use zosgate::{RestClient, StatusCode};

use crate::error::BatchError;
use crate::gateway::{BatchGateway, JobInfo, SpoolFileRef};
use crate::status::JobStatus;

/// A job entry in z/OSMF submit, list, and status responses.
///
/// z/OSMF returns the same full object for all three.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    /// Job ID (e.g. JOB00042).
    pub jobid: String,
    /// Job name.
    pub jobname: String,
    /// Job owner userid.
    pub owner: String,
    /// Job status: INPUT, ACTIVE, or OUTPUT.
    pub status: String,
    /// Job type (JOB, STC, TSU).
    #[serde(rename = "type", default)]
    pub job_type: Option<String>,
    /// Job class.
    #[serde(default)]
    pub class: Option<String>,
    /// Return code (e.g. "CC 0000"), null while active.
    #[serde(default)]
    pub retcode: Option<String>,
    /// Subsystem (JES2 or JES3).
    #[serde(default)]
    pub subsystem: Option<String>,
    /// Job correlator — unique opaque identifier.
    #[serde(rename = "job-correlator", default)]
    pub job_correlator: Option<String>,
    /// URL to spool files.
    #[serde(rename = "files-url", default, skip_serializing_if = "Option::is_none")]
    pub files_url: Option<String>,
    /// Phase name (e.g. "Job is on the output queue").
    #[serde(rename = "phase-name", default, skip_serializing_if = "Option::is_none")]
    pub phase_name: Option<String>,
}

impl JobResponse {
    fn into_info(self) -> JobInfo {
        JobInfo {
            status: JobStatus::from_zosmf(&self.status),
            jobname: self.jobname,
            jobid: self.jobid,
            owner: self.owner,
            job_type: self.job_type,
            class: self.class,
            retcode: self.retcode,
        }
    }
}

/// A spool file entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpoolFile {
    /// Spool file numeric ID.
    pub id: u32,
    /// DD name.
    pub ddname: String,
    /// Step name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stepname: Option<String>,
    /// Proc step name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procstep: Option<String>,
    /// Record count.
    #[serde(rename = "record-count", default)]
    pub record_count: Option<u64>,
    /// Byte count.
    #[serde(rename = "byte-count", default)]
    pub byte_count: Option<u64>,
}

/// Feedback response for job actions and purge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFeedback {
    pub jobid: String,
    pub jobname: String,
    /// Status code (0 = success).
    pub status: i32,
    pub message: String,
}

/// Job action request body (cancel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobActionRequest {
    pub request: String,
    pub version: String,
}

/// The z/OSMF implementation of [`BatchGateway`].
#[derive(Debug, Clone)]
pub struct ZosmfBatch {
    client: RestClient,
}

impl ZosmfBatch {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    fn job_path(jobname: &str, jobid: &str) -> String {
        format!("/zosmf/restjobs/jobs/{}/{}", jobname, jobid)
    }
}

#[async_trait]
impl BatchGateway for ZosmfBatch {
    async fn submit(&self, jcl: &str) -> Result<JobInfo, BatchError> {
        let response = self
            .client
            .put_text("/zosmf/restjobs/jobs", jcl.to_string(), &[])
            .await?
            .expect(&[StatusCode::CREATED])?;
        let job: JobResponse = response.json()?;
        tracing::info!(jobname = %job.jobname, jobid = %job.jobid, "job submitted via z/OSMF");
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
        let job: JobResponse = response.json()?;
        Ok(Some(job.into_info()))
    }

    async fn list(&self, prefix: &str, owner: &str) -> Result<Vec<JobInfo>, BatchError> {
        let path = format!(
            "/zosmf/restjobs/jobs?owner={}&prefix={}",
            owner, prefix
        );
        let response = self.client.get(&path, &[]).await?.expect(&[StatusCode::OK])?;
        let jobs: Vec<JobResponse> = response.json()?;
        Ok(jobs.into_iter().map(JobResponse::into_info).collect())
    }

    async fn spool_files(
        &self,
        jobname: &str,
        jobid: &str,
    ) -> Result<Vec<SpoolFileRef>, BatchError> {
        let path = format!("{}/files", Self::job_path(jobname, jobid));
        let response = self.client.get(&path, &[]).await?.expect(&[StatusCode::OK])?;
        let files: Vec<SpoolFile> = response.json()?;
        Ok(files
            .into_iter()
            .map(|f| SpoolFileRef {
                id: f.id,
                ddname: f.ddname,
                stepname: f.stepname,
                procstep: f.procstep,
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
            "{}/files/{}/records",
            Self::job_path(jobname, jobid),
            file.id
        );
        let response = self.client.get(&path, &[]).await?.expect(&[StatusCode::OK])?;
        Ok(response.text()?)
    }

    async fn cancel(&self, jobname: &str, jobid: &str) -> Result<(), BatchError> {
        let body = JobActionRequest {
            request: "cancel".to_string(),
            version: "2.0".to_string(),
        };
        let response = self
            .client
            .put_json(&Self::job_path(jobname, jobid), &body, &[])
            .await?
            .expect(&[StatusCode::OK])?;
        let feedback: JobFeedback = response.json()?;
        if feedback.status != 0 {
            return Err(BatchError::ActionFailed {
                action: "cancel",
                jobname: jobname.to_string(),
                jobid: jobid.to_string(),
                message: feedback.message,
            });
        }
        Ok(())
    }

    async fn purge(&self, jobname: &str, jobid: &str) -> Result<(), BatchError> {
        let response = self
            .client
            .delete(&Self::job_path(jobname, jobid), &[])
            .await?
            .expect(&[StatusCode::OK])?;
        let feedback: JobFeedback = response.json()?;
        if feedback.status != 0 {
            return Err(BatchError::ActionFailed {
                action: "purge",
                jobname: jobname.to_string(),
                jobid: jobid.to_string(),
                message: feedback.message,
            });
        }
        tracing::debug!(jobname, jobid, "job purged via z/OSMF");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_response_deserialization() {
        let json = r#"{
            "jobid": "JOB00042",
            "jobname": "PAYROLL",
            "owner": "IBMUSER",
            "status": "OUTPUT",
            "type": "JOB",
            "class": "A",
            "retcode": "CC 0000",
            "subsystem": "JES2",
            "job-correlator": "JOB00042PAYROLLD00000000000000000",
            "files-url": "/zosmf/restjobs/jobs/PAYROLL/JOB00042/files",
            "phase-name": "Job is on the output queue"
        }"#;
        let job: JobResponse = serde_json::from_str(json).unwrap();
        assert_eq!(job.jobid, "JOB00042");
        assert_eq!(job.job_type.as_deref(), Some("JOB"));
        assert_eq!(job.retcode.as_deref(), Some("CC 0000"));

        let info = job.into_info();
        assert_eq!(info.status, JobStatus::Output);
        assert_eq!(info.jobname, "PAYROLL");
    }

    #[test]
    fn test_job_response_minimal_fields() {
        let json = r#"{"jobid":"JOB00001","jobname":"X","owner":"U","status":"ACTIVE"}"#;
        let job: JobResponse = serde_json::from_str(json).unwrap();
        assert!(job.retcode.is_none());
        assert_eq!(job.into_info().status, JobStatus::Active);
    }

    #[test]
    fn test_spool_file_deserialization() {
        let json = r#"{
            "id": 2,
            "ddname": "SYSPRINT",
            "stepname": "STEP1",
            "procstep": null,
            "record-count": 12,
            "byte-count": 480
        }"#;
        let file: SpoolFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.id, 2);
        assert_eq!(file.ddname, "SYSPRINT");
        assert_eq!(file.record_count, Some(12));
    }

    #[test]
    fn test_action_request_serialization() {
        let body = JobActionRequest {
            request: "cancel".to_string(),
            version: "2.0".to_string(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"request":"cancel","version":"2.0"}"#);
    }
}
