//! The gateway seam: one trait, one implementation per REST dialect.

use async_trait::async_trait;

use crate::error::BatchError;
use crate::status::JobStatus;

/// Gateway-neutral view of a job.
#[derive(Debug, Clone)]
pub struct JobInfo {
    pub jobname: String,
    pub jobid: String,
    pub owner: String,
    pub status: JobStatus,
    /// JOB, STC, or TSU.
    pub job_type: Option<String>,
    pub class: Option<String>,
    /// Completion code string (e.g. `CC 0000`), `None` until OUTPUT.
    pub retcode: Option<String>,
}

/// Gateway-neutral view of a spool file.
#[derive(Debug, Clone)]
pub struct SpoolFileRef {
    pub id: u32,
    pub ddname: String,
    pub stepname: Option<String>,
    pub procstep: Option<String>,
    pub record_count: Option<u64>,
}

/// Operations every batch gateway dialect provides.
///
/// Implementations translate each call into exactly one REST request and
/// check the status code against the dialect's expected set.
#[async_trait]
pub trait BatchGateway: Send + Sync {
    /// Submit JCL; returns the job as the gateway recorded it.
    async fn submit(&self, jcl: &str) -> Result<JobInfo, BatchError>;

    /// Fetch current job state; `None` when the gateway no longer knows
    /// the job (purged).
    async fn status(&self, jobname: &str, jobid: &str) -> Result<Option<JobInfo>, BatchError>;

    /// List jobs by name prefix and owner (`*` wildcards accepted).
    async fn list(&self, prefix: &str, owner: &str) -> Result<Vec<JobInfo>, BatchError>;

    /// List the job's spool files.
    async fn spool_files(
        &self,
        jobname: &str,
        jobid: &str,
    ) -> Result<Vec<SpoolFileRef>, BatchError>;

    /// Fetch one spool file's records as text.
    async fn spool_content(
        &self,
        jobname: &str,
        jobid: &str,
        file: &SpoolFileRef,
    ) -> Result<String, BatchError>;

    /// Cancel an executing job.
    async fn cancel(&self, jobname: &str, jobid: &str) -> Result<(), BatchError>;

    /// Purge the job and its spool output.
    async fn purge(&self, jobname: &str, jobid: &str) -> Result<(), BatchError>;
}
