//! Live job handles and retrieved output.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::BatchError;
use crate::gateway::{BatchGateway, JobInfo};
use crate::status::JobStatus;

/// A handle to a job known to the gateway.
///
/// Holds the last-seen [`JobInfo`]; `refresh_status` and
/// `wait_for_completion` update it in place.
pub struct BatchJob {
    gateway: Arc<dyn BatchGateway>,
    info: JobInfo,
    poll_interval: Duration,
    poll_timeout: Duration,
}

/// All spool output retrieved for a completed job.
#[derive(Debug, Clone)]
pub struct JobOutput {
    pub jobname: String,
    pub jobid: String,
    pub files: Vec<JobOutputFile>,
}

/// One retrieved spool file.
#[derive(Debug, Clone)]
pub struct JobOutputFile {
    pub id: u32,
    pub ddname: String,
    pub stepname: Option<String>,
    pub procstep: Option<String>,
    pub content: String,
}

impl JobOutput {
    /// Find a spool file by DD name.
    pub fn file(&self, ddname: &str) -> Option<&JobOutputFile> {
        self.files.iter().find(|f| f.ddname == ddname)
    }
}

impl BatchJob {
    pub(crate) fn new(
        gateway: Arc<dyn BatchGateway>,
        info: JobInfo,
        poll_interval: Duration,
        poll_timeout: Duration,
    ) -> Self {
        Self {
            gateway,
            info,
            poll_interval,
            poll_timeout,
        }
    }

    pub fn jobname(&self) -> &str {
        &self.info.jobname
    }

    pub fn jobid(&self) -> &str {
        &self.info.jobid
    }

    pub fn owner(&self) -> &str {
        &self.info.owner
    }

    /// Last-seen status; refresh with [`BatchJob::refresh_status`].
    pub fn status(&self) -> JobStatus {
        self.info.status
    }

    /// Last-seen completion code, `None` until the job reaches OUTPUT.
    pub fn retcode(&self) -> Option<&str> {
        self.info.retcode.as_deref()
    }

    /// Query the gateway and update the cached job state.
    ///
    /// A purged job is not an error here: the status becomes
    /// [`JobStatus::NotFound`] and the rest of the cached state is kept.
    pub async fn refresh_status(&mut self) -> Result<JobStatus, BatchError> {
        match self
            .gateway
            .status(&self.info.jobname, &self.info.jobid)
            .await?
        {
            Some(info) => {
                self.info = info;
            }
            None => {
                self.info.status = JobStatus::NotFound;
            }
        }
        Ok(self.info.status)
    }

    /// Poll until the job completes or the configured timeout elapses.
    pub async fn wait_for_completion(&mut self) -> Result<JobStatus, BatchError> {
        let deadline = Instant::now() + self.poll_timeout;
        loop {
            let status = self.refresh_status().await?;
            if status.is_complete() {
                return Ok(status);
            }
            if Instant::now() + self.poll_interval > deadline {
                return Err(BatchError::PollTimeout {
                    jobname: self.info.jobname.clone(),
                    jobid: self.info.jobid.clone(),
                    seconds: self.poll_timeout.as_secs(),
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Retrieve every spool file of a completed job.
    pub async fn output(&self) -> Result<JobOutput, BatchError> {
        if !self.info.status.is_complete() {
            return Err(BatchError::NotComplete {
                jobname: self.info.jobname.clone(),
                jobid: self.info.jobid.clone(),
            });
        }
        let refs = self
            .gateway
            .spool_files(&self.info.jobname, &self.info.jobid)
            .await?;
        let mut files = Vec::with_capacity(refs.len());
        for spool in refs {
            let content = self
                .gateway
                .spool_content(&self.info.jobname, &self.info.jobid, &spool)
                .await?;
            files.push(JobOutputFile {
                id: spool.id,
                ddname: spool.ddname,
                stepname: spool.stepname,
                procstep: spool.procstep,
                content,
            });
        }
        Ok(JobOutput {
            jobname: self.info.jobname.clone(),
            jobid: self.info.jobid.clone(),
            files,
        })
    }

    /// Cancel the job.
    pub async fn cancel(&mut self) -> Result<(), BatchError> {
        self.gateway
            .cancel(&self.info.jobname, &self.info.jobid)
            .await
    }

    /// Purge the job and its output from the gateway.
    pub async fn purge(&mut self) -> Result<(), BatchError> {
        self.gateway
            .purge(&self.info.jobname, &self.info.jobid)
            .await?;
        self.info.status = JobStatus::NotFound;
        Ok(())
    }

    /// Write the job's spool output under `dir/<jobname>_<jobid>/`,
    /// one file per DD. Returns the created directory.
    pub async fn save_output(&self, dir: &Path) -> Result<PathBuf, BatchError> {
        let output = self.output().await?;
        let job_dir = dir.join(format!("{}_{}", output.jobname, output.jobid));
        tokio::fs::create_dir_all(&job_dir)
            .await
            .map_err(|e| BatchError::OutputWrite {
                path: job_dir.clone(),
                source: e,
            })?;
        for file in &output.files {
            let step = file.stepname.as_deref().unwrap_or("JES");
            let name = format!("{}_{}.txt", step, file.ddname);
            let path = job_dir.join(&name);
            tokio::fs::write(&path, &file.content)
                .await
                .map_err(|e| BatchError::OutputWrite { path, source: e })?;
        }
        tracing::info!(jobname = %output.jobname, jobid = %output.jobid, dir = %job_dir.display(), files = output.files.len(), "spool output saved");
        Ok(job_dir)
    }
}

impl std::fmt::Debug for BatchJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchJob")
            .field("jobname", &self.info.jobname)
            .field("jobid", &self.info.jobid)
            .field("status", &self.info.status)
            .finish()
    }
}
