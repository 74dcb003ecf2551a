//! The batch manager: submission, lookup, and end-of-run cleanup.

use std::sync::Arc;
use std::time::Duration;

use zosgate::{BatchConfig, RestClient};

use crate::error::BatchError;
use crate::gateway::{BatchGateway, JobInfo};
use crate::jcl::{self, JobCard, Jobname};
use crate::job::BatchJob;
use crate::rseapi::RseapiBatch;
use crate::status::JobStatus;
use crate::zosmf::ZosmfBatch;

/// Batch job manager for one gateway.
///
/// Tracks every job it submits so [`ZosBatch::cleanup`] can purge them at
/// the end of a run.
pub struct ZosBatch {
    gateway: Arc<dyn BatchGateway>,
    config: BatchConfig,
    submitted: Vec<(String, String)>,
}

impl ZosBatch {
    /// Build a manager over any gateway implementation.
    pub fn new(gateway: Arc<dyn BatchGateway>, config: BatchConfig) -> Self {
        Self {
            gateway,
            config,
            submitted: Vec::new(),
        }
    }

    /// Manager over a z/OSMF gateway.
    pub fn zosmf(client: RestClient, config: BatchConfig) -> Self {
        Self::new(Arc::new(ZosmfBatch::new(client)), config)
    }

    /// Manager over an RSE API gateway.
    pub fn rseapi(client: RestClient, config: BatchConfig) -> Self {
        Self::new(Arc::new(RseapiBatch::new(client)), config)
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.config.poll_interval_seconds)
    }

    fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.config.poll_timeout_seconds)
    }

    /// Submit JCL and return a live handle.
    ///
    /// When `jobname` is given, or the JCL has no JOB card of its own, a
    /// card is rendered from the configured account/class settings (with a
    /// generated name if none was supplied) and prepended. JCL that already
    /// carries a card and arrives without an explicit name is submitted
    /// untouched; its card's name is validated first either way.
    pub async fn submit(
        &mut self,
        jcl: &str,
        jobname: Option<Jobname>,
    ) -> Result<BatchJob, BatchError> {
        let body = match jobname {
            Some(name) => {
                let card = JobCard::from_config(&self.config).render(&name);
                jcl::with_job_card(&card, jcl)
            }
            None => match jcl::extract_job_name(jcl) {
                Some(existing) => {
                    Jobname::new(existing)?;
                    jcl.to_string()
                }
                None => {
                    let name = Jobname::generated(&self.config.jobname_prefix)?;
                    let card = JobCard::from_config(&self.config).render(&name);
                    jcl::with_job_card(&card, jcl)
                }
            },
        };

        let info = self.gateway.submit(&body).await?;
        self.submitted
            .push((info.jobname.clone(), info.jobid.clone()));
        Ok(BatchJob::new(
            Arc::clone(&self.gateway),
            info,
            self.poll_interval(),
            self.poll_timeout(),
        ))
    }

    /// Look up an existing job by name and id.
    pub async fn job(&self, jobname: &str, jobid: &str) -> Result<BatchJob, BatchError> {
        let info = self
            .gateway
            .status(jobname, jobid)
            .await?
            .ok_or_else(|| BatchError::JobNotFound {
                jobname: jobname.to_string(),
                jobid: jobid.to_string(),
            })?;
        Ok(BatchJob::new(
            Arc::clone(&self.gateway),
            info,
            self.poll_interval(),
            self.poll_timeout(),
        ))
    }

    /// List jobs by name prefix and owner (`*` wildcards accepted).
    pub async fn list(&self, prefix: &str, owner: &str) -> Result<Vec<JobInfo>, BatchError> {
        self.gateway.list(prefix, owner).await
    }

    /// Jobs submitted through this manager, in submission order.
    pub fn submitted(&self) -> &[(String, String)] {
        &self.submitted
    }

    /// Purge every completed job this manager submitted.
    ///
    /// Jobs already purged out from under the manager are skipped; jobs
    /// still executing are left alone and reported back to the caller.
    pub async fn cleanup(&mut self) -> Result<Vec<(String, String)>, BatchError> {
        let mut remaining = Vec::new();
        for (jobname, jobid) in std::mem::take(&mut self.submitted) {
            match self.gateway.status(&jobname, &jobid).await? {
                None => {
                    tracing::debug!(%jobname, %jobid, "job already purged, skipping");
                }
                Some(info) if info.status == JobStatus::Output => {
                    if let Err(e) = self.gateway.purge(&jobname, &jobid).await {
                        tracing::warn!(%jobname, %jobid, error = %e, "cleanup purge failed");
                        remaining.push((jobname, jobid));
                    }
                }
                Some(info) => {
                    tracing::warn!(%jobname, %jobid, status = %info.status, "job not complete, leaving in place");
                    remaining.push((jobname, jobid));
                }
            }
        }
        self.submitted = remaining.clone();
        Ok(remaining)
    }
}

impl std::fmt::Debug for ZosBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZosBatch")
            .field("submitted", &self.submitted.len())
            .finish()
    }
}
