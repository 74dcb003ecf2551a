//! Batch job error types.

use thiserror::Error;

use zosgate::error::NameError;
use zosgate::ClientError;

/// Errors produced by batch job operations.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Job name, dataset name, or path failed validation.
    #[error(transparent)]
    Name(#[from] NameError),

    /// Gateway transport or protocol failure.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The job no longer exists on the gateway.
    #[error("job {jobname}({jobid}) not found")]
    JobNotFound { jobname: String, jobid: String },

    /// Polling gave up before the job left the execution queues.
    #[error("job {jobname}({jobid}) did not complete within {seconds} seconds")]
    PollTimeout {
        jobname: String,
        jobid: String,
        seconds: u64,
    },

    /// The gateway accepted a job action but reported it failed.
    #[error("{action} failed for job {jobname}({jobid}): {message}")]
    ActionFailed {
        action: &'static str,
        jobname: String,
        jobid: String,
        message: String,
    },

    /// Spool output could not be written to the local filesystem.
    #[error("cannot write spool output to {path}: {source}")]
    OutputWrite {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output was requested before the job reached the output queue.
    #[error("job {jobname}({jobid}) has not completed; output is not available")]
    NotComplete { jobname: String, jobid: String },
}
