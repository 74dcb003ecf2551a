//! Job lifecycle status as reported by the gateways.

use std::fmt;

/// Where a job is in its lifecycle.
///
/// Both gateways reduce to the three JES2 queues; `NotFound` covers jobs
/// purged out from under a handle, and `Unknown` any status string a newer
/// gateway release might add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    /// On the input queue (includes held jobs).
    Input,
    /// Executing.
    Active,
    /// Finished; output is on the spool.
    Output,
    /// The gateway no longer knows the job.
    NotFound,
    /// Unrecognized status string.
    Unknown,
}

impl JobStatus {
    /// Map a z/OSMF status string (INPUT, ACTIVE, OUTPUT).
    pub fn from_zosmf(status: &str) -> Self {
        match status.to_uppercase().as_str() {
            "INPUT" => JobStatus::Input,
            "ACTIVE" => JobStatus::Active,
            "OUTPUT" => JobStatus::Output,
            _ => JobStatus::Unknown,
        }
    }

    /// Map an RSE API status string (HOLD, ACTIVE, COMPLETION, ABEND).
    pub fn from_rseapi(status: &str) -> Self {
        match status.to_uppercase().as_str() {
            "HOLD" | "INPUT" => JobStatus::Input,
            "ACTIVE" => JobStatus::Active,
            "COMPLETION" | "ABEND" | "OUTPUT" => JobStatus::Output,
            "NOT_FOUND" => JobStatus::NotFound,
            _ => JobStatus::Unknown,
        }
    }

    /// Whether polling can stop: the job finished or disappeared.
    pub fn is_complete(&self) -> bool {
        matches!(self, JobStatus::Output | JobStatus::NotFound)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::Input => "INPUT",
            JobStatus::Active => "ACTIVE",
            JobStatus::Output => "OUTPUT",
            JobStatus::NotFound => "NOTFOUND",
            JobStatus::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}
