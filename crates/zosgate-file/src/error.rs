//! File management error types.

use thiserror::Error;

use zosgate::error::NameError;
use zosgate::ClientError;

/// Errors produced by dataset, VSAM, and UNIX file operations.
#[derive(Debug, Error)]
pub enum FileError {
    /// Dataset, member, or path failed validation.
    #[error(transparent)]
    Name(#[from] NameError),

    /// Gateway transport or protocol failure.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Creation was requested for a dataset that already exists.
    #[error("dataset {0} already exists")]
    DatasetExists(String),

    /// The dataset does not exist on the gateway.
    #[error("dataset {0} not found")]
    DatasetNotFound(String),

    /// Creation was requested for a path that already exists.
    #[error("path {0} already exists")]
    UnixExists(String),

    /// The path does not exist on the gateway.
    #[error("path {0} not found")]
    UnixNotFound(String),

    /// A symbolic permission string was not of the `rwxr-xr-x` form.
    #[error("invalid permission string '{0}'")]
    InvalidPermissions(String),

    /// IDCAMS reported a non-zero return code.
    #[error("IDCAMS failed with rc {rc}: {output}")]
    AmsFailed { rc: u32, output: String },

    /// Binary content arrived in a JSON envelope but was not valid base64.
    #[error("content of {0} is not valid base64")]
    InvalidBase64(String),
}
