//! The gateway seam for file operations.

use async_trait::async_trait;

use crate::attrs::DatasetAttributes;
use crate::error::FileError;

/// Catalog information for one dataset.
#[derive(Debug, Clone)]
pub struct DatasetInfo {
    pub name: String,
    /// PS, PO, or VS.
    pub org: Option<String>,
    pub recfm: Option<String>,
    pub lrecl: Option<u32>,
    pub blksize: Option<u32>,
    pub volume: Option<String>,
}

/// Kind of a UNIX directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnixFileType {
    File,
    Directory,
    Symlink,
    Unknown,
}

/// One entry of a UNIX directory listing.
#[derive(Debug, Clone)]
pub struct UnixDirEntry {
    pub name: String,
    pub file_type: UnixFileType,
    pub size: u64,
    /// Symbolic permissions, `rwxr-xr-x` form.
    pub permissions: String,
    pub user: String,
    pub group: String,
}

/// Result of an IDCAMS (Access Method Services) execution.
#[derive(Debug, Clone)]
pub struct AmsOutput {
    pub return_code: u32,
    pub output: String,
}

/// Operations every file gateway dialect provides.
///
/// Dataset names may carry a `(MEMBER)` suffix for content operations.
/// Every call translates into exactly one REST request.
#[async_trait]
pub trait FileGateway: Send + Sync {
    /// List catalog entries matching a filter (`HLQ.*` patterns accepted).
    async fn dataset_list(&self, filter: &str) -> Result<Vec<DatasetInfo>, FileError>;

    /// Allocate a new dataset.
    async fn dataset_create(
        &self,
        name: &str,
        attrs: &DatasetAttributes,
    ) -> Result<(), FileError>;

    /// Delete a dataset (or a member when the name carries one).
    async fn dataset_delete(&self, name: &str) -> Result<(), FileError>;

    /// Read dataset or member content.
    async fn dataset_read(&self, name: &str, binary: bool) -> Result<Vec<u8>, FileError>;

    /// Write dataset or member content.
    async fn dataset_write(&self, name: &str, data: &[u8], binary: bool)
        -> Result<(), FileError>;

    /// List the members of a partitioned dataset.
    async fn member_list(&self, name: &str) -> Result<Vec<String>, FileError>;

    /// List a UNIX directory.
    async fn unix_list(&self, path: &str) -> Result<Vec<UnixDirEntry>, FileError>;

    /// Create a UNIX file or directory with an optional symbolic mode.
    async fn unix_create(
        &self,
        path: &str,
        file_type: UnixFileType,
        mode: Option<&str>,
    ) -> Result<(), FileError>;

    /// Delete a UNIX file or directory.
    async fn unix_delete(&self, path: &str, recursive: bool) -> Result<(), FileError>;

    /// Read UNIX file content.
    async fn unix_read(&self, path: &str, binary: bool) -> Result<Vec<u8>, FileError>;

    /// Write UNIX file content.
    async fn unix_write(&self, path: &str, data: &[u8], binary: bool) -> Result<(), FileError>;

    /// Change a path's permissions (symbolic mode).
    async fn unix_chmod(&self, path: &str, mode: &str) -> Result<(), FileError>;

    /// Change a path's owner and optionally group.
    async fn unix_chown(
        &self,
        path: &str,
        owner: &str,
        group: Option<&str>,
    ) -> Result<(), FileError>;

    /// Execute IDCAMS statements.
    async fn ams(&self, input: &[String]) -> Result<AmsOutput, FileError>;
}
