//! UNIX file and directory handles.

use std::sync::Arc;

use zosgate::names::validate_unix_path;

use crate::error::FileError;
use crate::gateway::{FileGateway, UnixDirEntry, UnixFileType};

/// Attributes of a UNIX file or directory.
#[derive(Debug, Clone)]
pub struct UnixAttributes {
    pub path: String,
    pub file_type: UnixFileType,
    pub size: u64,
    /// Symbolic permissions, `rwxr-xr-x` form.
    pub permissions: String,
    pub user: String,
    pub group: String,
}

/// A handle to one UNIX path on a gateway.
///
/// Paths must be absolute; that is checked once when the handle is built.
#[derive(Clone)]
pub struct UnixFile {
    gateway: Arc<dyn FileGateway>,
    path: String,
}

/// Split an absolute path into parent directory and entry name.
fn split_path(path: &str) -> (String, String) {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => ("/".to_string(), trimmed[1..].to_string()),
        Some(pos) => (trimmed[..pos].to_string(), trimmed[pos + 1..].to_string()),
        None => ("/".to_string(), trimmed.to_string()),
    }
}

/// Check a symbolic permission string (`rwxr-xr-x`).
pub(crate) fn validate_symbolic(mode: &str) -> Result<(), FileError> {
    let chars: Vec<char> = mode.chars().collect();
    if chars.len() != 9 {
        return Err(FileError::InvalidPermissions(mode.to_string()));
    }
    for (i, &c) in chars.iter().enumerate() {
        let expected = ['r', 'w', 'x'][i % 3];
        if c != expected && c != '-' {
            return Err(FileError::InvalidPermissions(mode.to_string()));
        }
    }
    Ok(())
}

impl UnixFile {
    pub(crate) fn new(gateway: Arc<dyn FileGateway>, path: &str) -> Result<Self, FileError> {
        validate_unix_path(path)?;
        Ok(Self {
            gateway,
            path: path.to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Create this path as a regular file; fails if it already exists.
    pub async fn create_file(&self, mode: Option<&str>) -> Result<(), FileError> {
        if let Some(mode) = mode {
            validate_symbolic(mode)?;
        }
        if self.exists().await? {
            return Err(FileError::UnixExists(self.path.clone()));
        }
        self.gateway
            .unix_create(&self.path, UnixFileType::File, mode)
            .await
    }

    /// Create this path as a directory; fails if it already exists.
    pub async fn create_directory(&self, mode: Option<&str>) -> Result<(), FileError> {
        if let Some(mode) = mode {
            validate_symbolic(mode)?;
        }
        if self.exists().await? {
            return Err(FileError::UnixExists(self.path.clone()));
        }
        self.gateway
            .unix_create(&self.path, UnixFileType::Directory, mode)
            .await
    }

    /// Whether the path exists, determined from the parent listing.
    pub async fn exists(&self) -> Result<bool, FileError> {
        Ok(self.attributes().await?.is_some())
    }

    /// Attributes from the parent directory listing, `None` when absent.
    pub async fn attributes(&self) -> Result<Option<UnixAttributes>, FileError> {
        if self.path == "/" {
            return Ok(Some(UnixAttributes {
                path: "/".to_string(),
                file_type: UnixFileType::Directory,
                size: 0,
                permissions: "rwxr-xr-x".to_string(),
                user: String::new(),
                group: String::new(),
            }));
        }
        let (parent, name) = split_path(&self.path);
        let entries = match self.gateway.unix_list(&parent).await {
            Ok(entries) => entries,
            Err(FileError::UnixNotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        Ok(entries.into_iter().find(|e| e.name == name).map(|e| {
            UnixAttributes {
                path: self.path.clone(),
                file_type: e.file_type,
                size: e.size,
                permissions: e.permissions,
                user: e.user,
                group: e.group,
            }
        }))
    }

    /// Delete a file or empty directory.
    pub async fn delete(&self) -> Result<(), FileError> {
        self.gateway.unix_delete(&self.path, false).await
    }

    /// Delete a directory and everything under it.
    pub async fn delete_recursive(&self) -> Result<(), FileError> {
        self.gateway.unix_delete(&self.path, true).await
    }

    /// Write text content.
    pub async fn store_text(&self, content: &str) -> Result<(), FileError> {
        self.gateway
            .unix_write(&self.path, content.as_bytes(), false)
            .await
    }

    /// Write binary content.
    pub async fn store_binary(&self, data: &[u8]) -> Result<(), FileError> {
        self.gateway.unix_write(&self.path, data, true).await
    }

    /// Read text content.
    pub async fn retrieve_text(&self) -> Result<String, FileError> {
        let bytes = self.gateway.unix_read(&self.path, false).await?;
        Ok(String::from_utf8_lossy(&bytes).to_string())
    }

    /// Read binary content.
    pub async fn retrieve_binary(&self) -> Result<Vec<u8>, FileError> {
        self.gateway.unix_read(&self.path, true).await
    }

    /// List this directory.
    pub async fn list_directory(&self) -> Result<Vec<UnixDirEntry>, FileError> {
        self.gateway.unix_list(&self.path).await
    }

    /// Change permissions (symbolic mode, `rwxr-xr-x`).
    pub async fn chmod(&self, mode: &str) -> Result<(), FileError> {
        validate_symbolic(mode)?;
        self.gateway.unix_chmod(&self.path, mode).await
    }

    /// Change owner and optionally group.
    pub async fn chown(&self, owner: &str, group: Option<&str>) -> Result<(), FileError> {
        self.gateway.unix_chown(&self.path, owner, group).await
    }
}

impl std::fmt::Debug for UnixFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnixFile").field("path", &self.path).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path() {
        assert_eq!(
            split_path("/u/ibmuser/file.txt"),
            ("/u/ibmuser".to_string(), "file.txt".to_string())
        );
        assert_eq!(split_path("/file"), ("/".to_string(), "file".to_string()));
        assert_eq!(
            split_path("/u/dir/"),
            ("/u".to_string(), "dir".to_string())
        );
    }

    #[test]
    fn test_validate_symbolic() {
        assert!(validate_symbolic("rwxr-xr-x").is_ok());
        assert!(validate_symbolic("---------").is_ok());
        assert!(validate_symbolic("rw-rw-rw-").is_ok());
        assert!(validate_symbolic("rwx").is_err());
        assert!(validate_symbolic("xwrr-xr-x").is_err());
        assert!(validate_symbolic("rwxr-xr-xx").is_err());
    }
}
