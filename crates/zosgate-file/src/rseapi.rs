//! RSE API file gateway — `/rseapi/api/v1/{datasets,unixfiles,ams}`.
//!
//! Endpoint set:
//! - `GET    /rseapi/api/v1/datasets?filter=PATTERN` — list datasets
//! - `POST   /rseapi/api/v1/datasets/{dsn}` — allocate dataset
//! - `DELETE /rseapi/api/v1/datasets/{dsn}` — delete dataset/member
//! - `GET    /rseapi/api/v1/datasets/{dsn}/content` — read (`{"records": …}`)
//! - `PUT    /rseapi/api/v1/datasets/{dsn}/content` — write
//! - `GET    /rseapi/api/v1/datasets/{dsn}/members` — list PDS members
//! - `GET    /rseapi/api/v1/unixfiles?path=…` — list directory
//! - `POST   /rseapi/api/v1/unixfiles?path=…` — create file/directory
//! - `DELETE /rseapi/api/v1/unixfiles?path=…[&recursive=true]` — delete
//! - `GET    /rseapi/api/v1/unixfiles/content?path=…` — read (`{"content": …}`)
//! - `PUT    /rseapi/api/v1/unixfiles/content?path=…` — write
//! - `PUT    /rseapi/api/v1/unixfiles?path=…` — chmod/chown actions
//! - `PUT    /rseapi/api/v1/ams` — execute IDCAMS (`{"input":[…]}`)
//!
//! Binary content crosses the JSON envelopes base64-encoded
//! (`?binary=true` on the content routes).

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use zosgate::{RestClient, StatusCode};

use crate::attrs::DatasetAttributes;
use crate::error::FileError;
use crate::gateway::{AmsOutput, DatasetInfo, FileGateway, UnixDirEntry, UnixFileType};

/// A dataset entry in RSE API list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RseDataset {
    pub name: String,
    #[serde(default)]
    pub data_set_organization: Option<String>,
    #[serde(default)]
    pub record_format: Option<String>,
    #[serde(default)]
    pub record_length: Option<u32>,
    #[serde(default)]
    pub block_size: Option<u32>,
    #[serde(default)]
    pub volume_serial: Option<String>,
}

/// Allocation request body for new datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RseDatasetCreate {
    pub data_set_organization: String,
    pub record_format: String,
    pub record_length: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_size: Option<u32>,
    pub allocation_unit: String,
    pub primary: u32,
    pub secondary: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_blocks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_serial: Option<String>,
}

/// A UNIX directory entry in RSE API list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RseUnixEntry {
    pub name: String,
    /// FILE, DIRECTORY, or SYMLINK.
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub permissions_symbolic: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

/// The `items` list envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RseItems<T> {
    pub items: Vec<T>,
}

/// Dataset content envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RseRecords {
    pub records: String,
}

/// UNIX file content envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RseUnixContent {
    pub content: String,
}

/// Create request for UNIX files and directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RseUnixCreate {
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions_symbolic: Option<String>,
}

/// chmod/chown action request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RseUnixAction {
    pub request: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions_symbolic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// IDCAMS request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RseAmsRequest {
    pub input: Vec<String>,
}

/// IDCAMS response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RseAmsResponse {
    pub return_code: u32,
    pub output: String,
}

fn entry_type_from_str(s: &str) -> UnixFileType {
    match s.to_uppercase().as_str() {
        "FILE" => UnixFileType::File,
        "DIRECTORY" => UnixFileType::Directory,
        "SYMLINK" => UnixFileType::Symlink,
        _ => UnixFileType::Unknown,
    }
}

fn entry_type_to_str(t: UnixFileType) -> &'static str {
    match t {
        UnixFileType::File => "FILE",
        UnixFileType::Directory => "DIRECTORY",
        UnixFileType::Symlink => "SYMLINK",
        UnixFileType::Unknown => "FILE",
    }
}

/// The RSE API implementation of [`FileGateway`].
#[derive(Debug, Clone)]
pub struct RseapiFiles {
    client: RestClient,
}

impl RseapiFiles {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    fn dataset_path(name: &str) -> String {
        format!("/rseapi/api/v1/datasets/{}", name)
    }

    fn unix_query(path: &str) -> String {
        format!("/rseapi/api/v1/unixfiles?path={}", path)
    }
}

#[async_trait]
impl FileGateway for RseapiFiles {
    async fn dataset_list(&self, filter: &str) -> Result<Vec<DatasetInfo>, FileError> {
        let path = format!("/rseapi/api/v1/datasets?filter={}", filter);
        let response = self.client.get(&path, &[]).await?.expect(&[StatusCode::OK])?;
        let list: RseItems<RseDataset> = response.json()?;
        Ok(list
            .items
            .into_iter()
            .map(|d| DatasetInfo {
                name: d.name,
                org: d.data_set_organization,
                recfm: d.record_format,
                lrecl: d.record_length,
                blksize: d.block_size,
                volume: d.volume_serial,
            })
            .collect())
    }

    async fn dataset_create(
        &self,
        name: &str,
        attrs: &DatasetAttributes,
    ) -> Result<(), FileError> {
        let body = RseDatasetCreate {
            data_set_organization: attrs.org.as_str().to_string(),
            record_format: attrs.recfm.as_str().to_string(),
            record_length: attrs.lrecl,
            block_size: attrs.blksize,
            allocation_unit: attrs.unit.as_str().to_string(),
            primary: attrs.primary,
            secondary: attrs.secondary,
            directory_blocks: attrs.directory_blocks,
            volume_serial: attrs.volume.clone(),
        };
        let response = self
            .client
            .post_json(&Self::dataset_path(name), &body, &[])
            .await?;
        if response.status() == StatusCode::CONFLICT {
            return Err(FileError::DatasetExists(name.to_string()));
        }
        response.expect(&[StatusCode::CREATED])?;
        tracing::info!(dataset = name, "dataset allocated via RSE API");
        Ok(())
    }

    async fn dataset_delete(&self, name: &str) -> Result<(), FileError> {
        let response = self.client.delete(&Self::dataset_path(name), &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FileError::DatasetNotFound(name.to_string()));
        }
        response.expect(&[StatusCode::NO_CONTENT])?;
        Ok(())
    }

    async fn dataset_read(&self, name: &str, binary: bool) -> Result<Vec<u8>, FileError> {
        let path = if binary {
            format!("{}/content?binary=true", Self::dataset_path(name))
        } else {
            format!("{}/content", Self::dataset_path(name))
        };
        let response = self.client.get(&path, &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FileError::DatasetNotFound(name.to_string()));
        }
        let response = response.expect(&[StatusCode::OK])?;
        let records: RseRecords = response.json()?;
        if binary {
            base64::engine::general_purpose::STANDARD
                .decode(records.records.as_bytes())
                .map_err(|_| FileError::InvalidBase64(name.to_string()))
        } else {
            Ok(records.records.into_bytes())
        }
    }

    async fn dataset_write(
        &self,
        name: &str,
        data: &[u8],
        binary: bool,
    ) -> Result<(), FileError> {
        let (path, records) = if binary {
            (
                format!("{}/content?binary=true", Self::dataset_path(name)),
                base64::engine::general_purpose::STANDARD.encode(data),
            )
        } else {
            (
                format!("{}/content", Self::dataset_path(name)),
                String::from_utf8_lossy(data).to_string(),
            )
        };
        let body = RseRecords { records };
        let response = self.client.put_json(&path, &body, &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FileError::DatasetNotFound(name.to_string()));
        }
        response.expect(&[StatusCode::NO_CONTENT, StatusCode::CREATED])?;
        Ok(())
    }

    async fn member_list(&self, name: &str) -> Result<Vec<String>, FileError> {
        let path = format!("{}/members", Self::dataset_path(name));
        let response = self.client.get(&path, &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FileError::DatasetNotFound(name.to_string()));
        }
        let response = response.expect(&[StatusCode::OK])?;
        let members: RseItems<String> = response.json()?;
        Ok(members.items)
    }

    async fn unix_list(&self, path: &str) -> Result<Vec<UnixDirEntry>, FileError> {
        let response = self.client.get(&Self::unix_query(path), &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FileError::UnixNotFound(path.to_string()));
        }
        let response = response.expect(&[StatusCode::OK])?;
        let list: RseItems<RseUnixEntry> = response.json()?;
        Ok(list
            .items
            .into_iter()
            .map(|e| UnixDirEntry {
                file_type: entry_type_from_str(&e.entry_type),
                name: e.name,
                size: e.size.unwrap_or(0),
                permissions: e.permissions_symbolic.unwrap_or_default(),
                user: e.user.unwrap_or_default(),
                group: e.group.unwrap_or_default(),
            })
            .collect())
    }

    async fn unix_create(
        &self,
        path: &str,
        file_type: UnixFileType,
        mode: Option<&str>,
    ) -> Result<(), FileError> {
        let body = RseUnixCreate {
            entry_type: entry_type_to_str(file_type).to_string(),
            permissions_symbolic: mode.map(|m| m.to_string()),
        };
        let response = self
            .client
            .post_json(&Self::unix_query(path), &body, &[])
            .await?;
        if response.status() == StatusCode::CONFLICT {
            return Err(FileError::UnixExists(path.to_string()));
        }
        response.expect(&[StatusCode::CREATED])?;
        Ok(())
    }

    async fn unix_delete(&self, path: &str, recursive: bool) -> Result<(), FileError> {
        let url = if recursive {
            format!("{}&recursive=true", Self::unix_query(path))
        } else {
            Self::unix_query(path)
        };
        let response = self.client.delete(&url, &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FileError::UnixNotFound(path.to_string()));
        }
        response.expect(&[StatusCode::NO_CONTENT])?;
        Ok(())
    }

    async fn unix_read(&self, path: &str, binary: bool) -> Result<Vec<u8>, FileError> {
        let url = if binary {
            format!("/rseapi/api/v1/unixfiles/content?path={}&binary=true", path)
        } else {
            format!("/rseapi/api/v1/unixfiles/content?path={}", path)
        };
        let response = self.client.get(&url, &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FileError::UnixNotFound(path.to_string()));
        }
        let response = response.expect(&[StatusCode::OK])?;
        let content: RseUnixContent = response.json()?;
        if binary {
            base64::engine::general_purpose::STANDARD
                .decode(content.content.as_bytes())
                .map_err(|_| FileError::InvalidBase64(path.to_string()))
        } else {
            Ok(content.content.into_bytes())
        }
    }

    async fn unix_write(&self, path: &str, data: &[u8], binary: bool) -> Result<(), FileError> {
        let (url, content) = if binary {
            (
                format!("/rseapi/api/v1/unixfiles/content?path={}&binary=true", path),
                base64::engine::general_purpose::STANDARD.encode(data),
            )
        } else {
            (
                format!("/rseapi/api/v1/unixfiles/content?path={}", path),
                String::from_utf8_lossy(data).to_string(),
            )
        };
        let body = RseUnixContent { content };
        let response = self.client.put_json(&url, &body, &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FileError::UnixNotFound(path.to_string()));
        }
        response.expect(&[StatusCode::NO_CONTENT, StatusCode::CREATED])?;
        Ok(())
    }

    async fn unix_chmod(&self, path: &str, mode: &str) -> Result<(), FileError> {
        let body = RseUnixAction {
            request: "chmod".to_string(),
            permissions_symbolic: Some(mode.to_string()),
            owner: None,
            group: None,
        };
        let response = self
            .client
            .put_json(&Self::unix_query(path), &body, &[])
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FileError::UnixNotFound(path.to_string()));
        }
        response.expect(&[StatusCode::OK])?;
        Ok(())
    }

    async fn unix_chown(
        &self,
        path: &str,
        owner: &str,
        group: Option<&str>,
    ) -> Result<(), FileError> {
        let body = RseUnixAction {
            request: "chown".to_string(),
            permissions_symbolic: None,
            owner: Some(owner.to_string()),
            group: group.map(|g| g.to_string()),
        };
        let response = self
            .client
            .put_json(&Self::unix_query(path), &body, &[])
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FileError::UnixNotFound(path.to_string()));
        }
        response.expect(&[StatusCode::OK])?;
        Ok(())
    }

    async fn ams(&self, input: &[String]) -> Result<AmsOutput, FileError> {
        let body = RseAmsRequest {
            input: input.to_vec(),
        };
        let response = self
            .client
            .put_json("/rseapi/api/v1/ams", &body, &[])
            .await?
            .expect(&[StatusCode::OK])?;
        let ams: RseAmsResponse = response.json()?;
        Ok(AmsOutput {
            return_code: ams.return_code,
            output: ams.output,
        })
    }
}
