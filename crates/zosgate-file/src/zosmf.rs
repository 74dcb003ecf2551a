//! z/OSMF file gateway — `/zosmf/restfiles/{ds,fs,ams}`.
//!
//! Endpoint set:
//! - `GET    /zosmf/restfiles/ds?dslevel=PATTERN` — list datasets
//! - `POST   /zosmf/restfiles/ds/{dsn}` — allocate dataset
//! - `DELETE /zosmf/restfiles/ds/{dsn}` — delete dataset/member
//! - `GET    /zosmf/restfiles/ds/{dsn}` — read content (raw body)
//! - `PUT    /zosmf/restfiles/ds/{dsn}` — write content (raw body)
//! - `GET    /zosmf/restfiles/ds/{dsn}/member` — list PDS members
//! - `GET    /zosmf/restfiles/fs?path=…` — list directory
//! - `POST   /zosmf/restfiles/fs?path=…` — create file/directory
//! - `PUT    /zosmf/restfiles/fs?path=…` — write content or chmod/chown
//! - `DELETE /zosmf/restfiles/fs?path=…` — delete (`X-IBM-Option: recursive`)
//! - `PUT    /zosmf/restfiles/ams` — execute IDCAMS
//!
//! Members are addressed as `DSN(MEMBER)`. Content crosses as the raw
//! request/response body with `X-IBM-Data-Type: text` or `binary`; numeric
//! dataset attributes arrive as JSON strings per z/OSMF convention.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use zosgate::{RestClient, StatusCode};

use crate::attrs::DatasetAttributes;
use crate::error::FileError;
use crate::gateway::{AmsOutput, DatasetInfo, FileGateway, UnixDirEntry, UnixFileType};

/// Response body for dataset list operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetListResponse {
    pub items: Vec<DatasetListItem>,
    pub returned_rows: usize,
    #[serde(default)]
    pub total_rows: Option<usize>,
    #[serde(rename = "JSONversion")]
    pub json_version: i32,
}

/// A single dataset in a list response — field names match the z/OSMF spec.
///
/// Numeric fields are JSON strings per z/OSMF convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetListItem {
    pub dsname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dsorg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recfm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lrecl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blksz: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vol: Option<String>,
}

/// Response body for PDS member list operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberListResponse {
    pub items: Vec<MemberListItem>,
    pub returned_rows: usize,
    #[serde(rename = "JSONversion")]
    pub json_version: i32,
}

/// A PDS member entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberListItem {
    pub member: String,
}

/// Parameters for creating a new dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetCreateParams {
    pub dsorg: String,
    pub recfm: String,
    pub lrecl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blksz: Option<u32>,
    pub primary: u32,
    pub secondary: u32,
    pub alcunit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dirblk: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vol: Option<String>,
}

/// USS directory entry in list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UssEntry {
    pub name: String,
    /// Unix permission string with type prefix (e.g. `-rwxr-xr-x`).
    pub mode: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub group: String,
}

/// USS directory listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UssListResponse {
    pub items: Vec<UssEntry>,
    pub returned_rows: usize,
    #[serde(rename = "JSONversion")]
    pub json_version: i32,
}

/// JSON body for USS create requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UssCreateRequest {
    /// "file" or "mkdir".
    #[serde(rename = "type")]
    pub create_type: String,
    /// Octal mode string (e.g. "755").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// JSON body for USS chmod/chown actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UssActionRequest {
    pub request: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// IDCAMS request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmsRequest {
    pub input: Vec<String>,
}

/// IDCAMS response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmsResponse {
    pub return_code: u32,
    pub output: String,
}

/// Convert a symbolic permission string (`rwxr-xr-x`) to octal (`755`).
fn symbolic_to_octal(mode: &str) -> Result<String, FileError> {
    let chars: Vec<char> = mode.chars().collect();
    if chars.len() != 9 {
        return Err(FileError::InvalidPermissions(mode.to_string()));
    }
    let mut digits = String::with_capacity(3);
    for triple in chars.chunks(3) {
        let mut value = 0u8;
        for (i, &c) in triple.iter().enumerate() {
            let expected = [b'r', b'w', b'x'][i] as char;
            if c == expected {
                value |= 4 >> i;
            } else if c != '-' {
                return Err(FileError::InvalidPermissions(mode.to_string()));
            }
        }
        digits.push((b'0' + value) as char);
    }
    Ok(digits)
}

/// Split a z/OSMF mode string (`-rwxr-xr-x`) into type and permissions.
fn split_mode(mode: &str) -> (UnixFileType, String) {
    let mut chars = mode.chars();
    let file_type = match chars.next() {
        Some('d') => UnixFileType::Directory,
        Some('l') => UnixFileType::Symlink,
        Some('-') => UnixFileType::File,
        _ => UnixFileType::Unknown,
    };
    (file_type, chars.collect())
}

/// The z/OSMF implementation of [`FileGateway`].
#[derive(Debug, Clone)]
pub struct ZosmfFiles {
    client: RestClient,
}

impl ZosmfFiles {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    fn ds_path(name: &str) -> String {
        format!("/zosmf/restfiles/ds/{}", name)
    }

    fn fs_query(path: &str) -> String {
        format!("/zosmf/restfiles/fs?path={}", path)
    }

    fn data_type_header(binary: bool) -> (&'static str, &'static str) {
        if binary {
            ("X-IBM-Data-Type", "binary")
        } else {
            ("X-IBM-Data-Type", "text")
        }
    }
}

#[async_trait]
impl FileGateway for ZosmfFiles {
    async fn dataset_list(&self, filter: &str) -> Result<Vec<DatasetInfo>, FileError> {
        let path = format!("/zosmf/restfiles/ds?dslevel={}", filter);
        let response = self
            .client
            .get(&path, &[("X-IBM-Attributes", "base")])
            .await?
            .expect(&[StatusCode::OK])?;
        let list: DatasetListResponse = response.json()?;
        Ok(list
            .items
            .into_iter()
            .map(|d| DatasetInfo {
                name: d.dsname,
                org: d.dsorg,
                recfm: d.recfm,
                lrecl: d.lrecl.and_then(|s| s.parse().ok()),
                blksize: d.blksz.and_then(|s| s.parse().ok()),
                volume: d.vol,
            })
            .collect())
    }

    async fn dataset_create(
        &self,
        name: &str,
        attrs: &DatasetAttributes,
    ) -> Result<(), FileError> {
        let body = DatasetCreateParams {
            dsorg: attrs.org.as_str().to_string(),
            recfm: attrs.recfm.as_str().to_string(),
            lrecl: attrs.lrecl,
            blksz: attrs.blksize,
            primary: attrs.primary,
            secondary: attrs.secondary,
            alcunit: attrs.unit.as_str().to_string(),
            dirblk: attrs.directory_blocks,
            vol: attrs.volume.clone(),
        };
        let response = self
            .client
            .post_json(&Self::ds_path(name), &body, &[])
            .await?;
        if response.status() == StatusCode::CONFLICT {
            return Err(FileError::DatasetExists(name.to_string()));
        }
        response.expect(&[StatusCode::CREATED])?;
        tracing::info!(dataset = name, "dataset allocated via z/OSMF");
        Ok(())
    }

    async fn dataset_delete(&self, name: &str) -> Result<(), FileError> {
        let response = self.client.delete(&Self::ds_path(name), &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FileError::DatasetNotFound(name.to_string()));
        }
        response.expect(&[StatusCode::NO_CONTENT])?;
        Ok(())
    }

    async fn dataset_read(&self, name: &str, binary: bool) -> Result<Vec<u8>, FileError> {
        let response = self
            .client
            .get(&Self::ds_path(name), &[Self::data_type_header(binary)])
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FileError::DatasetNotFound(name.to_string()));
        }
        let response = response.expect(&[StatusCode::OK])?;
        Ok(response.into_bytes())
    }

    async fn dataset_write(
        &self,
        name: &str,
        data: &[u8],
        binary: bool,
    ) -> Result<(), FileError> {
        let response = if binary {
            self.client
                .put_bytes(
                    &Self::ds_path(name),
                    data.to_vec(),
                    &[Self::data_type_header(true)],
                )
                .await?
        } else {
            self.client
                .put_text(
                    &Self::ds_path(name),
                    String::from_utf8_lossy(data).to_string(),
                    &[Self::data_type_header(false)],
                )
                .await?
        };
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FileError::DatasetNotFound(name.to_string()));
        }
        response.expect(&[StatusCode::CREATED, StatusCode::NO_CONTENT])?;
        Ok(())
    }

    async fn member_list(&self, name: &str) -> Result<Vec<String>, FileError> {
        let path = format!("{}/member", Self::ds_path(name));
        let response = self.client.get(&path, &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FileError::DatasetNotFound(name.to_string()));
        }
        let response = response.expect(&[StatusCode::OK])?;
        let list: MemberListResponse = response.json()?;
        Ok(list.items.into_iter().map(|m| m.member).collect())
    }

    async fn unix_list(&self, path: &str) -> Result<Vec<UnixDirEntry>, FileError> {
        let response = self.client.get(&Self::fs_query(path), &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FileError::UnixNotFound(path.to_string()));
        }
        let response = response.expect(&[StatusCode::OK])?;
        let list: UssListResponse = response.json()?;
        Ok(list
            .items
            .into_iter()
            .map(|e| {
                let (file_type, permissions) = split_mode(&e.mode);
                UnixDirEntry {
                    name: e.name,
                    file_type,
                    size: e.size,
                    permissions,
                    user: e.user,
                    group: e.group,
                }
            })
            .collect())
    }

    async fn unix_create(
        &self,
        path: &str,
        file_type: UnixFileType,
        mode: Option<&str>,
    ) -> Result<(), FileError> {
        let octal = match mode {
            Some(symbolic) => Some(symbolic_to_octal(symbolic)?),
            None => None,
        };
        let body = UssCreateRequest {
            create_type: match file_type {
                UnixFileType::Directory => "mkdir".to_string(),
                _ => "file".to_string(),
            },
            mode: octal,
        };
        let response = self
            .client
            .post_json(&Self::fs_query(path), &body, &[])
            .await?;
        if response.status() == StatusCode::CONFLICT {
            return Err(FileError::UnixExists(path.to_string()));
        }
        response.expect(&[StatusCode::CREATED])?;
        Ok(())
    }

    async fn unix_delete(&self, path: &str, recursive: bool) -> Result<(), FileError> {
        let headers: &[(&str, &str)] = if recursive {
            &[("X-IBM-Option", "recursive")]
        } else {
            &[]
        };
        let response = self.client.delete(&Self::fs_query(path), headers).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FileError::UnixNotFound(path.to_string()));
        }
        response.expect(&[StatusCode::NO_CONTENT])?;
        Ok(())
    }

    async fn unix_read(&self, path: &str, binary: bool) -> Result<Vec<u8>, FileError> {
        let response = self
            .client
            .get(&Self::fs_query(path), &[Self::data_type_header(binary)])
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FileError::UnixNotFound(path.to_string()));
        }
        let response = response.expect(&[StatusCode::OK])?;
        Ok(response.into_bytes())
    }

    async fn unix_write(&self, path: &str, data: &[u8], binary: bool) -> Result<(), FileError> {
        let response = if binary {
            self.client
                .put_bytes(
                    &Self::fs_query(path),
                    data.to_vec(),
                    &[Self::data_type_header(true)],
                )
                .await?
        } else {
            self.client
                .put_text(
                    &Self::fs_query(path),
                    String::from_utf8_lossy(data).to_string(),
                    &[Self::data_type_header(false)],
                )
                .await?
        };
        response.expect(&[StatusCode::CREATED, StatusCode::NO_CONTENT])?;
        Ok(())
    }

    async fn unix_chmod(&self, path: &str, mode: &str) -> Result<(), FileError> {
        let body = UssActionRequest {
            request: "chmod".to_string(),
            mode: Some(symbolic_to_octal(mode)?),
            owner: None,
            group: None,
        };
        let response = self
            .client
            .put_json(&Self::fs_query(path), &body, &[])
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
        let body = UssActionRequest {
            request: "chown".to_string(),
            mode: None,
            owner: Some(owner.to_string()),
            group: group.map(|g| g.to_string()),
        };
        let response = self
            .client
            .put_json(&Self::fs_query(path), &body, &[])
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FileError::UnixNotFound(path.to_string()));
        }
        response.expect(&[StatusCode::OK])?;
        Ok(())
    }

    async fn ams(&self, input: &[String]) -> Result<AmsOutput, FileError> {
        let body = AmsRequest {
            input: input.to_vec(),
        };
        let response = self
            .client
            .put_json("/zosmf/restfiles/ams", &body, &[])
            .await?
            .expect(&[StatusCode::OK])?;
        let ams: AmsResponse = response.json()?;
        Ok(AmsOutput {
            return_code: ams.return_code,
            output: ams.output,
        })
    }
}
