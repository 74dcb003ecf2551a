//! Dataset handles.

use std::sync::Arc;

use zosgate::names::{validate_dataset_name, validate_member_name};

use crate::attrs::DatasetAttributes;
use crate::error::FileError;
use crate::gateway::{DatasetInfo, FileGateway};

/// A handle to one dataset on a gateway.
///
/// The name is validated once when the handle is built; all content and
/// member operations go through the gateway from there.
#[derive(Clone)]
pub struct Dataset {
    gateway: Arc<dyn FileGateway>,
    name: String,
}

impl Dataset {
    pub(crate) fn new(gateway: Arc<dyn FileGateway>, name: &str) -> Result<Self, FileError> {
        let name = name.to_uppercase();
        validate_dataset_name(&name)?;
        Ok(Self { gateway, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn member_ref(&self, member: &str) -> Result<String, FileError> {
        let member = member.to_uppercase();
        validate_member_name(&member)?;
        Ok(format!("{}({})", self.name, member))
    }

    /// Allocate the dataset; fails if it already exists.
    pub async fn create(&self, attrs: &DatasetAttributes) -> Result<(), FileError> {
        if self.exists().await? {
            return Err(FileError::DatasetExists(self.name.clone()));
        }
        self.gateway.dataset_create(&self.name, attrs).await
    }

    /// Whether the dataset is cataloged.
    pub async fn exists(&self) -> Result<bool, FileError> {
        let entries = self.gateway.dataset_list(&self.name).await?;
        Ok(entries.iter().any(|d| d.name == self.name))
    }

    /// Delete the dataset.
    pub async fn delete(&self) -> Result<(), FileError> {
        self.gateway.dataset_delete(&self.name).await
    }

    /// Catalog attributes; fails if the dataset does not exist.
    pub async fn attributes(&self) -> Result<DatasetInfo, FileError> {
        let entries = self.gateway.dataset_list(&self.name).await?;
        entries
            .into_iter()
            .find(|d| d.name == self.name)
            .ok_or_else(|| FileError::DatasetNotFound(self.name.clone()))
    }

    /// Write text content.
    pub async fn store_text(&self, content: &str) -> Result<(), FileError> {
        self.gateway
            .dataset_write(&self.name, content.as_bytes(), false)
            .await
    }

    /// Write binary content.
    pub async fn store_binary(&self, data: &[u8]) -> Result<(), FileError> {
        self.gateway.dataset_write(&self.name, data, true).await
    }

    /// Read text content.
    pub async fn retrieve_text(&self) -> Result<String, FileError> {
        let bytes = self.gateway.dataset_read(&self.name, false).await?;
        Ok(String::from_utf8_lossy(&bytes).to_string())
    }

    /// Read binary content.
    pub async fn retrieve_binary(&self) -> Result<Vec<u8>, FileError> {
        self.gateway.dataset_read(&self.name, true).await
    }

    /// List member names (partitioned datasets).
    pub async fn member_list(&self) -> Result<Vec<String>, FileError> {
        self.gateway.member_list(&self.name).await
    }

    /// Whether the named member exists.
    pub async fn member_exists(&self, member: &str) -> Result<bool, FileError> {
        let member = member.to_uppercase();
        validate_member_name(&member)?;
        let members = self.gateway.member_list(&self.name).await?;
        Ok(members.iter().any(|m| m == &member))
    }

    /// Write text content into a member.
    pub async fn member_store(&self, member: &str, content: &str) -> Result<(), FileError> {
        let target = self.member_ref(member)?;
        self.gateway
            .dataset_write(&target, content.as_bytes(), false)
            .await
    }

    /// Read a member's text content.
    pub async fn member_retrieve(&self, member: &str) -> Result<String, FileError> {
        let target = self.member_ref(member)?;
        let bytes = self.gateway.dataset_read(&target, false).await?;
        Ok(String::from_utf8_lossy(&bytes).to_string())
    }

    /// Delete a member.
    pub async fn member_delete(&self, member: &str) -> Result<(), FileError> {
        let target = self.member_ref(member)?;
        self.gateway.dataset_delete(&target).await
    }
}

impl std::fmt::Debug for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dataset").field("name", &self.name).finish()
    }
}
