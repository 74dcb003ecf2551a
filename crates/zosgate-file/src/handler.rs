//! The file handler: handle factory plus artifact ledger.
//!
//! Every artifact a handler creates is recorded; [`FileHandler::cleanup`]
//! deletes them again in reverse creation order, skipping anything already
//! gone, so a run can always be torn down with one call.

use std::sync::Arc;

use rand::Rng;

use zosgate::FileConfig;

use crate::attrs::DatasetAttributes;
use crate::dataset::Dataset;
use crate::error::FileError;
use crate::gateway::FileGateway;
use crate::unix::UnixFile;
use crate::vsam::{VsamDataset, VsamDefinition};

const TOKEN_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone)]
enum Artifact {
    Dataset(String),
    Vsam(String),
    UnixFile(String),
    UnixDirectory(String),
}

/// Factory and cleanup ledger for dataset, VSAM, and UNIX file handles.
pub struct FileHandler {
    gateway: Arc<dyn FileGateway>,
    config: FileConfig,
    run_token: String,
    scratch_counter: u32,
    artifacts: Vec<Artifact>,
}

impl FileHandler {
    pub(crate) fn new(gateway: Arc<dyn FileGateway>, config: FileConfig) -> Self {
        let mut rng = rand::thread_rng();
        let run_token: String = (0..4)
            .map(|_| TOKEN_CHARS[rng.gen_range(0..TOKEN_CHARS.len())] as char)
            .collect();
        Self {
            gateway,
            config,
            run_token,
            scratch_counter: 0,
            artifacts: Vec::new(),
        }
    }

    /// A dataset handle without creating anything.
    pub fn dataset(&self, name: &str) -> Result<Dataset, FileError> {
        Dataset::new(Arc::clone(&self.gateway), name)
    }

    /// A UNIX file handle without creating anything.
    pub fn unix_file(&self, path: &str) -> Result<UnixFile, FileError> {
        UnixFile::new(Arc::clone(&self.gateway), path)
    }

    /// A VSAM handle without creating anything.
    pub fn vsam(&self, name: &str, definition: VsamDefinition) -> Result<VsamDataset, FileError> {
        VsamDataset::new(Arc::clone(&self.gateway), name, definition)
    }

    /// Allocate a dataset and record it for cleanup.
    pub async fn create_dataset(
        &mut self,
        name: &str,
        attrs: &DatasetAttributes,
    ) -> Result<Dataset, FileError> {
        let dataset = self.dataset(name)?;
        dataset.create(attrs).await?;
        self.artifacts
            .push(Artifact::Dataset(dataset.name().to_string()));
        Ok(dataset)
    }

    /// Define a VSAM cluster and record it for cleanup.
    pub async fn create_vsam(
        &mut self,
        name: &str,
        definition: VsamDefinition,
    ) -> Result<VsamDataset, FileError> {
        let vsam = self.vsam(name, definition)?;
        vsam.define().await?;
        self.artifacts.push(Artifact::Vsam(vsam.name().to_string()));
        Ok(vsam)
    }

    /// Create a UNIX file with the configured default mode and record it
    /// for cleanup.
    pub async fn create_unix_file(&mut self, path: &str) -> Result<UnixFile, FileError> {
        let file = self.unix_file(path)?;
        file.create_file(Some(&self.config.file_mode)).await?;
        self.artifacts
            .push(Artifact::UnixFile(file.path().to_string()));
        Ok(file)
    }

    /// Create a UNIX directory with the configured default mode and record
    /// it for cleanup.
    pub async fn create_unix_directory(&mut self, path: &str) -> Result<UnixFile, FileError> {
        let dir = self.unix_file(path)?;
        dir.create_directory(Some(&self.config.directory_mode)).await?;
        self.artifacts
            .push(Artifact::UnixDirectory(dir.path().to_string()));
        Ok(dir)
    }

    /// The next run-scoped scratch dataset name under the configured HLQ.
    pub fn scratch_name(&mut self) -> String {
        self.scratch_counter += 1;
        format!(
            "{}.T{}.S{:04}",
            self.config.scratch_hlq, self.run_token, self.scratch_counter
        )
    }

    /// Write text into a VSAM cluster through a scratch sequential dataset
    /// and a REPRO.
    pub async fn vsam_store_text(
        &mut self,
        vsam: &VsamDataset,
        content: &str,
    ) -> Result<(), FileError> {
        let scratch_name = self.scratch_name();
        let scratch = self.dataset(&scratch_name)?;
        scratch.create(&DatasetAttributes::default()).await?;
        let result = async {
            scratch.store_text(content).await?;
            vsam.store_from(&scratch).await
        }
        .await;
        let delete = scratch.delete().await;
        result?;
        delete
    }

    /// Read a VSAM cluster's records as text through a scratch sequential
    /// dataset and a REPRO.
    pub async fn vsam_retrieve_text(&mut self, vsam: &VsamDataset) -> Result<String, FileError> {
        let scratch_name = self.scratch_name();
        let scratch = self.dataset(&scratch_name)?;
        scratch.create(&DatasetAttributes::default()).await?;
        let result = async {
            vsam.retrieve_via(&scratch).await?;
            scratch.retrieve_text().await
        }
        .await;
        let delete = scratch.delete().await;
        let content = result?;
        delete?;
        Ok(content)
    }

    /// Delete every artifact this handler created, newest first.
    ///
    /// Artifacts already deleted out from under the handler are skipped;
    /// other failures are logged and the sweep continues. Returns the
    /// artifacts that could not be removed.
    pub async fn cleanup(&mut self) -> Result<Vec<String>, FileError> {
        let mut leftover = Vec::new();
        while let Some(artifact) = self.artifacts.pop() {
            let outcome = match &artifact {
                Artifact::Dataset(name) => self.gateway.dataset_delete(name).await,
                Artifact::Vsam(name) => {
                    crate::vsam::delete_cluster(self.gateway.as_ref(), name).await
                }
                Artifact::UnixFile(path) => self.gateway.unix_delete(path, false).await,
                Artifact::UnixDirectory(path) => self.gateway.unix_delete(path, true).await,
            };
            match outcome {
                Ok(()) => {}
                Err(FileError::DatasetNotFound(_)) | Err(FileError::UnixNotFound(_)) => {
                    tracing::debug!(?artifact, "artifact already gone, skipping");
                }
                Err(e) => {
                    tracing::warn!(?artifact, error = %e, "cleanup failed for artifact");
                    leftover.push(artifact_name(&artifact));
                }
            }
        }
        Ok(leftover)
    }

    /// Names of artifacts currently recorded for cleanup.
    pub fn artifacts(&self) -> Vec<String> {
        self.artifacts.iter().map(artifact_name).collect()
    }
}

fn artifact_name(artifact: &Artifact) -> String {
    match artifact {
        Artifact::Dataset(name) | Artifact::Vsam(name) => name.clone(),
        Artifact::UnixFile(path) | Artifact::UnixDirectory(path) => path.clone(),
    }
}

impl std::fmt::Debug for FileHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileHandler")
            .field("run_token", &self.run_token)
            .field("artifacts", &self.artifacts.len())
            .finish()
    }
}
