//! VSAM cluster handles, driven through IDCAMS.
//!
//! Define, delete, and content transfer all go through the gateway's AMS
//! endpoint as IDCAMS statements: `DEFINE CLUSTER`, `DELETE`, and `REPRO`
//! between the cluster and a sequential staging dataset.

use std::sync::Arc;

use zosgate::names::validate_dataset_name;

use crate::attrs::AllocationUnit;
use crate::dataset::Dataset;
use crate::error::FileError;
use crate::gateway::FileGateway;

/// VSAM cluster organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VsamType {
    /// Key-sequenced (INDEXED).
    Ksds,
    /// Entry-sequenced (NONINDEXED).
    Esds,
    /// Relative-record (NUMBERED).
    Rrds,
}

impl VsamType {
    /// The IDCAMS DEFINE keyword for this organization.
    pub fn keyword(&self) -> &'static str {
        match self {
            VsamType::Ksds => "INDEXED",
            VsamType::Esds => "NONINDEXED",
            VsamType::Rrds => "NUMBERED",
        }
    }
}

/// Parameters for a DEFINE CLUSTER statement.
#[derive(Debug, Clone)]
pub struct VsamDefinition {
    pub vsam_type: VsamType,
    /// Key (length, offset); KSDS only.
    pub key: Option<(u16, u16)>,
    /// Record size (average, maximum).
    pub record_size: (u32, u32),
    /// Space allocation (primary, secondary).
    pub space: (u32, u32),
    pub unit: AllocationUnit,
    pub volume: Option<String>,
}

impl VsamDefinition {
    /// A key-sequenced cluster with the given key length and offset.
    pub fn ksds(key_length: u16, key_offset: u16) -> Self {
        Self {
            vsam_type: VsamType::Ksds,
            key: Some((key_length, key_offset)),
            record_size: (80, 80),
            space: (1, 1),
            unit: AllocationUnit::Tracks,
            volume: None,
        }
    }

    /// An entry-sequenced cluster.
    pub fn esds() -> Self {
        Self {
            vsam_type: VsamType::Esds,
            key: None,
            record_size: (80, 80),
            space: (1, 1),
            unit: AllocationUnit::Tracks,
            volume: None,
        }
    }

    /// A relative-record cluster.
    pub fn rrds() -> Self {
        Self {
            vsam_type: VsamType::Rrds,
            key: None,
            record_size: (80, 80),
            space: (1, 1),
            unit: AllocationUnit::Tracks,
            volume: None,
        }
    }

    /// Record size (average, maximum).
    pub fn with_record_size(mut self, average: u32, maximum: u32) -> Self {
        self.record_size = (average, maximum);
        self
    }

    /// Space allocation in the definition's unit.
    pub fn with_space(mut self, primary: u32, secondary: u32) -> Self {
        self.space = (primary, secondary);
        self
    }

    /// Volume serial.
    pub fn with_volume(mut self, volume: impl Into<String>) -> Self {
        self.volume = Some(volume.into());
        self
    }

    /// The DEFINE CLUSTER statement, one IDCAMS input line per element,
    /// continuations marked with a trailing `-`.
    pub fn define_statements(&self, name: &str) -> Vec<String> {
        let mut lines = vec![
            format!("DEFINE CLUSTER (NAME({}) -", name),
            format!("  {} -", self.vsam_type.keyword()),
        ];
        if let Some((length, offset)) = self.key {
            lines.push(format!("  KEYS({} {}) -", length, offset));
        }
        lines.push(format!(
            "  RECORDSIZE({} {}) -",
            self.record_size.0, self.record_size.1
        ));
        let space_keyword = match self.unit {
            AllocationUnit::Tracks => "TRACKS",
            AllocationUnit::Cylinders => "CYLINDERS",
        };
        match &self.volume {
            Some(volume) => {
                lines.push(format!(
                    "  {}({} {}) -",
                    space_keyword, self.space.0, self.space.1
                ));
                lines.push(format!("  VOLUMES({}))", volume));
            }
            None => {
                lines.push(format!(
                    "  {}({} {}))",
                    space_keyword, self.space.0, self.space.1
                ));
            }
        }
        lines
    }
}

/// The DELETE statement for a cluster.
fn delete_statement(name: &str) -> Vec<String> {
    vec![format!("DELETE {} CLUSTER PURGE", name)]
}

/// Delete a cluster by name through the AMS endpoint.
pub(crate) async fn delete_cluster(
    gateway: &dyn FileGateway,
    name: &str,
) -> Result<(), FileError> {
    let output = gateway.ams(&delete_statement(name)).await?;
    if output.return_code != 0 {
        if output.output.to_uppercase().contains("NOT FOUND") {
            return Err(FileError::DatasetNotFound(name.to_string()));
        }
        return Err(FileError::AmsFailed {
            rc: output.return_code,
            output: output.output,
        });
    }
    Ok(())
}

/// The REPRO statement copying one dataset into another.
fn repro_statement(from: &str, to: &str) -> Vec<String> {
    vec![format!("REPRO INDATASET({}) OUTDATASET({})", from, to)]
}

/// A handle to one VSAM cluster on a gateway.
#[derive(Clone)]
pub struct VsamDataset {
    gateway: Arc<dyn FileGateway>,
    name: String,
    definition: VsamDefinition,
}

impl VsamDataset {
    pub(crate) fn new(
        gateway: Arc<dyn FileGateway>,
        name: &str,
        definition: VsamDefinition,
    ) -> Result<Self, FileError> {
        let name = name.to_uppercase();
        validate_dataset_name(&name)?;
        Ok(Self {
            gateway,
            name,
            definition,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> &VsamDefinition {
        &self.definition
    }

    /// Define the cluster; fails if it already exists.
    pub async fn define(&self) -> Result<(), FileError> {
        if self.exists().await? {
            return Err(FileError::DatasetExists(self.name.clone()));
        }
        let output = self
            .gateway
            .ams(&self.definition.define_statements(&self.name))
            .await?;
        if output.return_code != 0 {
            return Err(FileError::AmsFailed {
                rc: output.return_code,
                output: output.output,
            });
        }
        tracing::info!(cluster = %self.name, "VSAM cluster defined");
        Ok(())
    }

    /// Whether the cluster is cataloged.
    pub async fn exists(&self) -> Result<bool, FileError> {
        let entries = self.gateway.dataset_list(&self.name).await?;
        Ok(entries.iter().any(|d| d.name == self.name))
    }

    /// Delete the cluster.
    pub async fn delete(&self) -> Result<(), FileError> {
        delete_cluster(self.gateway.as_ref(), &self.name).await
    }

    /// Copy a sequential dataset's records into the cluster (REPRO).
    pub async fn store_from(&self, source: &Dataset) -> Result<(), FileError> {
        let output = self
            .gateway
            .ams(&repro_statement(source.name(), &self.name))
            .await?;
        if output.return_code != 0 {
            return Err(FileError::AmsFailed {
                rc: output.return_code,
                output: output.output,
            });
        }
        Ok(())
    }

    /// Copy the cluster's records into a sequential dataset (REPRO).
    pub async fn retrieve_via(&self, target: &Dataset) -> Result<(), FileError> {
        let output = self
            .gateway
            .ams(&repro_statement(&self.name, target.name()))
            .await?;
        if output.return_code != 0 {
            return Err(FileError::AmsFailed {
                rc: output.return_code,
                output: output.output,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for VsamDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VsamDataset")
            .field("name", &self.name)
            .field("type", &self.definition.vsam_type)
            .finish()
    }
}
