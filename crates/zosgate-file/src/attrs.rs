//! Dataset allocation attributes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dataset organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatasetOrg {
    /// Physical sequential (PS).
    Sequential,
    /// Partitioned (PO).
    Partitioned,
    /// VSAM (VS).
    Vsam,
}

impl DatasetOrg {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetOrg::Sequential => "PS",
            DatasetOrg::Partitioned => "PO",
            DatasetOrg::Vsam => "VS",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PS" => Some(DatasetOrg::Sequential),
            "PO" | "PO-E" => Some(DatasetOrg::Partitioned),
            "VS" => Some(DatasetOrg::Vsam),
            _ => None,
        }
    }
}

/// Record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordFormat {
    Fixed,
    FixedBlocked,
    Variable,
    VariableBlocked,
    Undefined,
}

impl RecordFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordFormat::Fixed => "F",
            RecordFormat::FixedBlocked => "FB",
            RecordFormat::Variable => "V",
            RecordFormat::VariableBlocked => "VB",
            RecordFormat::Undefined => "U",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "F" => Some(RecordFormat::Fixed),
            "FB" => Some(RecordFormat::FixedBlocked),
            "V" => Some(RecordFormat::Variable),
            "VB" => Some(RecordFormat::VariableBlocked),
            "U" => Some(RecordFormat::Undefined),
            _ => None,
        }
    }
}

/// Space allocation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationUnit {
    Tracks,
    Cylinders,
}

impl AllocationUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationUnit::Tracks => "TRK",
            AllocationUnit::Cylinders => "CYL",
        }
    }
}

impl fmt::Display for AllocationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Allocation attributes for a new dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetAttributes {
    pub org: DatasetOrg,
    pub recfm: RecordFormat,
    /// Logical record length.
    pub lrecl: u32,
    /// Block size; gateways pick a sensible default when absent.
    pub blksize: Option<u32>,
    /// Primary space allocation.
    pub primary: u32,
    /// Secondary space allocation.
    pub secondary: u32,
    pub unit: AllocationUnit,
    /// Directory blocks, partitioned datasets only.
    pub directory_blocks: Option<u32>,
    /// Volume serial.
    pub volume: Option<String>,
}

impl Default for DatasetAttributes {
    fn default() -> Self {
        Self {
            org: DatasetOrg::Sequential,
            recfm: RecordFormat::FixedBlocked,
            lrecl: 80,
            blksize: None,
            primary: 1,
            secondary: 1,
            unit: AllocationUnit::Tracks,
            directory_blocks: None,
            volume: None,
        }
    }
}

impl DatasetAttributes {
    /// Attributes for a PDS with the given directory blocks.
    pub fn partitioned(directory_blocks: u32) -> Self {
        Self {
            org: DatasetOrg::Partitioned,
            directory_blocks: Some(directory_blocks),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_org_round_trip() {
        assert_eq!(DatasetOrg::Sequential.as_str(), "PS");
        assert_eq!(DatasetOrg::parse("PO"), Some(DatasetOrg::Partitioned));
        assert_eq!(DatasetOrg::parse("PO-E"), Some(DatasetOrg::Partitioned));
        assert_eq!(DatasetOrg::parse("??"), None);
    }

    #[test]
    fn test_recfm_round_trip() {
        assert_eq!(RecordFormat::FixedBlocked.as_str(), "FB");
        assert_eq!(RecordFormat::parse("vb"), Some(RecordFormat::VariableBlocked));
        assert_eq!(RecordFormat::parse("X"), None);
    }

    #[test]
    fn test_defaults() {
        let attrs = DatasetAttributes::default();
        assert_eq!(attrs.org, DatasetOrg::Sequential);
        assert_eq!(attrs.lrecl, 80);
        assert_eq!(attrs.unit, AllocationUnit::Tracks);
        assert!(attrs.directory_blocks.is_none());

        let pds = DatasetAttributes::partitioned(10);
        assert_eq!(pds.org, DatasetOrg::Partitioned);
        assert_eq!(pds.directory_blocks, Some(10));
    }
}
