//! # z/OS Dataset, VSAM, and UNIX File Management
//!
//! Create, read, write, and delete datasets (sequential and partitioned),
//! VSAM clusters, and UNIX files and directories through a system-management
//! gateway:
//!
//! - **RSE API** — `/rseapi/api/v1/datasets`, `/rseapi/api/v1/unixfiles`,
//!   `/rseapi/api/v1/ams`
//! - **z/OSMF** — `/zosmf/restfiles/ds`, `/zosmf/restfiles/fs`,
//!   `/zosmf/restfiles/ams`
//!
//! Both dialects live behind the [`FileGateway`] trait. The [`ZosFiles`]
//! manager hands out [`FileHandler`]s; a handler remembers every artifact it
//! creates and deletes them again on [`FileHandler::cleanup`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use zosgate::{RestClient, ZosgateConfig};
//! use zosgate_file::{DatasetAttributes, ZosFiles};
//!
//! # async fn example() -> Result<(), zosgate_file::FileError> {
//! let config = ZosgateConfig::from_file("zosgate.toml")?;
//! let client = RestClient::new(&config.gateway)?;
//! let files = ZosFiles::rseapi(client, config.file);
//!
//! let mut handler = files.handler();
//! let dataset = handler
//!     .create_dataset("IBMUSER.ZOSGATE.DATA", &DatasetAttributes::default())
//!     .await?;
//! dataset.store_text("HELLO FROM ZOSGATE\n").await?;
//! handler.cleanup().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod attrs;
pub mod dataset;
pub mod error;
pub mod gateway;
pub mod handler;
pub mod manager;
pub mod rseapi;
pub mod unix;
pub mod vsam;
pub mod zosmf;

pub use attrs::{AllocationUnit, DatasetAttributes, DatasetOrg, RecordFormat};
pub use dataset::Dataset;
pub use error::FileError;
pub use gateway::{AmsOutput, DatasetInfo, FileGateway, UnixDirEntry, UnixFileType};
pub use handler::FileHandler;
pub use manager::ZosFiles;
pub use rseapi::RseapiFiles;
pub use unix::{UnixAttributes, UnixFile};
pub use vsam::{VsamDataset, VsamDefinition, VsamType};
pub use zosmf::ZosmfFiles;

/// Convenience result type for file operations.
pub type Result<T> = std::result::Result<T, error::FileError>;
