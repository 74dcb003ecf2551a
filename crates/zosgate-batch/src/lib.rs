//! # z/OS Batch Job Management
//!
//! Submit JCL, query and poll job status, retrieve spool output, cancel and
//! purge jobs — over either system-management gateway:
//!
//! - **z/OSMF** — `/zosmf/restjobs/jobs/...`
//! - **RSE API** — `/rseapi/api/v1/jobs/...`
//!
//! Both live behind the [`BatchGateway`] trait; the [`ZosBatch`] manager and
//! [`BatchJob`] handles are gateway-agnostic.
//!
//! ## Example
//!
//! ```rust,no_run
//! use zosgate::{RestClient, ZosgateConfig};
//! use zosgate_batch::ZosBatch;
//!
//! # async fn example() -> Result<(), zosgate_batch::BatchError> {
//! let config = ZosgateConfig::from_file("zosgate.toml")?;
//! let client = RestClient::new(&config.gateway)?;
//! let mut batch = ZosBatch::zosmf(client, config.batch);
//!
//! let jcl = "//STEP1    EXEC PGM=IEFBR14\n";
//! let mut job = batch.submit(jcl, None).await?;
//! job.wait_for_completion().await?;
//! let output = job.output().await?;
//! for file in &output.files {
//!     println!("{}: {} bytes", file.ddname, file.content.len());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod gateway;
pub mod jcl;
pub mod job;
pub mod manager;
pub mod rseapi;
pub mod status;
pub mod zosmf;

pub use error::BatchError;
pub use gateway::{BatchGateway, JobInfo, SpoolFileRef};
pub use jcl::{JobCard, Jobname};
pub use job::{BatchJob, JobOutput, JobOutputFile};
pub use manager::ZosBatch;
pub use rseapi::RseapiBatch;
pub use status::JobStatus;
pub use zosmf::ZosmfBatch;

/// Convenience result type for batch operations.
pub type Result<T> = std::result::Result<T, error::BatchError>;
