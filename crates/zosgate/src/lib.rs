//! # z/OS Gateway Client Core
//!
//! Shared plumbing for clients of the z/OS system-management REST gateways
//! (z/OSMF and RSE API): configuration, credentials, the REST transport,
//! gateway error-body parsing, and z/OS name validation.
//!
//! The higher-level managers live in `zosgate-batch` (batch jobs) and
//! `zosgate-file` (datasets, VSAM, UNIX files); both are built on the
//! [`RestClient`] defined here.
//!
//! ## Example
//!
//! ```rust,no_run
//! use zosgate::{RestClient, ZosgateConfig};
//!
//! # async fn example() -> zosgate::Result<()> {
//! let config = ZosgateConfig::from_file("zosgate.toml")?;
//! let client = RestClient::new(&config.gateway)?;
//! let response = client.get("/zosmf/restjobs/jobs?owner=*", &[]).await?;
//! println!("status {}", response.status());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod credentials;
pub mod error;
pub mod names;
pub mod transport;

pub use config::{BatchConfig, FileConfig, GatewayConfig, GatewayKind, ZosgateConfig};
pub use credentials::Credentials;
pub use error::{ClientError, NameError};
pub use transport::{GatewayResponse, RestClient};

pub use reqwest::StatusCode;

/// Convenience result type for core gateway operations.
pub type Result<T> = std::result::Result<T, error::ClientError>;
