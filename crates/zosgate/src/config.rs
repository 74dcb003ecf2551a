//! Client configuration — gateway endpoint, credentials, batch and file
//! manager settings, loadable from TOML.

use serde::{Deserialize, Serialize};

use crate::credentials::Credentials;
use crate::error::ClientError;

/// Which gateway dialect an endpoint speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayKind {
    /// z/OSMF REST services (`/zosmf/...`).
    Zosmf,
    /// RSE API REST services (`/rseapi/api/v1/...`).
    Rseapi,
}

/// Top-level client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZosgateConfig {
    /// Gateway endpoint settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
    /// Batch job manager settings.
    #[serde(default)]
    pub batch: BatchConfig,
    /// File manager settings.
    #[serde(default)]
    pub file: FileConfig,
}

/// Gateway endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Gateway dialect.
    #[serde(default = "default_kind")]
    pub kind: GatewayKind,
    /// URL scheme (http or https).
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Gateway hostname.
    #[serde(default = "default_host")]
    pub host: String,
    /// Gateway port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Credentials presented on every request.
    #[serde(default = "default_credentials")]
    pub credentials: Credentials,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Whether to verify the gateway's TLS certificate.
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
}

/// Batch job manager configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Prefix for generated job names (padded with a random suffix).
    #[serde(default = "default_jobname_prefix")]
    pub jobname_prefix: String,
    /// Accounting information for generated JOB cards.
    #[serde(default = "default_account")]
    pub account: String,
    /// Programmer name for generated JOB cards.
    #[serde(default = "default_programmer")]
    pub programmer: String,
    /// Input class for generated JOB cards.
    #[serde(default = "default_input_class")]
    pub input_class: String,
    /// MSGCLASS for generated JOB cards.
    #[serde(default = "default_msg_class")]
    pub msg_class: String,
    /// Seconds between job status polls.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Maximum seconds to poll before a job is declared overdue.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_seconds: u64,
}

/// File manager configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// High-level qualifier for scratch datasets (VSAM REPRO staging).
    #[serde(default = "default_scratch_hlq")]
    pub scratch_hlq: String,
    /// Default directory creation mode, symbolic.
    #[serde(default = "default_directory_mode")]
    pub directory_mode: String,
    /// Default file creation mode, symbolic.
    #[serde(default = "default_file_mode")]
    pub file_mode: String,
}

impl GatewayConfig {
    /// Base URL for the gateway, no trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

impl ZosgateConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> std::result::Result<Self, ClientError> {
        let content = std::fs::read_to_string(path).map_err(|e| ClientError::Config {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ClientError::Config {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            scheme: default_scheme(),
            host: default_host(),
            port: default_port(),
            credentials: default_credentials(),
            request_timeout_seconds: default_request_timeout(),
            verify_tls: default_verify_tls(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            jobname_prefix: default_jobname_prefix(),
            account: default_account(),
            programmer: default_programmer(),
            input_class: default_input_class(),
            msg_class: default_msg_class(),
            poll_interval_seconds: default_poll_interval(),
            poll_timeout_seconds: default_poll_timeout(),
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            scratch_hlq: default_scratch_hlq(),
            directory_mode: default_directory_mode(),
            file_mode: default_file_mode(),
        }
    }
}

fn default_kind() -> GatewayKind {
    GatewayKind::Zosmf
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    10443
}

fn default_credentials() -> Credentials {
    Credentials::basic("IBMUSER", "SYS1")
}

fn default_request_timeout() -> u64 {
    180
}

fn default_verify_tls() -> bool {
    true
}

fn default_jobname_prefix() -> String {
    "ZGW".to_string()
}

fn default_account() -> String {
    "ACCT".to_string()
}

fn default_programmer() -> String {
    "ZOSGATE".to_string()
}

fn default_input_class() -> String {
    "A".to_string()
}

fn default_msg_class() -> String {
    "X".to_string()
}

fn default_poll_interval() -> u64 {
    3
}

fn default_poll_timeout() -> u64 {
    300
}

fn default_scratch_hlq() -> String {
    "ZOSGATE".to_string()
}

fn default_directory_mode() -> String {
    "rwxr-xr-x".to_string()
}

fn default_file_mode() -> String {
    "rw-r--r--".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ZosgateConfig::default();
        assert_eq!(config.gateway.kind, GatewayKind::Zosmf);
        assert_eq!(config.gateway.port, 10443);
        assert_eq!(config.gateway.base_url(), "https://127.0.0.1:10443");
        assert_eq!(config.batch.jobname_prefix, "ZGW");
        assert_eq!(config.batch.input_class, "A");
        assert_eq!(config.batch.msg_class, "X");
        assert_eq!(config.batch.poll_timeout_seconds, 300);
        assert_eq!(config.file.scratch_hlq, "ZOSGATE");
        assert!(config.gateway.verify_tls);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[gateway]
kind = "rseapi"
scheme = "http"
host = "mvs1.example.com"
port = 6800
request_timeout_seconds = 60
verify_tls = false

[gateway.credentials]
username = "TESTER"
password = "SECRET"

[batch]
jobname_prefix = "QA"
input_class = "B"
poll_interval_seconds = 1

[file]
scratch_hlq = "QA.TEMP"
"#;
        let config: ZosgateConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gateway.kind, GatewayKind::Rseapi);
        assert_eq!(config.gateway.base_url(), "http://mvs1.example.com:6800");
        assert_eq!(config.gateway.credentials.username(), Some("TESTER"));
        assert!(!config.gateway.verify_tls);
        assert_eq!(config.batch.jobname_prefix, "QA");
        assert_eq!(config.batch.input_class, "B");
        // Unset fields keep their defaults.
        assert_eq!(config.batch.msg_class, "X");
        assert_eq!(config.file.scratch_hlq, "QA.TEMP");
        assert_eq!(config.file.file_mode, "rw-r--r--");
    }
}
