//! Client error types and gateway error-body parsing.

use serde::Deserialize;
use thiserror::Error;

/// Errors produced by gateway REST calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure: connect, TLS, timeout, body read.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The gateway answered with a status outside the expected set.
    #[error("unexpected status {status} from {method} {url}: {message}")]
    UnexpectedStatus {
        method: &'static str,
        url: String,
        status: reqwest::StatusCode,
        message: String,
    },

    /// A request body could not be encoded as JSON.
    #[error("cannot encode request body for {url}: {source}")]
    Encode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response body did not decode as the expected JSON shape.
    #[error("invalid response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A text response body was not valid UTF-8.
    #[error("response body from {url} is not valid UTF-8 text")]
    NotText { url: String },

    /// Configuration could not be loaded.
    #[error("cannot load configuration from {path}: {reason}")]
    Config { path: String, reason: String },
}

/// Validation failures for z/OS names and paths.
///
/// Raised before any request is issued; an invalid name never reaches
/// the gateway.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("job name '{0}' must be 1-8 characters")]
    JobNameLength(String),

    #[error("job name '{0}' contains an invalid character")]
    JobNameCharacter(String),

    #[error("dataset name '{0}' must be 1-44 characters")]
    DatasetNameLength(String),

    #[error("dataset name '{0}' has an invalid qualifier")]
    DatasetNameQualifier(String),

    #[error("member name '{0}' must be 1-8 characters")]
    MemberNameLength(String),

    #[error("member name '{0}' contains an invalid character")]
    MemberNameCharacter(String),

    #[error("UNIX path '{0}' must be absolute")]
    UnixPathNotAbsolute(String),
}

/// z/OSMF error body — the IBM JSON error format:
/// `{"rc":…,"reason":…,"category":…,"message":"…"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ZosmfErrorBody {
    pub rc: i32,
    pub reason: i32,
    pub category: i32,
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(default)]
    pub stack: Option<String>,
}

/// RSE API error body: `{"status":"…","message":"…"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RseErrorBody {
    #[serde(default)]
    pub status: Option<String>,
    pub message: String,
}

const SNIPPET_LIMIT: usize = 200;

/// Best-effort extraction of a server-supplied message from an error body.
///
/// Tries the z/OSMF format first, then the RSE format, then falls back to a
/// truncated body snippet so the raw response is never lost.
pub fn server_message(body: &[u8]) -> String {
    if let Ok(zosmf) = serde_json::from_slice::<ZosmfErrorBody>(body) {
        return format!(
            "rc={}, reason={}, category={}: {}",
            zosmf.rc, zosmf.reason, zosmf.category, zosmf.message
        );
    }
    if let Ok(rse) = serde_json::from_slice::<RseErrorBody>(body) {
        return match rse.status {
            Some(status) => format!("{}: {}", status, rse.message),
            None => rse.message,
        };
    }
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "(empty body)".to_string();
    }
    let mut snippet: String = trimmed.chars().take(SNIPPET_LIMIT).collect();
    if trimmed.chars().count() > SNIPPET_LIMIT {
        snippet.push_str("...");
    }
    snippet
}
