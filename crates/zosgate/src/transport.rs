//! REST transport over the gateway HTTP endpoint.
//!
//! [`RestClient`] issues one request per call — no retries, no redirects
//! worth speaking of — and hands back a [`GatewayResponse`] carrying the
//! status and raw body plus enough context to produce a useful error when
//! the status is outside the caller's expected set.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::GatewayConfig;
use crate::credentials::Credentials;
use crate::error::{server_message, ClientError};

/// Header z/OSMF requires on every request to prove the caller is not a
/// browser form. Harmless to other gateways.
const CSRF_HEADER: (&str, &str) = ("X-CSRF-ZOSMF-HEADER", "true");

/// A thin client for one gateway endpoint.
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: String,
    http: reqwest::Client,
    credentials: Credentials,
}

/// Status and raw body of a gateway response, with request context for
/// error reporting.
#[derive(Debug)]
pub struct GatewayResponse {
    method: &'static str,
    url: String,
    status: StatusCode,
    body: Vec<u8>,
}

impl RestClient {
    /// Build a client from gateway configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|e| ClientError::Http {
                url: config.base_url(),
                source: e,
            })?;
        Ok(Self {
            base_url: config.base_url(),
            http,
            credentials: config.credentials.clone(),
        })
    }

    /// Build a client against an explicit base URL (tests, discovery).
    pub fn with_base_url(
        base_url: impl Into<String>,
        credentials: Credentials,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into();
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Http {
                url: base_url.clone(),
                source: e,
            })?;
        Ok(Self {
            base_url,
            http,
            credentials,
        })
    }

    /// The gateway base URL, no trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a resource.
    pub async fn get(
        &self,
        path: &str,
        headers: &[(&str, &str)],
    ) -> Result<GatewayResponse, ClientError> {
        self.execute(Method::GET, "GET", path, Payload::None, headers)
            .await
    }

    /// PUT a plain-text body (JCL submit, dataset content).
    pub async fn put_text(
        &self,
        path: &str,
        body: String,
        headers: &[(&str, &str)],
    ) -> Result<GatewayResponse, ClientError> {
        self.execute(Method::PUT, "PUT", path, Payload::Text(body), headers)
            .await
    }

    /// PUT a raw byte body (binary dataset/file content).
    pub async fn put_bytes(
        &self,
        path: &str,
        body: Vec<u8>,
        headers: &[(&str, &str)],
    ) -> Result<GatewayResponse, ClientError> {
        self.execute(Method::PUT, "PUT", path, Payload::Bytes(body), headers)
            .await
    }

    /// PUT a JSON body.
    pub async fn put_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        headers: &[(&str, &str)],
    ) -> Result<GatewayResponse, ClientError> {
        let json = serde_json::to_vec(body).map_err(|e| ClientError::Encode {
            url: format!("{}{}", self.base_url, path),
            source: e,
        })?;
        self.execute(Method::PUT, "PUT", path, Payload::Json(json), headers)
            .await
    }

    /// POST a JSON body.
    pub async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        headers: &[(&str, &str)],
    ) -> Result<GatewayResponse, ClientError> {
        let json = serde_json::to_vec(body).map_err(|e| ClientError::Encode {
            url: format!("{}{}", self.base_url, path),
            source: e,
        })?;
        self.execute(Method::POST, "POST", path, Payload::Json(json), headers)
            .await
    }

    /// DELETE a resource.
    pub async fn delete(
        &self,
        path: &str,
        headers: &[(&str, &str)],
    ) -> Result<GatewayResponse, ClientError> {
        self.execute(Method::DELETE, "DELETE", path, Payload::None, headers)
            .await
    }

    async fn execute(
        &self,
        method: Method,
        method_name: &'static str,
        path: &str,
        payload: Payload,
        headers: &[(&str, &str)],
    ) -> Result<GatewayResponse, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = method_name, %url, "gateway request");

        let mut request = self
            .http
            .request(method, &url)
            .header("Authorization", self.credentials.authorization())
            .header(CSRF_HEADER.0, CSRF_HEADER.1);

        request = match payload {
            Payload::None => request,
            Payload::Text(text) => request.header("Content-Type", "text/plain").body(text),
            Payload::Bytes(bytes) => request
                .header("Content-Type", "application/octet-stream")
                .body(bytes),
            Payload::Json(json) => request
                .header("Content-Type", "application/json")
                .body(json),
        };
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|e| ClientError::Http {
            url: url.clone(),
            source: e,
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Http {
                url: url.clone(),
                source: e,
            })?
            .to_vec();

        tracing::debug!(method = method_name, %url, status = status.as_u16(), bytes = body.len(), "gateway response");

        Ok(GatewayResponse {
            method: method_name,
            url,
            status,
            body,
        })
    }
}

enum Payload {
    None,
    Text(String),
    Bytes(Vec<u8>),
    Json(Vec<u8>),
}

impl GatewayResponse {
    /// HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Fail unless the status is one of the expected codes.
    ///
    /// The error message carries the status line and the server's message
    /// fields parsed out of the error body.
    pub fn expect(self, expected: &[StatusCode]) -> Result<Self, ClientError> {
        if expected.contains(&self.status) {
            Ok(self)
        } else {
            Err(ClientError::UnexpectedStatus {
                method: self.method,
                url: self.url,
                status: self.status,
                message: server_message(&self.body),
            })
        }
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_slice(&self.body).map_err(|e| ClientError::Decode {
            url: self.url.clone(),
            source: e,
        })
    }

    /// The body as UTF-8 text.
    pub fn text(&self) -> Result<String, ClientError> {
        String::from_utf8(self.body.clone()).map_err(|_| ClientError::NotText {
            url: self.url.clone(),
        })
    }

    /// The raw body bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }

    #[cfg(test)]
    fn fake(method: &'static str, url: &str, status: StatusCode, body: &[u8]) -> Self {
        Self {
            method,
            url: url.to_string(),
            status,
            body: body.to_vec(),
        }
    }
}
