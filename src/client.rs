//! HTTP transport: the production [`Uploader`].
//!
//! Posts the raw payload to `{base_uri}upload?filename=<name>` and decodes
//! the `{"FileId", "FileExt", "FileName"}` record. Errors are mapped once,
//! here, into [`TransportError`]; callers above never see `reqwest` types.

use crate::config::ClientConfig;
use crate::error::{ConfigError, TransportError};
use crate::upload::{UploadResult, Uploader};
use reqwest::blocking::{Client, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Blocking ConvertAPI upload client.
#[derive(Debug, Clone)]
pub struct HttpUploader {
    http: Client,
    upload_url: Url,
    config: ClientConfig,
}

impl HttpUploader {
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let upload_url = config.endpoint("upload")?;
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.upload_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ConfigError::Invalid(format!("HTTP client: {e}")))?;
        Ok(Self {
            http,
            upload_url,
            config,
        })
    }

    /// Client configured from `CONVERT_API_SECRET` / `CONVERT_API_BASE_URI`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn upload_url(&self) -> &Url {
        &self.upload_url
    }

    fn map_send_error(&self, e: reqwest::Error) -> TransportError {
        let url = self.upload_url.to_string();
        if e.is_timeout() {
            TransportError::Timeout {
                url,
                secs: self.config.upload_timeout_secs,
            }
        } else {
            TransportError::Connection {
                url,
                reason: e.to_string(),
            }
        }
    }
}

impl Uploader for HttpUploader {
    fn upload(&self, payload: &[u8], name: &str) -> Result<UploadResult, TransportError> {
        debug!("POST {} filename={}", self.upload_url, name);

        let mut request = self
            .http
            .post(self.upload_url.clone())
            .query(&[("filename", name)])
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(payload.to_vec());
        if let Some(ref secret) = self.config.api_credentials {
            request = request.header(AUTHORIZATION, format!("Bearer {secret}"));
        }

        let response = request.send().map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        if !status.is_success() {
            let message = error_message(response);
            warn!("Upload of '{}' failed: HTTP {}", name, status);
            return Err(status_error(status, message));
        }

        response
            .json::<UploadResult>()
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }
}

/// Error body returned by the service on 4xx/5xx.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ServiceError {
    message: String,
}

/// Prefer the JSON `Message` field; fall back to the raw body text.
fn error_message(response: Response) -> String {
    let body = response.text().unwrap_or_default();
    parse_error_body(&body)
}

fn parse_error_body(body: &str) -> String {
    match serde_json::from_str::<ServiceError>(body) {
        Ok(err) => err.message,
        Err(_) if body.trim().is_empty() => "no response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

fn status_error(status: StatusCode, message: String) -> TransportError {
    let code = status.as_u16();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TransportError::Unauthorized {
            status: code,
            message,
        },
        s if s.is_server_error() => TransportError::Server {
            status: code,
            message,
        },
        _ => TransportError::Client {
            status: code,
            message,
        },
    }
}
