//! Thin HTTP wrapper over the verification backend. Three operations, one
//! request/response exchange each, no retries at this layer.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use shared::{
    domain::Document,
    error::GatewayError,
    protocol::{QueryRequest, VerificationReply},
};
use url::Url;

use crate::query::VerificationResult;

/// Default name of the message field inside backend error bodies. Only the
/// upload path is confirmed to use it, so it stays configurable.
pub const DEFAULT_ERROR_FIELD: &str = "error";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    base_url: String,
    error_field: String,
}

impl GatewayConfig {
    /// Validates and normalizes the backend base endpoint. The endpoint is
    /// always an explicit parameter so the client stays portable across
    /// deployments (loopback in dev, named host elsewhere).
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let raw = base_url.as_ref();
        let parsed = Url::parse(raw).with_context(|| format!("invalid backend url: {raw}"))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(anyhow!("backend url must be http or https: {raw}"));
        }
        Ok(Self {
            base_url: raw.trim_end_matches('/').to_string(),
            error_field: DEFAULT_ERROR_FIELD.to_string(),
        })
    }

    pub fn with_error_field(mut self, field: impl Into<String>) -> Self {
        self.error_field = field.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// A file the user picked for ingestion. `title` overrides the display name;
/// when absent the backend stores the filename.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub mime_type: Option<String>,
    pub title: Option<String>,
}

impl UploadFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
            mime_type: None,
            title: None,
        }
    }
}

/// Seam between the state machines and the wire. Production uses
/// [`HttpGateway`]; tests swap in in-process fakes.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    async fn list_documents(&self) -> Result<Vec<Document>, GatewayError>;
    async fn upload_document(&self, file: UploadFile) -> Result<(), GatewayError>;
    async fn submit_query(&self, text: &str) -> Result<VerificationResult, GatewayError>;
}

pub struct HttpGateway {
    http: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}/", self.config.base_url)
    }

    /// Pulls the configured message field out of a backend error body, if
    /// the body is JSON and carries one.
    async fn error_body_message(&self, response: Response) -> Option<String> {
        let bytes = response.bytes().await.ok()?;
        let body: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
        body.get(&self.config.error_field)
            .and_then(|value| value.as_str())
            .map(str::to_string)
    }
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn list_documents(&self) -> Result<Vec<Document>, GatewayError> {
        let response = self
            .http
            .get(self.endpoint("documents"))
            .send()
            .await
            .map_err(|err| GatewayError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Network(format!(
                "document list request returned status {status}"
            )));
        }

        response
            .json::<Vec<Document>>()
            .await
            .map_err(|err| GatewayError::Network(format!("invalid document list payload: {err}")))
    }

    async fn upload_document(&self, file: UploadFile) -> Result<(), GatewayError> {
        let title = file.title.clone().unwrap_or_else(|| file.filename.clone());
        let mut part = multipart::Part::bytes(file.bytes).file_name(file.filename.clone());
        if let Some(mime) = &file.mime_type {
            part = part.mime_str(mime).map_err(|err| GatewayError::Upload {
                message: format!("invalid upload content type {mime}: {err}"),
            })?;
        }
        let form = multipart::Form::new().part("file", part).text("title", title);

        let response = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|err| GatewayError::Upload {
                message: format!("upload failed: {err}"),
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = match self.error_body_message(response).await {
            Some(backend_message) => backend_message,
            None => format!("upload failed with status {status}"),
        };
        Err(GatewayError::Upload { message })
    }

    async fn submit_query(&self, text: &str) -> Result<VerificationResult, GatewayError> {
        let response = self
            .http
            .post(self.endpoint("query"))
            .json(&QueryRequest {
                query: text.to_string(),
            })
            .send()
            .await
            .map_err(|err| GatewayError::Query {
                message: format!("query request failed: {err}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = match self.error_body_message(response).await {
                Some(backend_message) => backend_message,
                None => format!("query failed with status {status}"),
            };
            return Err(GatewayError::Query { message });
        }

        let reply =
            response
                .json::<VerificationReply>()
                .await
                .map_err(|err| GatewayError::Query {
                    message: format!("invalid verification reply: {err}"),
                })?;
        VerificationResult::from_wire(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_normalizes_trailing_slash() {
        let config = GatewayConfig::new("http://127.0.0.1:8000/api/").expect("config");
        assert_eq!(config.base_url(), "http://127.0.0.1:8000/api");
    }

    #[test]
    fn config_rejects_non_http_schemes() {
        assert!(GatewayConfig::new("ftp://backend/api").is_err());
        assert!(GatewayConfig::new("not a url").is_err());
    }

    #[test]
    fn endpoints_carry_trailing_slash() {
        let gateway = HttpGateway::new(GatewayConfig::new("http://host/api").expect("config"));
        assert_eq!(gateway.endpoint("documents"), "http://host/api/documents/");
        assert_eq!(gateway.endpoint("query"), "http://host/api/query/");
    }

    #[test]
    fn upload_title_defaults_to_filename() {
        let file = UploadFile::new("notes.pdf", vec![1, 2, 3]);
        assert_eq!(file.title, None);
        assert_eq!(file.filename, "notes.pdf");
    }
}
