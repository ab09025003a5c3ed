use super::authentication_client::AccessToken;
use crate::config::ClientConfig;
use crate::ports::outbound::{CatalogTransport, MultipartUpload};
use crate::shared::error::{CatalogError, STATUS_NOT_FOUND};
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, Url};
use serde_json::Value;

const HAL_JSON: &str = "application/hal+json";
const JSON: &str = "application/json";
const OCTET_STREAM: &str = "application/octet-stream";
const MAX_ERROR_BODY_CHARS: usize = 512;

/// ReqwestTransport adapter executing catalog requests over HTTP
///
/// This adapter implements the CatalogTransport port on top of an async
/// reqwest client. Every request carries the bearer token, the configured
/// timeout and, when enabled, goes through the configured proxy.
///
/// Absolute hrefs are only followed when they share the origin of the
/// configured REST URL, so the token never leaves the catalog host.
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
    base: Url,
    token: AccessToken,
}

impl ReqwestTransport {
    /// Creates a transport for the REST API configured in `config`
    ///
    /// # Errors
    /// Returns an error if the proxy URL is invalid or the client cannot be built
    pub fn new(config: &ClientConfig, token: AccessToken) -> Result<Self> {
        let client = super::http_client_builder(config)?.build()?;
        Self::with_client(client, &config.rest_url, token)
    }

    fn with_client(client: reqwest::Client, rest_url: &str, token: AccessToken) -> Result<Self> {
        let base_url = rest_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .with_context(|| format!("Invalid rest_url '{}'", rest_url))?;
        Ok(Self {
            client,
            base_url,
            base,
            token,
        })
    }

    /// Resolves a relative API path or checks and passes an absolute href through
    ///
    /// # Errors
    /// Returns `CatalogError::UntrustedUrl` if an absolute href has another
    /// scheme, host or port than the REST URL
    fn url(&self, path: &str) -> Result<String> {
        if path.starts_with("http://") || path.starts_with("https://") {
            let target =
                Url::parse(path).with_context(|| format!("Invalid href '{}'", path))?;
            if target.origin() != self.base.origin() {
                return Err(CatalogError::UntrustedUrl {
                    url: path.to_string(),
                    origin: self.base.origin().ascii_serialization(),
                }
                .into());
            }
            Ok(path.to_string())
        } else if path.starts_with('/') {
            Ok(format!("{}{}", self.base_url, path))
        } else {
            Ok(format!("{}/{}", self.base_url, path))
        }
    }

    async fn send(&self, method: &str, url: &str, request: RequestBuilder) -> Result<Response> {
        tracing::debug!(method, url, "Sending catalog request");
        let response = request.bearer_auth(self.token.as_str()).send().await?;
        tracing::debug!(method, url, status = response.status().as_u16(), "Catalog response");
        Ok(response)
    }

    async fn send_json(&self, method: &str, url: String, request: RequestBuilder) -> Result<Value> {
        let response = self
            .send(method, &url, request.header(reqwest::header::ACCEPT, HAL_JSON))
            .await?;
        let response = ensure_success(&url, response).await?;
        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(CatalogError::NoContent { endpoint: url }.into());
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Maps a non-2xx response to `CatalogError::RequestFailed`
async fn ensure_success(url: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .map(|body| body.chars().take(MAX_ERROR_BODY_CHARS).collect())
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or_default().to_string());

    Err(CatalogError::RequestFailed {
        status: status.as_u16(),
        endpoint: url.to_string(),
        message,
    }
    .into())
}

#[async_trait]
impl CatalogTransport for ReqwestTransport {
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        let url = self.url(path)?;
        let request = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, HAL_JSON);
        let response = self.send("GET", &url, request).await?;

        if response.status().as_u16() == STATUS_NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(&url, response).await?;
        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&body)?))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path)?;
        let request = self.client.post(&url).json(body);
        self.send_json("POST", url, request).await
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path)?;
        let request = self.client.patch(&url).json(body);
        self.send_json("PATCH", url, request).await
    }

    async fn upload_multipart(&self, path: &str, upload: MultipartUpload) -> Result<Value> {
        let url = self.url(path)?;
        let metadata = Part::text(serde_json::to_string(&upload.metadata)?).mime_str(JSON)?;
        let file = Part::bytes(upload.file_bytes)
            .file_name(upload.file_name)
            .mime_str(OCTET_STREAM)?;
        let form = Form::new().part("attachment", metadata).part("file", file);

        let request = self.client.post(&url).multipart(form);
        self.send_json("POST", url, request).await
    }

    async fn download_binary(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.url(path)?;
        let request = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, OCTET_STREAM);
        let response = self.send("GET", &url, request).await?;
        let response = ensure_success(&url, response).await?;

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(CatalogError::NoContent { endpoint: url }.into());
        }
        Ok(body.to_vec())
    }
}
