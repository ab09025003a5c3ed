use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;

/// A file upload carried as a two-part multipart body
#[derive(Debug, Clone)]
pub struct MultipartUpload {
    /// JSON metadata sent as the `attachment` part
    pub metadata: Value,
    /// File name announced for the `file` part
    pub file_name: String,
    /// Raw file content
    pub file_bytes: Vec<u8>,
}

impl MultipartUpload {
    pub fn new(metadata: Value, file_name: impl Into<String>, file_bytes: Vec<u8>) -> Self {
        Self {
            metadata,
            file_name: file_name.into(),
            file_bytes,
        }
    }
}

/// CatalogTransport port executing single requests against the catalog REST API
///
/// Paths are either relative to the configured REST base URL (`/releases/...`)
/// or absolute resource hrefs taken from `_links`, which are used unchanged.
/// Implementations supply authentication headers and map every status outside
/// 2xx to `CatalogError::RequestFailed`.
///
/// # Async Support
/// Implementations must be `Send + Sync` so one transport can be shared by
/// all adapters of a connection.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// Fetches a JSON resource
    ///
    /// # Returns
    /// `None` for 404 and for a 2xx response without body
    ///
    /// # Errors
    /// Returns an error for any other non-2xx status or an unparsable body
    async fn get(&self, path: &str) -> Result<Option<Value>>;

    /// Creates a resource and returns the server's representation of it
    async fn post(&self, path: &str, body: &Value) -> Result<Value>;

    /// Partially updates a resource and returns the server's representation of it
    async fn patch(&self, path: &str, body: &Value) -> Result<Value>;

    /// Uploads a file with its JSON metadata as multipart body
    ///
    /// # Returns
    /// The updated owning entity
    async fn upload_multipart(&self, path: &str, upload: MultipartUpload) -> Result<Value>;

    /// Downloads a binary resource
    ///
    /// # Errors
    /// Returns `CatalogError::NoContent` when the body is empty
    async fn download_binary(&self, path: &str) -> Result<Vec<u8>>;
}
