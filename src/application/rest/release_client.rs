use super::hal;
use crate::catalog::domain::{AttachmentMetadata, Release, SparseRelease};
use crate::ports::outbound::{CatalogTransport, MultipartUpload};
use crate::shared::error::CatalogError;
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use std::collections::BTreeMap;
use std::sync::Arc;

const RELEASES_ENDPOINT: &str = "/releases";
const SEARCH_BY_EXTERNAL_IDS: &str = "/releases/searchByExternalIds";
const EMBEDDED_RELEASES: &str = "sw360:releases";
const ATTACHMENTS_SEGMENT: &str = "attachments";

/// Typed access to the `/releases` endpoints and release attachments
pub struct ReleaseClient<T> {
    transport: Arc<T>,
}

impl<T> Clone for ReleaseClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: CatalogTransport> ReleaseClient<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// `GET /releases/{id}`, `None` for unknown ids
    pub async fn get_release(&self, release_id: &str) -> Result<Option<Release>> {
        validate_url_component(release_id, "Release id")?;
        let path = format!("{}/{}", RELEASES_ENDPOINT, release_id);
        self.transport
            .get(&path)
            .await?
            .map(|body| hal::entity(body, "release"))
            .transpose()
    }

    /// `GET /releases/searchByExternalIds?k=v&...`
    pub async fn search_by_external_ids(
        &self,
        external_ids: &BTreeMap<String, String>,
    ) -> Result<Vec<SparseRelease>> {
        let path = format!(
            "{}?{}",
            SEARCH_BY_EXTERNAL_IDS,
            external_ids_query(external_ids)
        );
        let body = self.transport.get(&path).await?;
        hal::embedded_list(body, EMBEDDED_RELEASES)
    }

    /// `POST /releases`
    pub async fn create_release(&self, release: &Release) -> Result<Release> {
        let body = hal::request_body(release)?;
        let created: Release =
            hal::entity(self.transport.post(RELEASES_ENDPOINT, &body).await?, "release")?;
        if created.id().is_none() {
            return Err(CatalogError::NoContent {
                endpoint: RELEASES_ENDPOINT.to_string(),
            }
            .into());
        }
        Ok(created)
    }

    /// `PATCH /releases/{id}`
    pub async fn patch_release(&self, release_id: &str, release: &Release) -> Result<Release> {
        validate_url_component(release_id, "Release id")?;
        let path = format!("{}/{}", RELEASES_ENDPOINT, release_id);
        let body = hal::request_body(release)?;
        hal::entity(self.transport.patch(&path, &body).await?, "release")
    }

    /// `POST <release href>/attachments` with metadata and file parts
    ///
    /// # Returns
    /// The release as updated by the server
    pub async fn upload_attachment(
        &self,
        release_href: &str,
        metadata: &AttachmentMetadata,
        file_bytes: Vec<u8>,
    ) -> Result<Release> {
        let path = format!("{}/{}", release_href.trim_end_matches('/'), ATTACHMENTS_SEGMENT);
        let upload = MultipartUpload::new(
            serde_json::to_value(metadata)?,
            metadata.filename.clone(),
            file_bytes,
        );
        hal::entity(self.transport.upload_multipart(&path, upload).await?, "release")
    }

    /// `GET <release href>/attachments/{attachmentId}` returning the raw content
    pub async fn download_attachment(
        &self,
        release_href: &str,
        attachment_id: &str,
    ) -> Result<Vec<u8>> {
        validate_url_component(attachment_id, "Attachment id")?;
        let path = format!(
            "{}/{}/{}",
            release_href.trim_end_matches('/'),
            ATTACHMENTS_SEGMENT,
            attachment_id
        );
        self.transport.download_binary(&path).await
    }
}

/// Encodes external ids as query parameters in key order
fn external_ids_query(external_ids: &BTreeMap<String, String>) -> String {
    external_ids
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
