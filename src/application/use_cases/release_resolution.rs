use super::attachment_transfer::AttachmentTransfer;
use super::component_resolution::CatalogComponentAdapter;
use crate::application::dto::{AttachmentUploadRequest, AttachmentUploadResult};
use crate::application::rest::ReleaseClient;
use crate::catalog::domain::{Component, Release, SparseAttachment, SparseRelease};
use crate::catalog::services::ReleaseMatcher;
use crate::ports::inbound::{ComponentAdapter, ReleaseAdapter};
use crate::ports::outbound::CatalogTransport;
use crate::shared::error::CatalogError;
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// CatalogReleaseAdapter - get-or-create resolution of releases
///
/// Lookup order for a local release:
/// 1. search by external ids (more than one hit is fatal)
/// 2. component with the release name, embedded release with the exact version
///
/// # Type Parameters
/// * `T` - CatalogTransport implementation shared with the other adapters
pub struct CatalogReleaseAdapter<T> {
    client: ReleaseClient<T>,
    component_adapter: CatalogComponentAdapter<T>,
    attachments: Arc<AttachmentTransfer<T>>,
}

impl<T> Clone for CatalogReleaseAdapter<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            component_adapter: self.component_adapter.clone(),
            attachments: Arc::clone(&self.attachments),
        }
    }
}

impl<T: CatalogTransport> CatalogReleaseAdapter<T> {
    pub fn new(transport: Arc<T>, component_adapter: CatalogComponentAdapter<T>) -> Self {
        let client = ReleaseClient::new(transport);
        Self {
            attachments: Arc::new(AttachmentTransfer::new(client.clone())),
            client,
            component_adapter,
        }
    }

    fn require_id(release: &Release) -> Result<String> {
        release.id().ok_or_else(|| {
            CatalogError::invalid_entity(
                "release",
                format!(
                    "{}:{} has no identifier; it was never created",
                    release.name(),
                    release.version()
                ),
            )
            .into()
        })
    }
}

#[async_trait]
impl<T: CatalogTransport> ReleaseAdapter for CatalogReleaseAdapter<T> {
    async fn create_release(&self, release: &Release) -> Result<Release> {
        release.validate()?;
        if release.id().is_some() {
            return Err(CatalogError::invalid_entity(
                "release",
                format!(
                    "{}:{} already has an identifier and cannot be created again",
                    release.name(),
                    release.version()
                ),
            )
            .into());
        }

        let component = self
            .component_adapter
            .get_or_create_component(&Component::from_release(release))
            .await?;
        let component_id = component.id().ok_or_else(|| {
            CatalogError::invalid_entity(
                "component",
                format!("'{}' has no identifier", component.name()),
            )
        })?;

        if ReleaseMatcher::find_release_by_version(&component, release.version()).is_some() {
            return Err(CatalogError::DuplicateRelease {
                name: release.name().to_string(),
                version: release.version().to_string(),
                component: component_id,
            }
            .into());
        }

        let mut candidate = release.clone();
        candidate.set_component_id(component_id);
        let created = self.client.create_release(&candidate).await?;
        tracing::info!(
            name = created.name(),
            version = created.version(),
            id = ?created.id(),
            "Created release"
        );
        Ok(created)
    }

    async fn get_release_by_id(&self, release_id: &str) -> Result<Option<Release>> {
        self.client.get_release(release_id).await
    }

    async fn enrich_sparse_release(&self, sparse: &SparseRelease) -> Result<Option<Release>> {
        match sparse.id() {
            Some(id) => self.client.get_release(&id).await,
            None => Ok(None),
        }
    }

    async fn get_sparse_release_by_external_ids(
        &self,
        external_ids: &BTreeMap<String, String>,
    ) -> Result<Option<SparseRelease>> {
        if external_ids.is_empty() {
            return Ok(None);
        }
        let candidates = self.client.search_by_external_ids(external_ids).await?;
        ReleaseMatcher::select_unique_by_external_ids(candidates, external_ids)
    }

    async fn get_sparse_release_by_name_and_version(
        &self,
        release: &Release,
    ) -> Result<Option<SparseRelease>> {
        let component = self
            .component_adapter
            .get_component_by_name(release.name())
            .await?;
        Ok(component.and_then(|component| {
            ReleaseMatcher::find_release_by_version(&component, release.version()).cloned()
        }))
    }

    async fn get_release_by_version(
        &self,
        component: &Component,
        version: &str,
    ) -> Result<Option<Release>> {
        match ReleaseMatcher::find_release_by_version(component, version) {
            Some(sparse) => self.enrich_sparse_release(sparse).await,
            None => Ok(None),
        }
    }

    async fn resolve_release(&self, candidate: &Release) -> Result<Option<Release>> {
        candidate.validate()?;

        let sparse = match self
            .get_sparse_release_by_external_ids(candidate.external_ids())
            .await?
        {
            Some(found) => Some(found),
            None => {
                self.get_sparse_release_by_name_and_version(candidate)
                    .await?
            }
        };

        match sparse {
            Some(sparse) => self.enrich_sparse_release(&sparse).await,
            None => Ok(None),
        }
    }

    async fn get_or_create_release(
        &self,
        candidate: &Release,
        update_existing: bool,
    ) -> Result<Release> {
        match self.resolve_release(candidate).await? {
            Some(remote) if update_existing => {
                self.update_release(&remote.merge_with(candidate)).await
            }
            Some(remote) => Ok(remote),
            None => self.create_release(candidate).await,
        }
    }

    async fn update_release(&self, release: &Release) -> Result<Release> {
        let id = Self::require_id(release)?;
        let updated = self.client.patch_release(&id, release).await?;
        tracing::debug!(id = %id, "Updated release");
        Ok(updated)
    }

    async fn upload_attachments(&self, request: AttachmentUploadRequest) -> AttachmentUploadResult {
        self.attachments.upload_attachments(request).await
    }

    async fn download_attachment(
        &self,
        release: &Release,
        attachment: &SparseAttachment,
        target_dir: &Path,
    ) -> Result<Option<PathBuf>> {
        self.attachments
            .download_attachment(release, attachment, target_dir)
            .await
    }
}
