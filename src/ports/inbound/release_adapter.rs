use crate::application::dto::{AttachmentUploadRequest, AttachmentUploadResult};
use crate::catalog::domain::{Component, Release, SparseAttachment, SparseRelease};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// ReleaseAdapter - Inbound port resolving releases and transferring their attachments
///
/// This is the collaborator interface external pipeline steps call with fully
/// built releases; the returned releases are the server-reconciled versions.
#[async_trait]
pub trait ReleaseAdapter: Send + Sync {
    /// Creates a release under its (possibly newly created) component
    ///
    /// # Errors
    /// Returns an error if:
    /// - The candidate is invalid or already carries a server identifier
    /// - The component already lists a release with the same version
    ///   (`CatalogError::DuplicateRelease`)
    /// - The create request fails
    async fn create_release(&self, release: &Release) -> Result<Release>;

    /// Fetches the full release by its identifier, `None` if unknown
    async fn get_release_by_id(&self, release_id: &str) -> Result<Option<Release>>;

    /// Fetches the full detail behind a sparse reference
    async fn enrich_sparse_release(&self, sparse: &SparseRelease) -> Result<Option<Release>>;

    /// Looks a release up by external identifiers
    ///
    /// # Errors
    /// Returns `CatalogError::AmbiguousMatch` when more than one release matches
    async fn get_sparse_release_by_external_ids(
        &self,
        external_ids: &BTreeMap<String, String>,
    ) -> Result<Option<SparseRelease>>;

    /// Looks a release up through its component's name and the exact version
    async fn get_sparse_release_by_name_and_version(
        &self,
        release: &Release,
    ) -> Result<Option<SparseRelease>>;

    /// Returns the full release of `component` with exactly `version`
    async fn get_release_by_version(
        &self,
        component: &Component,
        version: &str,
    ) -> Result<Option<Release>>;

    /// Resolves a local release to its remote counterpart
    ///
    /// External identifiers are tried first, then component name and version.
    async fn resolve_release(&self, candidate: &Release) -> Result<Option<Release>>;

    /// Returns the remote release for `candidate`, creating it when absent
    ///
    /// # Arguments
    /// * `candidate` - Locally built release
    /// * `update_existing` - Merge the candidate into an existing remote copy and patch it
    async fn get_or_create_release(
        &self,
        candidate: &Release,
        update_existing: bool,
    ) -> Result<Release>;

    /// Patches an existing release with the given state
    async fn update_release(&self, release: &Release) -> Result<Release>;

    /// Uploads files to the target release one at a time
    ///
    /// Never fails as a whole: every item ends up as success or failure in the
    /// returned result, including items skipped after cancellation.
    async fn upload_attachments(&self, request: AttachmentUploadRequest) -> AttachmentUploadResult;

    /// Downloads one attachment of `release` into `target_dir`
    ///
    /// # Returns
    /// The written path, or `None` when the release has no self link
    ///
    /// # Errors
    /// Returns the download or write failure; batch callers isolate it per item
    async fn download_attachment(
        &self,
        release: &Release,
        attachment: &SparseAttachment,
        target_dir: &Path,
    ) -> Result<Option<PathBuf>>;
}
