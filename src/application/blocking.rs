use crate::application::dto::{AttachmentUploadRequest, AttachmentUploadResult, ReleaseWithSources};
use crate::application::use_cases::SourcesExporter;
use crate::adapters::outbound::filesystem::CacheCleanupReport;
use crate::catalog::domain::{Component, License, Release, SparseAttachment, SparseRelease};
use crate::ports::inbound::{ComponentAdapter, LicenseAdapter, ProjectAdapter, ReleaseAdapter};
use crate::ports::outbound::ProgressReporter;
use crate::shared::Result;
use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

/// Blocking - synchronous facade over any asynchronous adapter
///
/// Each method has the signature of the wrapped async operation minus the
/// future and blocks the calling thread until it completes. Several facades
/// can share one runtime.
///
/// Must not be called from within an async context; the runtime panics when
/// asked to block inside another runtime.
///
/// # Example
/// ```no_run
/// use sw360_adapter::prelude::*;
///
/// # fn main() -> sw360_adapter::shared::Result<()> {
/// let config = ClientConfig::with_access_token("https://sw360.example.org/resource/api", "token");
/// let runtime = Blocking::new(())?;
/// let connection = runtime.block_on(CatalogConnection::connect(&config))?;
/// let releases = Blocking::with_runtime(connection.release_adapter().clone(), runtime.runtime());
/// let release = releases.get_or_create_release(&Release::new("commons-io", "2.6"), false)?;
/// # Ok(())
/// # }
/// ```
pub struct Blocking<A> {
    inner: A,
    runtime: Arc<Runtime>,
}

impl<A> Blocking<A> {
    /// Wraps `inner` with a new single-threaded runtime
    ///
    /// # Errors
    /// Returns an error if the runtime cannot be created
    pub fn new(inner: A) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self::with_runtime(inner, Arc::new(runtime)))
    }

    /// Wraps `inner` using an existing runtime
    pub fn with_runtime(inner: A, runtime: Arc<Runtime>) -> Self {
        Self { inner, runtime }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn runtime(&self) -> Arc<Runtime> {
        Arc::clone(&self.runtime)
    }

    /// Runs any future to completion on the facade's runtime
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

impl<A: ComponentAdapter> Blocking<A> {
    pub fn create_component(&self, component: &Component) -> Result<Component> {
        self.block_on(self.inner.create_component(component))
    }

    pub fn get_component_by_id(&self, component_id: &str) -> Result<Option<Component>> {
        self.block_on(self.inner.get_component_by_id(component_id))
    }

    pub fn get_component_by_name(&self, name: &str) -> Result<Option<Component>> {
        self.block_on(self.inner.get_component_by_name(name))
    }

    pub fn get_or_create_component(&self, candidate: &Component) -> Result<Component> {
        self.block_on(self.inner.get_or_create_component(candidate))
    }
}

impl<A: ReleaseAdapter> Blocking<A> {
    pub fn create_release(&self, release: &Release) -> Result<Release> {
        self.block_on(self.inner.create_release(release))
    }

    pub fn get_release_by_id(&self, release_id: &str) -> Result<Option<Release>> {
        self.block_on(self.inner.get_release_by_id(release_id))
    }

    pub fn enrich_sparse_release(&self, sparse: &SparseRelease) -> Result<Option<Release>> {
        self.block_on(self.inner.enrich_sparse_release(sparse))
    }

    pub fn get_sparse_release_by_external_ids(
        &self,
        external_ids: &BTreeMap<String, String>,
    ) -> Result<Option<SparseRelease>> {
        self.block_on(self.inner.get_sparse_release_by_external_ids(external_ids))
    }

    pub fn get_sparse_release_by_name_and_version(
        &self,
        release: &Release,
    ) -> Result<Option<SparseRelease>> {
        self.block_on(self.inner.get_sparse_release_by_name_and_version(release))
    }

    pub fn get_release_by_version(
        &self,
        component: &Component,
        version: &str,
    ) -> Result<Option<Release>> {
        self.block_on(self.inner.get_release_by_version(component, version))
    }

    pub fn resolve_release(&self, candidate: &Release) -> Result<Option<Release>> {
        self.block_on(self.inner.resolve_release(candidate))
    }

    pub fn get_or_create_release(
        &self,
        candidate: &Release,
        update_existing: bool,
    ) -> Result<Release> {
        self.block_on(self.inner.get_or_create_release(candidate, update_existing))
    }

    pub fn update_release(&self, release: &Release) -> Result<Release> {
        self.block_on(self.inner.update_release(release))
    }

    pub fn upload_attachments(&self, request: AttachmentUploadRequest) -> AttachmentUploadResult {
        self.block_on(self.inner.upload_attachments(request))
    }

    pub fn download_attachment(
        &self,
        release: &Release,
        attachment: &SparseAttachment,
        target_dir: &Path,
    ) -> Result<Option<PathBuf>> {
        self.block_on(self.inner.download_attachment(release, attachment, target_dir))
    }
}

impl<A: LicenseAdapter> Blocking<A> {
    pub fn get_license_by_name(&self, name: &str) -> Result<Option<License>> {
        self.block_on(self.inner.get_license_by_name(name))
    }
}

impl<A: ProjectAdapter> Blocking<A> {
    pub fn get_project_id_by_name_and_version(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Option<String>> {
        self.block_on(self.inner.get_project_id_by_name_and_version(name, version))
    }

    pub fn add_project(&self, name: &str, version: &str) -> Result<String> {
        self.block_on(self.inner.add_project(name, version))
    }

    pub fn add_releases_to_project(&self, project_id: &str, releases: &[Release]) -> Result<()> {
        self.block_on(self.inner.add_releases_to_project(project_id, releases))
    }

    pub fn get_linked_releases(&self, project_id: &str) -> Result<Vec<SparseRelease>> {
        self.block_on(self.inner.get_linked_releases(project_id))
    }
}

impl<PR: ProgressReporter> Blocking<SourcesExporter<PR>> {
    pub fn download_sources<RA>(&self, adapter: &RA, releases: &[Release]) -> Vec<ReleaseWithSources>
    where
        RA: ReleaseAdapter + ?Sized,
    {
        self.block_on(self.inner.download_sources(adapter, releases))
    }

    pub fn remove_unreferenced_files(
        &self,
        releases: &[ReleaseWithSources],
    ) -> Result<CacheCleanupReport> {
        self.block_on(self.inner.remove_unreferenced_files(releases))
    }
}
