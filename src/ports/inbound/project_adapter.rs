use crate::catalog::domain::{Release, SparseRelease};
use crate::shared::Result;
use async_trait::async_trait;

/// ProjectAdapter - Inbound port managing projects and their linked releases
#[async_trait]
pub trait ProjectAdapter: Send + Sync {
    /// Identifier of the project with exactly this name and version, ignoring case
    async fn get_project_id_by_name_and_version(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Option<String>>;

    /// Creates a project with the catalog defaults and returns its identifier
    ///
    /// # Errors
    /// Returns `CatalogError::InvalidEntity` without a network call if name or
    /// version is blank, or the request failure if the server rejects it
    async fn add_project(&self, name: &str, version: &str) -> Result<String>;

    /// Links releases to a project by their self links
    ///
    /// Releases that were never stored on the server are skipped.
    async fn add_releases_to_project(&self, project_id: &str, releases: &[Release]) -> Result<()>;

    /// Releases linked to a project, including transitive dependencies
    async fn get_linked_releases(&self, project_id: &str) -> Result<Vec<SparseRelease>>;
}
