use crate::application::rest::ProjectClient;
use crate::catalog::domain::{Project, Release, SparseRelease};
use crate::ports::inbound::ProjectAdapter;
use crate::ports::outbound::CatalogTransport;
use crate::shared::error::CatalogError;
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// CatalogProjectAdapter - project lookup, creation and release linking
pub struct CatalogProjectAdapter<T> {
    client: ProjectClient<T>,
}

impl<T> Clone for CatalogProjectAdapter<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: CatalogTransport> CatalogProjectAdapter<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            client: ProjectClient::new(transport),
        }
    }
}

#[async_trait]
impl<T: CatalogTransport> ProjectAdapter for CatalogProjectAdapter<T> {
    async fn get_project_id_by_name_and_version(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Option<String>> {
        let hits = self.client.search_by_name(name).await?;
        Ok(hits
            .iter()
            .find(|project| project.has_equal_coordinates(name, version))
            .and_then(Project::id))
    }

    async fn add_project(&self, name: &str, version: &str) -> Result<String> {
        let project = Project::new(name, version);
        project.validate()?;

        let created = self.client.create_project(&project).await?;
        let id = created.id().ok_or_else(|| CatalogError::NoContent {
            endpoint: "/projects".to_string(),
        })?;
        tracing::info!(name, version, id = %id, "Created project");
        Ok(id)
    }

    async fn add_releases_to_project(&self, project_id: &str, releases: &[Release]) -> Result<()> {
        let hrefs: Vec<String> = releases
            .iter()
            .filter_map(|release| {
                let href = release.self_href();
                if href.is_none() {
                    tracing::warn!(
                        name = release.name(),
                        version = release.version(),
                        "Release has no self link, not linking it to the project"
                    );
                }
                href.map(str::to_string)
            })
            .collect();
        if hrefs.is_empty() {
            return Ok(());
        }

        self.client.add_releases(project_id, &hrefs).await?;
        tracing::info!(project_id, count = hrefs.len(), "Linked releases to project");
        Ok(())
    }

    async fn get_linked_releases(&self, project_id: &str) -> Result<Vec<SparseRelease>> {
        self.client.get_linked_releases(project_id, true).await
    }
}
