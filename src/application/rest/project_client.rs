use super::hal;
use crate::catalog::domain::{Project, SparseRelease};
use crate::ports::outbound::CatalogTransport;
use crate::shared::error::CatalogError;
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use serde_json::Value;
use std::sync::Arc;

const PROJECTS_ENDPOINT: &str = "/projects";
const EMBEDDED_PROJECTS: &str = "sw360:projects";
const EMBEDDED_RELEASES: &str = "sw360:releases";

/// Typed access to the `/projects` endpoints
pub struct ProjectClient<T> {
    transport: Arc<T>,
}

impl<T> Clone for ProjectClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: CatalogTransport> ProjectClient<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// `GET /projects?name=`; the server matches names loosely
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<Project>> {
        let path = format!("{}?name={}", PROJECTS_ENDPOINT, urlencoding::encode(name));
        let body = self.transport.get(&path).await?;
        hal::embedded_list(body, EMBEDDED_PROJECTS)
    }

    /// `POST /projects`
    pub async fn create_project(&self, project: &Project) -> Result<Project> {
        let body = hal::request_body(project)?;
        let created: Project =
            hal::entity(self.transport.post(PROJECTS_ENDPOINT, &body).await?, "project")?;
        if created.id().is_none() {
            return Err(CatalogError::NoContent {
                endpoint: PROJECTS_ENDPOINT.to_string(),
            }
            .into());
        }
        Ok(created)
    }

    /// `POST /projects/{id}/releases` with the release hrefs as a JSON array
    ///
    /// The server answers with an empty body, so `NoContent` counts as success.
    pub async fn add_releases(&self, project_id: &str, release_hrefs: &[String]) -> Result<()> {
        validate_url_component(project_id, "Project id")?;
        let path = format!("{}/{}/releases", PROJECTS_ENDPOINT, project_id);
        let body = Value::from(release_hrefs.to_vec());
        match self.transport.post(&path, &body).await {
            Ok(_) => Ok(()),
            Err(error) if matches!(
                error.downcast_ref::<CatalogError>(),
                Some(CatalogError::NoContent { .. })
            ) =>
            {
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// `GET /projects/{id}/releases`, optionally including transitive dependencies
    pub async fn get_linked_releases(
        &self,
        project_id: &str,
        transitive: bool,
    ) -> Result<Vec<SparseRelease>> {
        validate_url_component(project_id, "Project id")?;
        let path = format!(
            "{}/{}/releases?transitive={}",
            PROJECTS_ENDPOINT, project_id, transitive
        );
        let body = self.transport.get(&path).await?;
        hal::embedded_list(body, EMBEDDED_RELEASES)
    }
}
