use super::hal;
use crate::catalog::domain::{Component, SparseComponent};
use crate::ports::outbound::CatalogTransport;
use crate::shared::error::CatalogError;
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use std::sync::Arc;

const COMPONENTS_ENDPOINT: &str = "/components";
const EMBEDDED_COMPONENTS: &str = "sw360:components";

/// Typed access to the `/components` endpoints
pub struct ComponentClient<T> {
    transport: Arc<T>,
}

impl<T> Clone for ComponentClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: CatalogTransport> ComponentClient<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// `GET /components?name=` returning the sparse search hits
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<SparseComponent>> {
        let path = format!("{}?name={}", COMPONENTS_ENDPOINT, urlencoding::encode(name));
        let body = self.transport.get(&path).await?;
        hal::embedded_list(body, EMBEDDED_COMPONENTS)
    }

    /// `GET /components/{id}`, `None` for unknown ids
    pub async fn get_component(&self, component_id: &str) -> Result<Option<Component>> {
        validate_url_component(component_id, "Component id")?;
        let path = format!("{}/{}", COMPONENTS_ENDPOINT, component_id);
        self.transport
            .get(&path)
            .await?
            .map(|body| hal::entity(body, "component"))
            .transpose()
    }

    /// `POST /components`
    pub async fn create_component(&self, component: &Component) -> Result<Component> {
        let body = hal::request_body(component)?;
        let created: Component =
            hal::entity(self.transport.post(COMPONENTS_ENDPOINT, &body).await?, "component")?;
        if created.id().is_none() {
            return Err(CatalogError::NoContent {
                endpoint: COMPONENTS_ENDPOINT.to_string(),
            }
            .into());
        }
        Ok(created)
    }
}
