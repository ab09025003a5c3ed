use crate::application::rest::ComponentClient;
use crate::catalog::domain::Component;
use crate::ports::inbound::ComponentAdapter;
use crate::ports::outbound::CatalogTransport;
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// CatalogComponentAdapter - get-or-create resolution of components
///
/// # Type Parameters
/// * `T` - CatalogTransport implementation shared with the other adapters
pub struct CatalogComponentAdapter<T> {
    client: ComponentClient<T>,
}

impl<T> Clone for CatalogComponentAdapter<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: CatalogTransport> CatalogComponentAdapter<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            client: ComponentClient::new(transport),
        }
    }
}

#[async_trait]
impl<T: CatalogTransport> ComponentAdapter for CatalogComponentAdapter<T> {
    async fn create_component(&self, component: &Component) -> Result<Component> {
        component.validate()?;
        let created = self.client.create_component(component).await?;
        tracing::info!(name = created.name(), id = ?created.id(), "Created component");
        Ok(created)
    }

    async fn get_component_by_id(&self, component_id: &str) -> Result<Option<Component>> {
        self.client.get_component(component_id).await
    }

    async fn get_component_by_name(&self, name: &str) -> Result<Option<Component>> {
        let hits = self.client.search_by_name(name).await?;
        let Some(id) = hits
            .iter()
            .find(|hit| hit.name() == name)
            .and_then(|hit| hit.id())
        else {
            return Ok(None);
        };
        self.client.get_component(&id).await
    }

    async fn get_or_create_component(&self, candidate: &Component) -> Result<Component> {
        candidate.validate()?;

        if let Some(existing) = self.get_component_by_name(candidate.name()).await? {
            return Ok(existing);
        }

        match self.create_component(candidate).await {
            Ok(created) => Ok(created),
            Err(create_error) => {
                // Another client may have created it between search and create
                tracing::warn!(
                    name = candidate.name(),
                    error = %create_error,
                    "Component creation failed, searching once more"
                );
                match self.get_component_by_name(candidate.name()).await {
                    Ok(Some(existing)) => Ok(existing),
                    _ => Err(create_error),
                }
            }
        }
    }
}
