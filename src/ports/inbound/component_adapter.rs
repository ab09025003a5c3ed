use crate::catalog::domain::Component;
use crate::shared::Result;
use async_trait::async_trait;

/// ComponentAdapter - Inbound port resolving components against the catalog
#[async_trait]
pub trait ComponentAdapter: Send + Sync {
    /// Creates a component unconditionally
    ///
    /// # Errors
    /// Returns `CatalogError::InvalidEntity` if the candidate lacks a name or
    /// categories, or the request failure if the server rejects it
    async fn create_component(&self, component: &Component) -> Result<Component>;

    /// Fetches the full component by its identifier, `None` if unknown
    async fn get_component_by_id(&self, component_id: &str) -> Result<Option<Component>>;

    /// Searches by name and returns the full detail of the first exact match
    async fn get_component_by_name(&self, name: &str) -> Result<Option<Component>>;

    /// Returns the remote component with the candidate's name, creating it when absent
    ///
    /// # Arguments
    /// * `candidate` - Locally built component with name and categories
    ///
    /// # Errors
    /// Returns an error if:
    /// - The candidate fails validation (no network call is made)
    /// - The search or the create request fails and no concurrent creator
    ///   produced the component in the meantime
    async fn get_or_create_component(&self, candidate: &Component) -> Result<Component>;
}
