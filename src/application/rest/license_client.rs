use super::hal;
use crate::catalog::domain::License;
use crate::ports::outbound::CatalogTransport;
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use std::sync::Arc;

const LICENSES_ENDPOINT: &str = "/licenses";

/// Typed access to the `/licenses` endpoint
pub struct LicenseClient<T> {
    transport: Arc<T>,
}

impl<T> Clone for LicenseClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: CatalogTransport> LicenseClient<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// `GET /licenses/{name}`, `None` for unknown licenses
    pub async fn get_license(&self, name: &str) -> Result<Option<License>> {
        validate_url_component(name, "License name")?;
        let path = format!("{}/{}", LICENSES_ENDPOINT, urlencoding::encode(name));
        self.transport
            .get(&path)
            .await?
            .map(|body| hal::entity(body, "license"))
            .transpose()
    }
}
