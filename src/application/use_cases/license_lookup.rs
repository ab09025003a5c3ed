use crate::application::rest::LicenseClient;
use crate::catalog::domain::License;
use crate::ports::inbound::LicenseAdapter;
use crate::ports::outbound::CatalogTransport;
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// CatalogLicenseAdapter - license lookups against the catalog
pub struct CatalogLicenseAdapter<T> {
    client: LicenseClient<T>,
}

impl<T> Clone for CatalogLicenseAdapter<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: CatalogTransport> CatalogLicenseAdapter<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            client: LicenseClient::new(transport),
        }
    }
}

#[async_trait]
impl<T: CatalogTransport> LicenseAdapter for CatalogLicenseAdapter<T> {
    async fn get_license_by_name(&self, name: &str) -> Result<Option<License>> {
        self.client.get_license(name).await
    }
}
