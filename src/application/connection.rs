use crate::adapters::outbound::network::{AuthenticationClient, CachingLicenseAdapter, ReqwestTransport};
use crate::application::use_cases::{
    CatalogComponentAdapter, CatalogLicenseAdapter, CatalogProjectAdapter, CatalogReleaseAdapter,
};
use crate::config::{validate_config, ClientConfig};
use crate::ports::outbound::CatalogTransport;
use crate::shared::Result;
use std::sync::Arc;

/// CatalogConnection - the adapters of one catalog session
///
/// All adapters share one transport, so they share its connection pool and
/// access token. Configuration is passed in explicitly; there is no global
/// client state.
pub struct CatalogConnection<T> {
    transport: Arc<T>,
    component_adapter: CatalogComponentAdapter<T>,
    release_adapter: CatalogReleaseAdapter<T>,
    license_adapter: CachingLicenseAdapter<CatalogLicenseAdapter<T>>,
    project_adapter: CatalogProjectAdapter<T>,
}

impl CatalogConnection<ReqwestTransport> {
    /// Authenticates and wires the adapters over HTTP
    ///
    /// # Errors
    /// Returns an error if:
    /// - The configuration is invalid
    /// - No access token can be obtained
    /// - The HTTP client cannot be built (e.g. invalid proxy)
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        validate_config(config)?;

        let token = AuthenticationClient::new(config)?
            .fetch_access_token(config)
            .await?;
        let transport = ReqwestTransport::new(config, token)?;

        tracing::info!(rest_url = %config.rest_url, "Connected to catalog");
        Ok(Self::with_transport(transport))
    }
}

impl<T: CatalogTransport> CatalogConnection<T> {
    /// Wires the adapters over an existing transport
    pub fn with_transport(transport: T) -> Self {
        Self::with_shared_transport(Arc::new(transport))
    }

    pub fn with_shared_transport(transport: Arc<T>) -> Self {
        let component_adapter = CatalogComponentAdapter::new(Arc::clone(&transport));
        let release_adapter =
            CatalogReleaseAdapter::new(Arc::clone(&transport), component_adapter.clone());
        let license_adapter =
            CachingLicenseAdapter::new(CatalogLicenseAdapter::new(Arc::clone(&transport)));
        let project_adapter = CatalogProjectAdapter::new(Arc::clone(&transport));

        Self {
            transport,
            component_adapter,
            release_adapter,
            license_adapter,
            project_adapter,
        }
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    pub fn component_adapter(&self) -> &CatalogComponentAdapter<T> {
        &self.component_adapter
    }

    pub fn release_adapter(&self) -> &CatalogReleaseAdapter<T> {
        &self.release_adapter
    }

    pub fn license_adapter(&self) -> &CachingLicenseAdapter<CatalogLicenseAdapter<T>> {
        &self.license_adapter
    }

    pub fn project_adapter(&self) -> &CatalogProjectAdapter<T> {
        &self.project_adapter
    }
}
