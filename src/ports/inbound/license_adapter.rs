use crate::catalog::domain::License;
use crate::shared::Result;
use async_trait::async_trait;

/// LicenseAdapter - Inbound port for license lookups
#[async_trait]
pub trait LicenseAdapter: Send + Sync {
    /// Fetches a license by its short name, `None` if the catalog does not know it
    async fn get_license_by_name(&self, name: &str) -> Result<Option<License>>;
}
