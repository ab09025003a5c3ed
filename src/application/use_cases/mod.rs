/// Use cases module containing the catalog resolution and transfer logic
mod attachment_transfer;
mod component_resolution;
mod license_lookup;
mod project_management;
mod release_resolution;
mod sources_exporter;

pub use attachment_transfer::AttachmentTransfer;
pub use component_resolution::CatalogComponentAdapter;
pub use license_lookup::CatalogLicenseAdapter;
pub use project_management::CatalogProjectAdapter;
pub use release_resolution::CatalogReleaseAdapter;
pub use sources_exporter::{calculate_hash, calculate_sha1_hash, SourcesExporter};
