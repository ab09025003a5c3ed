/// Typed REST clients translating catalog resources to domain entities
mod component_client;
mod hal;
mod license_client;
mod project_client;
mod release_client;

pub use component_client::ComponentClient;
pub use license_client::LicenseClient;
pub use project_client::ProjectClient;
pub use release_client::ReleaseClient;
