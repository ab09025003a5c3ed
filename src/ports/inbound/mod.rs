/// Inbound ports (Driving ports) - Adapter interfaces
///
/// These ports define the interfaces that external pipeline steps
/// use to interact with the catalog.
pub mod component_adapter;
pub mod license_adapter;
pub mod project_adapter;
pub mod release_adapter;

pub use component_adapter::ComponentAdapter;
pub use license_adapter::LicenseAdapter;
pub use project_adapter::ProjectAdapter;
pub use release_adapter::ReleaseAdapter;
