/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (catalog REST API, console).
pub mod catalog_transport;
pub mod progress_reporter;

pub use catalog_transport::{CatalogTransport, MultipartUpload};
pub use progress_reporter::ProgressReporter;
