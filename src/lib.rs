//! sw360-adapter - client-side adapter for an SW360 compliance catalog
//!
//! This library reconciles locally discovered components and releases with the
//! catalog's REST API and transfers their attachments, following hexagonal
//! architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`catalog`): Catalog entities, merge rules and lookup algorithms
//! - **Application Layer** (`application`): Resolution adapters, project linking,
//!   attachment transfer, sources export and the blocking facade
//! - **Ports** (`ports`): Interface definitions for callers and infrastructure
//! - **Adapters** (`adapters`): HTTP transport, filesystem and console implementations
//! - **Shared** (`shared`): Error taxonomy, result alias and security checks
//!
//! # Example
//!
//! ```no_run
//! use sw360_adapter::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let config = load_config_from_path(std::path::Path::new("sw360-adapter.config.yml"))?;
//! let connection = CatalogConnection::connect(&config).await?;
//!
//! let mut candidate = Release::new("commons-io", "2.6");
//! candidate.set_declared_license("Apache-2.0");
//! let release = connection
//!     .release_adapter()
//!     .get_or_create_release(&candidate, true)
//!     .await?;
//!
//! let request = AttachmentUploadRequest::builder(release)
//!     .add_attachment("target/commons-io-2.6-sources.jar", AttachmentType::Source)
//!     .build()?;
//! let result = connection.release_adapter().upload_attachments(request).await;
//!
//! let exporter = SourcesExporter::new("target/sources", StderrProgressReporter::new());
//! let sources = exporter
//!     .download_sources(connection.release_adapter(), &[result.into_target()])
//!     .await;
//! exporter.remove_unreferenced_files(&sources).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod catalog;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{SilentProgressReporter, StderrProgressReporter};
    pub use crate::adapters::outbound::filesystem::CacheCleanupReport;
    pub use crate::adapters::outbound::network::{
        AccessToken, AuthenticationClient, CachingLicenseAdapter, ReqwestTransport,
    };
    pub use crate::application::dto::{
        AttachmentUploadItem, AttachmentUploadRequest, AttachmentUploadResult,
        FailedAttachmentUpload, ReleaseWithSources,
    };
    pub use crate::application::use_cases::{
        calculate_hash, calculate_sha1_hash, CatalogComponentAdapter, CatalogLicenseAdapter,
        CatalogProjectAdapter, CatalogReleaseAdapter, SourcesExporter,
    };
    pub use crate::application::{Blocking, CatalogConnection};
    pub use crate::catalog::domain::{
        AttachmentType, Component, ComponentType, License, Project, ProjectType, Release,
        SparseAttachment, SparseComponent, SparseLicense, SparseRelease, Visibility,
    };
    pub use crate::config::{discover_config, load_config_from_path, ClientConfig, ProxyConfig};
    pub use crate::ports::inbound::{
        ComponentAdapter, LicenseAdapter, ProjectAdapter, ReleaseAdapter,
    };
    pub use crate::ports::outbound::{CatalogTransport, MultipartUpload, ProgressReporter};
    pub use crate::shared::error::{is_not_found, status_of};
    pub use crate::shared::{CatalogError, Result};
}
