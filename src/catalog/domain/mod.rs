/// Catalog entities as exchanged with the REST API (HAL JSON)
pub mod attachment;
pub mod component;
pub mod license;
pub mod links;
pub mod project;
pub mod release;

pub use attachment::{AttachmentMetadata, AttachmentType, SparseAttachment};
pub use component::{
    Component, ComponentEmbedded, ComponentType, SparseComponent, DEFAULT_COMPONENT_CATEGORY,
};
pub use license::{License, SparseLicense};
pub use links::{id_from_href, Href, Links};
pub use project::{Project, ProjectType, Visibility};
pub use release::{Release, ReleaseEmbedded, SparseRelease};
