/// Shared error types, result alias and security helpers
pub mod error;
pub mod result;
pub mod security;

pub use error::CatalogError;
pub use result::Result;
