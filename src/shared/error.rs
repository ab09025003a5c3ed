use std::path::PathBuf;
use thiserror::Error;

/// HTTP status code the catalog uses for unknown resources.
pub const STATUS_NOT_FOUND: u16 = 404;

/// Application-specific errors raised while talking to the compliance catalog.
///
/// Uses thiserror to derive Display and Error traits automatically. Operations
/// return `anyhow::Error`; callers that need to branch on the failure kind use
/// `err.downcast_ref::<CatalogError>()` or the helpers at the bottom of this file.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Local data failed minimal-field validation before any network call
    #[error("Invalid {entity}: {reason}\n\n💡 Hint: Complete the local record before resolving it against the catalog")]
    InvalidEntity { entity: String, reason: String },

    /// The server answered with a status outside of 2xx
    #[error("Request to {endpoint} failed with status {status}: {message}")]
    RequestFailed {
        status: u16,
        endpoint: String,
        message: String,
    },

    /// A successful response carried no body where one was required
    #[error("Response from {endpoint} has no content")]
    NoContent { endpoint: String },

    #[error("Release {name}:{version} already exists in component {component}\n\n💡 Hint: Another client may have created it concurrently; resolve the release again instead of creating it")]
    DuplicateRelease {
        name: String,
        version: String,
        component: String,
    },

    #[error("Duplicate attachment file name: {filename}")]
    DuplicateAttachment { filename: String },

    /// More than one remote entity matched a lookup that must be unique
    #[error("Multiple releases ({count}) in the catalog matched by external ids: {external_ids}\n\n💡 Hint: The catalog data is inconsistent and must be cleaned up manually")]
    AmbiguousMatch { count: usize, external_ids: String },

    #[error("Failed to obtain an access token from {endpoint}\nDetails: {details}\n\n💡 Hint: Verify the user and client credentials in the configuration")]
    Authentication { endpoint: String, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory is writable")]
    FileWriteError { path: PathBuf, details: String },

    /// An absolute href points outside the configured catalog
    #[error("Refusing to send credentials to {url}: it is not on the catalog origin {origin}")]
    UntrustedUrl { url: String, origin: String },

    #[error("Operation cancelled: {operation}")]
    Cancelled { operation: String },

    /// Validation error for configuration and builders
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl CatalogError {
    pub fn invalid_entity(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::InvalidEntity {
            entity: entity.into(),
            reason: reason.into(),
        }
    }
}

/// Returns the HTTP status of a failed request, if the error is one.
pub fn status_of(err: &anyhow::Error) -> Option<u16> {
    match err.downcast_ref::<CatalogError>() {
        Some(CatalogError::RequestFailed { status, .. }) => Some(*status),
        _ => None,
    }
}

/// Checks whether a failure means the requested resource does not exist.
pub fn is_not_found(err: &anyhow::Error) -> bool {
    status_of(err) == Some(STATUS_NOT_FOUND)
}
