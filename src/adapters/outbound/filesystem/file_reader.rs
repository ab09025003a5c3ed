use crate::shared::error::CatalogError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_ATTACHMENT_SIZE};
use crate::shared::Result;
use std::path::Path;

/// AttachmentFileReader adapter loading local files for upload
///
/// Checks are done on the link itself, so symbolic links are rejected
/// rather than followed.
pub struct AttachmentFileReader {
    max_size: u64,
}

impl AttachmentFileReader {
    pub fn new() -> Self {
        Self {
            max_size: MAX_ATTACHMENT_SIZE,
        }
    }

    pub fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }

    /// Safely read a file with security checks:
    /// - Reject symbolic links
    /// - Validate file is a regular file
    /// - Check file size limits
    pub async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        validate_regular_file(path, "Attachment")?;

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| read_error(path, e))?;
        validate_file_size(metadata.len(), path, self.max_size)?;

        tokio::fs::read(path).await.map_err(|e| read_error(path, e))
    }
}

impl Default for AttachmentFileReader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_error(path: &Path, e: std::io::Error) -> anyhow::Error {
    CatalogError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    }
    .into()
}
