use crate::shared::error::CatalogError;
use crate::shared::security::{validate_attachment_filename, validate_not_symlink};
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// AttachmentFileWriter adapter storing downloaded attachments
///
/// An existing file with the same name is replaced; concurrent writers of the
/// same attachment race and the last one wins.
pub struct AttachmentFileWriter;

impl AttachmentFileWriter {
    /// Writes `content` to `target_dir/filename`, creating the directory if needed
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file name is not a plain single path component
    /// - The target exists and is a symbolic link
    /// - The directory cannot be created or the file cannot be written
    pub async fn write(target_dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf> {
        validate_attachment_filename(filename, target_dir)?;

        tokio::fs::create_dir_all(target_dir)
            .await
            .map_err(|e| CatalogError::FileWriteError {
                path: target_dir.to_path_buf(),
                details: format!("Failed to create directory: {}", e),
            })?;

        let path = target_dir.join(filename);
        validate_not_symlink(&path)?;

        tokio::fs::write(&path, content)
            .await
            .map_err(|e| CatalogError::FileWriteError {
                path: path.clone(),
                details: e.to_string(),
            })?;

        Ok(path)
    }
}
