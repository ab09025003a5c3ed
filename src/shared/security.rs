use crate::shared::error::CatalogError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a file uploaded as attachment (512 MB)
/// Attachments are read into memory for the multipart body.
pub const MAX_ATTACHMENT_SIZE: u64 = 512 * 1024 * 1024;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Security
/// This uses `symlink_metadata()` so that the link itself is checked, not its target.
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file for error messages
///
/// # Errors
/// Returns an error if the path doesn't exist, is a symbolic link or is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| CatalogError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        return Err(CatalogError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Pass the path of the real file instead".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(CatalogError::FileReadError {
            path: path.to_path_buf(),
            details: format!("{} is not a regular file", file_description),
        }
        .into());
    }

    Ok(())
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(CatalogError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_size, max_size
            ),
            hint: "Split the attachment or upload it through the web interface".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Validates a value that is spliced into a URL path (ids, license names)
///
/// # Security
/// Prevents a server-provided or caller-provided value from redirecting the
/// request to a different resource.
pub fn validate_url_component(component: &str, component_type: &str) -> Result<()> {
    if component.is_empty() {
        anyhow::bail!("{} must not be empty", component_type);
    }

    if component.contains('/') || component.contains('\\') {
        anyhow::bail!(
            "Security: {} contains path separators which are not allowed",
            component_type
        );
    }

    if component.contains("..") {
        anyhow::bail!(
            "Security: {} contains '..' which is not allowed",
            component_type
        );
    }

    if component.contains('#') || component.contains('?') || component.contains('@') {
        anyhow::bail!(
            "Security: {} contains URL-unsafe characters",
            component_type
        );
    }

    Ok(())
}

/// Validates an attachment file name before it is joined onto a local directory
pub fn validate_attachment_filename(filename: &str, target_dir: &Path) -> Result<()> {
    let path = Path::new(filename);
    let is_plain_name = path.components().count() == 1
        && path.file_name().map(|n| n == path.as_os_str()).unwrap_or(false);

    if filename.is_empty() || !is_plain_name || filename == ".." {
        return Err(CatalogError::SecurityError {
            path: target_dir.join(filename),
            reason: format!("Attachment file name '{}' is not a plain file name", filename),
            hint: "The attachment has to be renamed on the server".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Rejects writing through an existing symbolic link
pub fn validate_not_symlink(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_symlink() => Err(CatalogError::SecurityError {
            path: path.to_path_buf(),
            reason: "Target is a symbolic link".to_string(),
            hint: "Remove the link from the download directory".to_string(),
        }
        .into()),
        _ => Ok(()),
    }
}
