use crate::catalog::domain::{AttachmentType, Release};
use crate::shared::error::CatalogError;
use crate::shared::Result;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

/// One local file to be attached to the target release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUploadItem {
    path: PathBuf,
    file_name: String,
    attachment_type: AttachmentType,
}

impl AttachmentUploadItem {
    /// Creates an item whose remote file name is the base name of `path`
    ///
    /// # Errors
    /// Returns `CatalogError::Validation` if the path has no UTF-8 file name
    pub fn new(path: impl Into<PathBuf>, attachment_type: AttachmentType) -> Result<Self> {
        let path = path.into();
        let file_name = base_name(&path)?;
        Ok(Self {
            path,
            file_name,
            attachment_type,
        })
    }

    /// Creates an item uploaded under an explicit remote file name
    pub fn with_file_name(
        path: impl Into<PathBuf>,
        file_name: impl Into<String>,
        attachment_type: AttachmentType,
    ) -> Self {
        Self {
            path: path.into(),
            file_name: file_name.into(),
            attachment_type,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn attachment_type(&self) -> AttachmentType {
        self.attachment_type
    }
}

fn base_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            CatalogError::Validation {
                message: format!("'{}' has no usable file name", path.display()),
            }
            .into()
        })
}

/// AttachmentUploadRequest - files to upload to one release, processed in order
#[derive(Debug, Clone)]
pub struct AttachmentUploadRequest {
    target: Release,
    items: Vec<AttachmentUploadItem>,
    cancellation: Option<CancellationToken>,
}

impl AttachmentUploadRequest {
    pub fn builder(target: Release) -> AttachmentUploadRequestBuilder {
        AttachmentUploadRequestBuilder {
            target,
            items: Vec::new(),
            cancellation: None,
        }
    }

    pub fn target(&self) -> &Release {
        &self.target
    }

    pub fn items(&self) -> &[AttachmentUploadItem] {
        &self.items
    }

    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    pub(crate) fn into_parts(
        self,
    ) -> (Release, Vec<AttachmentUploadItem>, Option<CancellationToken>) {
        (self.target, self.items, self.cancellation)
    }
}

/// Builder for AttachmentUploadRequest
#[derive(Debug)]
pub struct AttachmentUploadRequestBuilder {
    target: Release,
    items: Vec<Result<AttachmentUploadItem>>,
    cancellation: Option<CancellationToken>,
}

impl AttachmentUploadRequestBuilder {
    pub fn add_attachment(
        mut self,
        path: impl Into<PathBuf>,
        attachment_type: AttachmentType,
    ) -> Self {
        self.items
            .push(AttachmentUploadItem::new(path, attachment_type));
        self
    }

    pub fn add_item(mut self, item: AttachmentUploadItem) -> Self {
        self.items.push(Ok(item));
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Builds the request
    ///
    /// # Errors
    /// Returns the first item whose path has no usable file name
    pub fn build(self) -> Result<AttachmentUploadRequest> {
        let items = self.items.into_iter().collect::<Result<Vec<_>>>()?;
        Ok(AttachmentUploadRequest {
            target: self.target,
            items,
            cancellation: self.cancellation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_defaults_to_base_name() {
        let item =
            AttachmentUploadItem::new("/tmp/work/commons-io-sources.jar", AttachmentType::Source)
                .unwrap();
        assert_eq!(item.file_name(), "commons-io-sources.jar");
        assert_eq!(item.attachment_type(), AttachmentType::Source);
    }

    #[test]
    fn test_builder_keeps_order() {
        let request = AttachmentUploadRequest::builder(Release::new("commons-io", "2.6"))
            .add_attachment("/tmp/a.zip", AttachmentType::Source)
            .add_item(AttachmentUploadItem::with_file_name(
                "/tmp/report.html",
                "clearing.html",
                AttachmentType::ClearingReport,
            ))
            .build()
            .unwrap();

        let names: Vec<&str> = request.items().iter().map(|i| i.file_name()).collect();
        assert_eq!(names, vec!["a.zip", "clearing.html"]);
        assert!(request.cancellation().is_none());
    }

    #[test]
    fn test_builder_rejects_path_without_file_name() {
        let result = AttachmentUploadRequest::builder(Release::new("commons-io", "2.6"))
            .add_attachment("/", AttachmentType::Source)
            .build();
        assert!(result.unwrap_err().to_string().contains("no usable file name"));
    }
}
