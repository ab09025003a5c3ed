use super::attachment_upload_request::AttachmentUploadItem;
use crate::catalog::domain::Release;

/// An item that could not be uploaded, with the reason
#[derive(Debug)]
pub struct FailedAttachmentUpload {
    pub item: AttachmentUploadItem,
    pub error: anyhow::Error,
}

/// AttachmentUploadResult - ledger of one upload batch
///
/// Adding an outcome consumes the result and returns the extended one, so a
/// handed-out result never changes underneath its holder. The target release
/// always reflects the latest server state known to the batch.
#[derive(Debug)]
pub struct AttachmentUploadResult {
    target: Release,
    successful: Vec<AttachmentUploadItem>,
    failed: Vec<FailedAttachmentUpload>,
}

impl AttachmentUploadResult {
    pub fn new(target: Release) -> Self {
        Self {
            target,
            successful: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Records an upload and adopts the updated release returned by the server
    pub fn add_successful_upload(mut self, updated_target: Release, item: AttachmentUploadItem) -> Self {
        self.target = updated_target;
        self.successful.push(item);
        self
    }

    pub fn add_failed_upload(mut self, item: AttachmentUploadItem, error: anyhow::Error) -> Self {
        self.failed.push(FailedAttachmentUpload { item, error });
        self
    }

    pub fn target(&self) -> &Release {
        &self.target
    }

    pub fn into_target(self) -> Release {
        self.target
    }

    pub fn successful_uploads(&self) -> &[AttachmentUploadItem] {
        &self.successful
    }

    pub fn failed_uploads(&self) -> &[FailedAttachmentUpload] {
        &self.failed
    }

    /// True when no item failed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}
