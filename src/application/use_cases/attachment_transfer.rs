use crate::adapters::outbound::filesystem::{AttachmentFileReader, AttachmentFileWriter};
use crate::application::dto::{AttachmentUploadItem, AttachmentUploadRequest, AttachmentUploadResult};
use crate::application::rest::ReleaseClient;
use crate::catalog::domain::{AttachmentMetadata, Release, SparseAttachment};
use crate::catalog::services::ReleaseMatcher;
use crate::ports::outbound::CatalogTransport;
use crate::shared::error::CatalogError;
use crate::shared::Result;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

const UPLOAD_OPERATION: &str = "attachment upload";

/// AttachmentTransfer - moves attachment files between disk and a release
///
/// Uploads for one release run strictly in order; each duplicate check sees the
/// attachments added by the previous uploads of the same batch.
pub struct AttachmentTransfer<T> {
    client: ReleaseClient<T>,
    reader: AttachmentFileReader,
}

impl<T: CatalogTransport> AttachmentTransfer<T> {
    pub fn new(client: ReleaseClient<T>) -> Self {
        Self {
            client,
            reader: AttachmentFileReader::new(),
        }
    }

    /// Uploads every item of the request, recording one outcome per item
    pub async fn upload_attachments(&self, request: AttachmentUploadRequest) -> AttachmentUploadResult {
        let (target, items, cancellation) = request.into_parts();
        let mut result = AttachmentUploadResult::new(target);
        let mut pending = items.into_iter();

        while let Some(item) = pending.next() {
            let outcome = self
                .upload_with_cancellation(result.target(), &item, cancellation.as_ref())
                .await;

            result = match outcome {
                Ok(updated) => {
                    tracing::info!(file = item.file_name(), "Uploaded attachment");
                    result.add_successful_upload(updated, item)
                }
                Err(error) if is_cancelled(&error) => {
                    tracing::warn!(
                        remaining = pending.len() + 1,
                        "Attachment upload cancelled"
                    );
                    let result = result.add_failed_upload(item, error);
                    return pending.fold(result, |result, item| {
                        result.add_failed_upload(item, cancelled_error())
                    });
                }
                Err(error) => {
                    tracing::warn!(file = item.file_name(), error = %error, "Attachment upload failed");
                    result.add_failed_upload(item, error)
                }
            };
        }

        result
    }

    async fn upload_with_cancellation(
        &self,
        target: &Release,
        item: &AttachmentUploadItem,
        cancellation: Option<&CancellationToken>,
    ) -> Result<Release> {
        match cancellation {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(cancelled_error()),
                    uploaded = self.upload_one(target, item) => uploaded,
                }
            }
            None => self.upload_one(target, item).await,
        }
    }

    async fn upload_one(&self, target: &Release, item: &AttachmentUploadItem) -> Result<Release> {
        if ReleaseMatcher::is_duplicate_attachment(item.file_name(), target.attachments()) {
            return Err(CatalogError::DuplicateAttachment {
                filename: item.file_name().to_string(),
            }
            .into());
        }

        let href = target.self_href().ok_or_else(|| {
            CatalogError::invalid_entity(
                "release",
                format!(
                    "{}:{} has no self link to upload to",
                    target.name(),
                    target.version()
                ),
            )
        })?;

        let content = self.reader.read(item.path()).await?;
        let metadata = AttachmentMetadata {
            filename: item.file_name().to_string(),
            attachment_type: item.attachment_type(),
        };
        let updated = self
            .client
            .upload_attachment(href, &metadata, content)
            .await?;

        Ok(ensure_listed(updated, target, item))
    }

    /// Downloads one attachment of `release` into `target_dir`
    pub async fn download_attachment(
        &self,
        release: &Release,
        attachment: &SparseAttachment,
        target_dir: &Path,
    ) -> Result<Option<PathBuf>> {
        let Some(href) = release.self_href() else {
            return Ok(None);
        };
        let attachment_id = attachment.id().ok_or_else(|| {
            CatalogError::invalid_entity(
                "attachment",
                format!("'{}' has no self link", attachment.filename()),
            )
        })?;

        let content = self
            .client
            .download_attachment(href, &attachment_id)
            .await?;
        let path = AttachmentFileWriter::write(target_dir, attachment.filename(), &content).await?;

        tracing::debug!(path = %path.display(), "Downloaded attachment");
        Ok(Some(path))
    }
}

/// Keeps the previous self link and lists the uploaded file when the server
/// response omits them
fn ensure_listed(mut updated: Release, previous: &Release, item: &AttachmentUploadItem) -> Release {
    if updated.self_href().is_none() {
        if let Some(href) = previous.self_href() {
            updated = updated.with_self_link(href);
        }
    }
    if !ReleaseMatcher::is_duplicate_attachment(item.file_name(), updated.attachments()) {
        updated.add_attachment(SparseAttachment::new(
            item.file_name(),
            item.attachment_type(),
        ));
    }
    updated
}

fn cancelled_error() -> anyhow::Error {
    CatalogError::Cancelled {
        operation: UPLOAD_OPERATION.to_string(),
    }
    .into()
}

fn is_cancelled(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<CatalogError>(),
        Some(CatalogError::Cancelled { .. })
    )
}
