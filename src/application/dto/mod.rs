/// Data Transfer Objects for application layer
///
/// DTOs carry batch requests and their outcomes between the adapters
/// and their callers, keeping the domain layer free of transfer state.
mod attachment_upload_request;
mod attachment_upload_result;
mod release_with_sources;

pub use attachment_upload_request::{
    AttachmentUploadItem, AttachmentUploadRequest, AttachmentUploadRequestBuilder,
};
pub use attachment_upload_result::{AttachmentUploadResult, FailedAttachmentUpload};
pub use release_with_sources::ReleaseWithSources;
