use super::links::Links;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of attachments the catalog distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttachmentType {
    Source,
    SourceSelf,
    Binary,
    BinarySelf,
    Document,
    Screenshot,
    Readme,
    ClearingReport,
    ComponentLicenseInfoXml,
    ComponentLicenseInfoCombined,
    Decision,
    LegalEvaluation,
    LicenseAgreement,
    #[serde(other)]
    Other,
}

impl AttachmentType {
    /// Source archives are the only attachments the sources export cares about
    pub fn is_source(self) -> bool {
        self == AttachmentType::Source
    }
}

impl fmt::Display for AttachmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Reuse the wire representation
        let value = serde_json::to_value(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", value.as_str().unwrap_or("OTHER"))
    }
}

/// Attachment as listed in the `_embedded` section of its owning entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SparseAttachment {
    filename: String,
    #[serde(rename = "attachmentType")]
    attachment_type: AttachmentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sha1: Option<String>,
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    links: Links,
}

impl SparseAttachment {
    pub fn new(filename: impl Into<String>, attachment_type: AttachmentType) -> Self {
        Self {
            filename: filename.into(),
            attachment_type,
            sha1: None,
            links: Links::default(),
        }
    }

    pub fn with_sha1(mut self, sha1: impl Into<String>) -> Self {
        self.sha1 = Some(sha1.into());
        self
    }

    pub fn with_self_link(mut self, href: impl Into<String>) -> Self {
        self.links = Links::with_self(href);
        self
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn attachment_type(&self) -> AttachmentType {
        self.attachment_type
    }

    /// SHA-1 checksum computed by the server on upload
    pub fn sha1(&self) -> Option<&str> {
        self.sha1.as_deref()
    }

    pub fn id(&self) -> Option<String> {
        self.links.self_id()
    }
}

/// Metadata part of a multipart attachment upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentMetadata {
    pub filename: String,
    #[serde(rename = "attachmentType")]
    pub attachment_type: AttachmentType,
}
