use super::links::Links;
use serde::{Deserialize, Serialize};

/// License entity as returned by `GET /licenses/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    #[serde(rename = "shortName")]
    short_name: String,
    #[serde(rename = "fullName", default, skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    links: Links,
}

impl License {
    pub fn new(short_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            full_name: None,
            text: None,
            links: Links::default(),
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// License reference embedded in a release
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SparseLicense {
    #[serde(rename = "shortName")]
    pub short_name: String,
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}
