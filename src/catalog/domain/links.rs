use serde::{Deserialize, Serialize};

/// A single HAL link object (`{"href": "..."}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Href {
    pub href: String,
}

impl Href {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// The `_links` section the catalog attaches to every resource.
///
/// Identifiers are never transmitted as plain fields; they are the last path
/// segment of the `self` link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Href>,
    #[serde(
        rename = "sw360:component",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub component: Option<Href>,
}

impl Links {
    pub fn with_self(href: impl Into<String>) -> Self {
        Self {
            self_link: Some(Href::new(href)),
            component: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.self_href().is_none() && self.component_href().is_none()
    }

    pub fn self_href(&self) -> Option<&str> {
        non_empty_href(self.self_link.as_ref())
    }

    pub fn component_href(&self) -> Option<&str> {
        non_empty_href(self.component.as_ref())
    }

    /// Identifier of the resource, derived from its self link
    pub fn self_id(&self) -> Option<String> {
        self.self_href().and_then(id_from_href).map(str::to_string)
    }
}

fn non_empty_href(href: Option<&Href>) -> Option<&str> {
    href.map(|h| h.href.as_str()).filter(|h| !h.is_empty())
}

/// Extracts the identifier from a resource URL (its last path segment).
pub fn id_from_href(href: &str) -> Option<&str> {
    href.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_href() {
        assert_eq!(
            id_from_href("https://sw360.example.org/resource/api/releases/4711"),
            Some("4711")
        );
        assert_eq!(id_from_href("/releases/4711/"), Some("4711"));
        assert_eq!(id_from_href(""), None);
    }

    #[test]
    fn test_links_deserialize_hal() {
        let json = r#"{
            "self": {"href": "https://host/api/releases/r1"},
            "sw360:component": {"href": "https://host/api/components/c1"}
        }"#;
        let links: Links = serde_json::from_str(json).unwrap();
        assert_eq!(links.self_id().as_deref(), Some("r1"));
        assert_eq!(links.component_href(), Some("https://host/api/components/c1"));
    }

    #[test]
    fn test_empty_href_is_absent() {
        let links = Links::with_self("");
        assert!(links.is_empty());
        assert!(links.self_id().is_none());
    }
}
