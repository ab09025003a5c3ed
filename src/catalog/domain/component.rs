use super::links::Links;
use super::release::{Release, SparseRelease};
use crate::shared::error::CatalogError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Category assigned to components derived from a release
pub const DEFAULT_COMPONENT_CATEGORY: &str = "Antenna";

/// Classification of a component in the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    Internal,
    #[default]
    Oss,
    Cots,
    #[serde(rename = "FREESOFTWARE")]
    FreeSoftware,
    InnerSource,
    Service,
}

/// Embedded collections of a component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEmbedded {
    #[serde(rename = "sw360:releases", default, skip_serializing_if = "Vec::is_empty")]
    pub releases: Vec<SparseRelease>,
}

impl ComponentEmbedded {
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

/// A named piece of software grouping its releases
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    #[serde(default)]
    name: String,
    #[serde(rename = "componentType", default)]
    component_type: ComponentType,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    categories: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    homepage: Option<String>,
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    links: Links,
    #[serde(
        rename = "_embedded",
        default,
        skip_serializing_if = "ComponentEmbedded::is_empty"
    )]
    embedded: ComponentEmbedded,
}

impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Derives the owning component of a release
    ///
    /// Proprietary releases map to an internal component, everything else to OSS.
    pub fn from_release(release: &Release) -> Self {
        let component_type = if release.is_proprietary() {
            ComponentType::Internal
        } else {
            ComponentType::Oss
        };
        Self::new(release.name())
            .with_component_type(component_type)
            .with_category(DEFAULT_COMPONENT_CATEGORY)
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    pub fn with_component_type(mut self, component_type: ComponentType) -> Self {
        self.component_type = component_type;
        self
    }

    pub fn with_homepage(mut self, homepage: impl Into<String>) -> Self {
        self.homepage = Some(homepage.into());
        self
    }

    pub fn with_self_link(mut self, href: impl Into<String>) -> Self {
        self.links = Links::with_self(href);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    pub fn is_internal(&self) -> bool {
        self.component_type == ComponentType::Internal
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    pub fn homepage(&self) -> Option<&str> {
        self.homepage.as_deref()
    }

    pub fn id(&self) -> Option<String> {
        self.links.self_id()
    }

    pub fn self_href(&self) -> Option<&str> {
        self.links.self_href()
    }

    /// Sparse references to the releases of this component
    pub fn releases(&self) -> &[SparseRelease] {
        &self.embedded.releases
    }

    pub fn add_release(&mut self, release: SparseRelease) {
        self.embedded.releases.push(release);
    }

    /// Checks the minimal fields required before the component can be created
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(
                CatalogError::invalid_entity("component", "name must not be empty").into(),
            );
        }
        if self.categories.iter().all(|c| c.trim().is_empty()) {
            return Err(CatalogError::invalid_entity(
                "component",
                format!("'{}' needs at least one category", self.name),
            )
            .into());
        }
        Ok(())
    }
}

/// Component reference as returned by the component search
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SparseComponent {
    #[serde(default)]
    name: String,
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    links: Links,
}

impl SparseComponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links: Links::default(),
        }
    }

    pub fn with_self_link(mut self, href: impl Into<String>) -> Self {
        self.links = Links::with_self(href);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<String> {
        self.links.self_id()
    }
}
