use super::links::Links;
use crate::shared::error::CatalogError;
use crate::shared::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of product a project describes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectType {
    #[default]
    Customer,
    Internal,
    Product,
    Service,
    InnerSource,
}

/// Who may see a project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Private,
    MeAndModerators,
    // Wire name carries the server's spelling
    #[default]
    #[serde(rename = "BUISNESSUNIT_AND_MODERATORS")]
    BusinessUnitAndModerators,
    Everyone,
}

/// A product that links the releases it ships
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "projectType", default)]
    project_type: ProjectType,
    #[serde(default)]
    visibility: Visibility,
    #[serde(rename = "businessUnit", default, skip_serializing_if = "Option::is_none")]
    business_unit: Option<String>,
    #[serde(rename = "externalIds", default, skip_serializing_if = "BTreeMap::is_empty")]
    external_ids: BTreeMap<String, String>,
    #[serde(rename = "createdOn", default, skip_serializing_if = "Option::is_none")]
    created_on: Option<NaiveDate>,
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    links: Links,
}

impl Project {
    /// Prepares a project for creation with the catalog defaults
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        let version = version.into();
        Self {
            description: Some(format!("{} {}", name, version)),
            name,
            version,
            ..Self::default()
        }
    }

    pub fn with_project_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = project_type;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_business_unit(mut self, business_unit: impl Into<String>) -> Self {
        self.business_unit = Some(business_unit.into());
        self
    }

    pub fn with_created_on(mut self, created_on: NaiveDate) -> Self {
        self.created_on = Some(created_on);
        self
    }

    pub fn with_self_link(mut self, href: impl Into<String>) -> Self {
        self.links = Links::with_self(href);
        self
    }

    pub fn add_external_id(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.external_ids.insert(key.into(), value.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn business_unit(&self) -> Option<&str> {
        self.business_unit.as_deref()
    }

    pub fn external_ids(&self) -> &BTreeMap<String, String> {
        &self.external_ids
    }

    pub fn created_on(&self) -> Option<NaiveDate> {
        self.created_on
    }

    pub fn id(&self) -> Option<String> {
        self.links.self_id()
    }

    /// Same name and version, ignoring ASCII case
    pub fn has_equal_coordinates(&self, name: &str, version: &str) -> bool {
        self.name.eq_ignore_ascii_case(name) && self.version.eq_ignore_ascii_case(version)
    }

    /// Checks the minimal fields required before the project can be created
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::invalid_entity("project", "name must not be empty").into());
        }
        if self.version.trim().is_empty() {
            return Err(CatalogError::invalid_entity(
                "project",
                format!("'{}' has no version", self.name),
            )
            .into());
        }
        Ok(())
    }
}
