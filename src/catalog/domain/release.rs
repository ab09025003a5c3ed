use super::attachment::SparseAttachment;
use super::license::SparseLicense;
use super::links::{id_from_href, Links};
use crate::shared::error::CatalogError;
use crate::shared::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

const OVERRIDDEN_LICENSE_KEY: &str = "overridden_license";
const DECLARED_LICENSE_KEY: &str = "declared_license";
const OBSERVED_LICENSE_KEY: &str = "observed_license";
const CLEARING_STATE_KEY: &str = "clearingState";
const CHANGE_STATUS_KEY: &str = "change_status";
const COPYRIGHTS_KEY: &str = "copyrights";

const RELEASE_TAG_URL_KEY: &str = "release_tag";
const SOFTWARE_HERITAGE_ID_KEY: &str = "swh";
const HASHES_PREFIX: &str = "hash_";

/// Embedded collections of a release
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseEmbedded {
    #[serde(rename = "sw360:attachments", default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<SparseAttachment>,
    #[serde(rename = "sw360:licenses", default, skip_serializing_if = "Vec::is_empty")]
    pub licenses: Vec<SparseLicense>,
}

impl ReleaseEmbedded {
    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty() && self.licenses.is_empty()
    }
}

/// A concrete version of a component, the unit licenses and sources are tracked for.
///
/// Local knowledge (license statements, clearing state, copyrights) lives in
/// `additionalData`; identifiers used for idempotent lookup live in `externalIds`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
    #[serde(rename = "cpeId", default, skip_serializing_if = "Option::is_none")]
    cpe_id: Option<String>,
    #[serde(rename = "downloadurl", default, skip_serializing_if = "Option::is_none")]
    download_url: Option<String>,
    #[serde(rename = "componentId", default, skip_serializing_if = "Option::is_none")]
    component_id: Option<String>,
    #[serde(
        rename = "mainLicenseIds",
        default,
        skip_serializing_if = "BTreeSet::is_empty"
    )]
    main_license_ids: BTreeSet<String>,
    #[serde(rename = "externalIds", default, skip_serializing_if = "BTreeMap::is_empty")]
    external_ids: BTreeMap<String, String>,
    #[serde(
        rename = "additionalData",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    additional_data: BTreeMap<String, String>,
    #[serde(rename = "createdOn", default, skip_serializing_if = "Option::is_none")]
    created_on: Option<NaiveDate>,
    #[serde(skip)]
    proprietary: bool,
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    links: Links,
    #[serde(
        rename = "_embedded",
        default,
        skip_serializing_if = "ReleaseEmbedded::is_empty"
    )]
    embedded: ReleaseEmbedded,
}

impl Release {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Server-assigned identifier, absent until the release was created
    pub fn id(&self) -> Option<String> {
        self.links.self_id()
    }

    pub fn self_href(&self) -> Option<&str> {
        self.links.self_href()
    }

    pub fn with_self_link(mut self, href: impl Into<String>) -> Self {
        self.links = Links {
            self_link: Some(super::links::Href::new(href)),
            ..self.links
        };
        self
    }

    /// Identifier of the owning component, from the body or the component link
    pub fn component_id(&self) -> Option<String> {
        self.component_id.clone().or_else(|| {
            self.links
                .component_href()
                .and_then(id_from_href)
                .map(str::to_string)
        })
    }

    pub fn set_component_id(&mut self, component_id: impl Into<String>) {
        self.component_id = Some(component_id.into());
    }

    pub fn cpe_id(&self) -> Option<&str> {
        self.cpe_id.as_deref()
    }

    pub fn set_cpe_id(&mut self, cpe_id: impl Into<String>) {
        self.cpe_id = Some(cpe_id.into());
    }

    pub fn download_url(&self) -> Option<&str> {
        self.download_url.as_deref()
    }

    pub fn set_download_url(&mut self, url: impl Into<String>) {
        self.download_url = Some(url.into());
    }

    pub fn created_on(&self) -> Option<NaiveDate> {
        self.created_on
    }

    pub fn set_created_on(&mut self, created_on: NaiveDate) {
        self.created_on = Some(created_on);
    }

    pub fn is_proprietary(&self) -> bool {
        self.proprietary
    }

    pub fn set_proprietary(&mut self, proprietary: bool) {
        self.proprietary = proprietary;
    }

    pub fn main_license_ids(&self) -> &BTreeSet<String> {
        &self.main_license_ids
    }

    pub fn set_main_license_ids<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.main_license_ids = ids.into_iter().map(Into::into).collect();
    }

    /// Licenses the server resolved for this release
    pub fn embedded_licenses(&self) -> &[SparseLicense] {
        &self.embedded.licenses
    }

    /// Attachments already known on the server for this release
    pub fn attachments(&self) -> &[SparseAttachment] {
        &self.embedded.attachments
    }

    pub fn add_attachment(&mut self, attachment: SparseAttachment) {
        self.embedded.attachments.push(attachment);
    }

    pub fn external_ids(&self) -> &BTreeMap<String, String> {
        &self.external_ids
    }

    pub fn set_external_id(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.external_ids.insert(key.into(), value.into());
    }

    pub fn additional_data(&self) -> &BTreeMap<String, String> {
        &self.additional_data
    }

    pub fn declared_license(&self) -> Option<&str> {
        self.additional(DECLARED_LICENSE_KEY)
    }

    pub fn set_declared_license(&mut self, license: impl Into<String>) {
        self.set_additional(DECLARED_LICENSE_KEY, license);
    }

    pub fn observed_license(&self) -> Option<&str> {
        self.additional(OBSERVED_LICENSE_KEY)
    }

    pub fn set_observed_license(&mut self, license: impl Into<String>) {
        self.set_additional(OBSERVED_LICENSE_KEY, license);
    }

    pub fn overridden_license(&self) -> Option<&str> {
        self.additional(OVERRIDDEN_LICENSE_KEY)
    }

    pub fn set_overridden_license(&mut self, license: impl Into<String>) {
        self.set_additional(OVERRIDDEN_LICENSE_KEY, license);
    }

    pub fn clearing_state(&self) -> Option<&str> {
        self.additional(CLEARING_STATE_KEY)
    }

    pub fn set_clearing_state(&mut self, state: impl Into<String>) {
        self.set_additional(CLEARING_STATE_KEY, state);
    }

    pub fn change_status(&self) -> Option<&str> {
        self.additional(CHANGE_STATUS_KEY)
    }

    pub fn set_change_status(&mut self, status: impl Into<String>) {
        self.set_additional(CHANGE_STATUS_KEY, status);
    }

    pub fn copyrights(&self) -> Option<&str> {
        self.additional(COPYRIGHTS_KEY)
    }

    pub fn set_copyrights(&mut self, copyrights: impl Into<String>) {
        self.set_additional(COPYRIGHTS_KEY, copyrights);
    }

    pub fn release_tag_url(&self) -> Option<&str> {
        self.external_ids.get(RELEASE_TAG_URL_KEY).map(String::as_str)
    }

    pub fn set_release_tag_url(&mut self, url: impl Into<String>) {
        self.external_ids
            .insert(RELEASE_TAG_URL_KEY.to_string(), url.into());
    }

    pub fn software_heritage_id(&self) -> Option<&str> {
        self.external_ids
            .get(SOFTWARE_HERITAGE_ID_KEY)
            .map(String::as_str)
    }

    pub fn set_software_heritage_id(&mut self, swh: impl Into<String>) {
        self.external_ids
            .insert(SOFTWARE_HERITAGE_ID_KEY.to_string(), swh.into());
    }

    /// All hash values stored under the numbered `hash_N` external ids
    pub fn hashes(&self) -> BTreeSet<&str> {
        self.external_ids
            .iter()
            .filter(|(key, _)| key.starts_with(HASHES_PREFIX))
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Replaces all hashes. Keys are renumbered from `hash_1`, empty values are skipped.
    pub fn set_hashes<I, S>(&mut self, hashes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.external_ids
            .retain(|key, _| !key.starts_with(HASHES_PREFIX));

        let values = hashes
            .into_iter()
            .map(Into::into)
            .filter(|hash: &String| !hash.is_empty());
        for (index, hash) in values.enumerate() {
            self.external_ids
                .insert(format!("{}{}", HASHES_PREFIX, index + 1), hash);
        }
    }

    /// Checks the minimal fields required before the release can be resolved or created
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::invalid_entity("release", "name must not be empty").into());
        }
        if self.version.trim().is_empty() {
            return Err(CatalogError::invalid_entity(
                "release",
                format!("version of '{}' must not be empty", self.name),
            )
            .into());
        }
        Ok(())
    }

    /// Merges the set fields of `precedence` over this release.
    ///
    /// Fields `precedence` leaves unset keep their current value, so a remote
    /// copy merged with a local candidate retains server-only data such as
    /// its identifier, creation date and attachments.
    pub fn merge_with(mut self, precedence: &Release) -> Release {
        if !precedence.name.is_empty() {
            self.name = precedence.name.clone();
        }
        if !precedence.version.is_empty() {
            self.version = precedence.version.clone();
        }
        self.cpe_id = precedence.cpe_id.clone().or(self.cpe_id);
        self.download_url = precedence.download_url.clone().or(self.download_url);
        self.component_id = precedence.component_id.clone().or(self.component_id);
        if !precedence.main_license_ids.is_empty() {
            self.main_license_ids = precedence.main_license_ids.clone();
        }
        if precedence.links.self_href().is_some() {
            self.links.self_link = precedence.links.self_link.clone();
        }
        if precedence.links.component_href().is_some() {
            self.links.component = precedence.links.component.clone();
        }

        self.external_ids.extend(non_empty_entries(&precedence.external_ids));
        self.additional_data
            .extend(non_empty_entries(&precedence.additional_data));
        self.proprietary = self.proprietary || precedence.proprietary;

        self
    }

    fn additional(&self, key: &str) -> Option<&str> {
        self.additional_data.get(key).map(String::as_str)
    }

    fn set_additional(&mut self, key: &str, value: impl Into<String>) {
        self.additional_data.insert(key.to_string(), value.into());
    }
}

fn non_empty_entries(map: &BTreeMap<String, String>) -> impl Iterator<Item = (String, String)> + '_ {
    map.iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.clone(), value.clone()))
}

/// Release reference as embedded in components and search results
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SparseRelease {
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    links: Links,
}

impl SparseRelease {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
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

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn id(&self) -> Option<String> {
        self.links.self_id()
    }
}
