use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use sw360_adapter::prelude::*;

pub const FAKE_BASE: &str = "http://fake/api";

#[derive(Default)]
struct CatalogState {
    next_id: usize,
    components: BTreeMap<String, Value>,
    releases: BTreeMap<String, Value>,
    projects: BTreeMap<String, Value>,
    project_releases: BTreeMap<String, Vec<String>>,
    contents: HashMap<String, Vec<u8>>,
    failing_downloads: HashSet<String>,
    reject_next_component_create: bool,
    requests: Vec<(String, String)>,
    bodies: Vec<Value>,
}

impl CatalogState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

/// In-memory catalog implementing CatalogTransport
///
/// Resources get hrefs below `http://fake/api`. The component search matches
/// substrings like the real server does, so callers must filter exact names.
#[derive(Default)]
pub struct FakeCatalog {
    state: Mutex<CatalogState>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component and returns its id
    pub fn seed_component(&self, name: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id("c");
        let component = json!({
            "name": name,
            "componentType": "OSS",
            "categories": ["Library"],
            "_links": {"self": {"href": format!("{}/components/{}", FAKE_BASE, id)}},
            "_embedded": {"sw360:releases": []}
        });
        state.components.insert(id.clone(), component);
        id
    }

    /// Adds a release below an existing component and returns its id
    pub fn seed_release(
        &self,
        component_id: &str,
        name: &str,
        version: &str,
        external_ids: &[(&str, &str)],
    ) -> String {
        let external_ids: Map<String, Value> = external_ids
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        let mut body = json!({
            "name": name,
            "version": version,
            "componentId": component_id,
            "externalIds": external_ids,
        });
        let mut state = self.state.lock().unwrap();
        let id = state.next_id("r");
        Self::store_release(&mut state, &id, &mut body);
        id
    }

    /// Sets a top-level field of a stored release
    pub fn set_release_field(&self, release_id: &str, key: &str, value: Value) {
        let mut state = self.state.lock().unwrap();
        let release = state.releases.get_mut(release_id).unwrap();
        release[key] = value;
    }

    /// Attaches a file to a stored release and returns the attachment id
    pub fn seed_attachment(
        &self,
        release_id: &str,
        filename: &str,
        attachment_type: &str,
        content: &[u8],
    ) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id("a");
        Self::append_attachment(&mut state, release_id, &id, filename, attachment_type, content);
        id
    }

    /// Adds a project and returns its id
    pub fn seed_project(&self, name: &str, version: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id("p");
        let project = json!({
            "name": name,
            "version": version,
            "projectType": "CUSTOMER",
            "visibility": "EVERYONE",
            "_links": {"self": {"href": format!("{}/projects/{}", FAKE_BASE, id)}}
        });
        state.projects.insert(id.clone(), project);
        id
    }

    pub fn project_json(&self, project_id: &str) -> Value {
        self.state.lock().unwrap().projects[project_id].clone()
    }

    pub fn project_count(&self) -> usize {
        self.state.lock().unwrap().projects.len()
    }

    /// Release hrefs linked to a project, in link order
    pub fn linked_releases(&self, project_id: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .project_releases
            .get(project_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Makes downloads of the attachment fail with an empty body
    pub fn fail_download(&self, attachment_id: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_downloads
            .insert(attachment_id.to_string());
    }

    /// Simulates a concurrent creator: the next component create is stored
    /// but answered with 409
    pub fn reject_next_component_create(&self) {
        self.state.lock().unwrap().reject_next_component_create = true;
    }

    pub fn release_json(&self, release_id: &str) -> Value {
        self.state.lock().unwrap().releases[release_id].clone()
    }

    pub fn release_count(&self) -> usize {
        self.state.lock().unwrap().releases.len()
    }

    pub fn component_count(&self) -> usize {
        self.state.lock().unwrap().components.len()
    }

    /// Number of requests with the given method (GET, POST, PATCH, UPLOAD, DOWNLOAD)
    pub fn calls(&self, method: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|(m, _)| m == method)
            .count()
    }

    /// Every write body received (POST and PATCH), in order
    pub fn bodies(&self) -> Vec<Value> {
        self.state.lock().unwrap().bodies.clone()
    }

    pub fn requests(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().requests.clone()
    }

    fn store_release(state: &mut CatalogState, id: &str, body: &mut Value) {
        let component_id = body["componentId"].as_str().unwrap_or_default().to_string();
        body["_links"] = json!({
            "self": {"href": format!("{}/releases/{}", FAKE_BASE, id)},
            "sw360:component": {"href": format!("{}/components/{}", FAKE_BASE, component_id)}
        });
        if body.get("_embedded").is_none() {
            body["_embedded"] = json!({"sw360:attachments": []});
        }

        if let Some(component) = state.components.get_mut(&component_id) {
            let sparse = json!({
                "name": body["name"].clone(),
                "version": body["version"].clone(),
                "_links": {"self": {"href": format!("{}/releases/{}", FAKE_BASE, id)}}
            });
            component["_embedded"]["sw360:releases"]
                .as_array_mut()
                .unwrap()
                .push(sparse);
        }
        state.releases.insert(id.to_string(), body.clone());
    }

    fn append_attachment(
        state: &mut CatalogState,
        release_id: &str,
        attachment_id: &str,
        filename: &str,
        attachment_type: &str,
        content: &[u8],
    ) {
        let release = state.releases.get_mut(release_id).unwrap();
        let attachment = json!({
            "filename": filename,
            "attachmentType": attachment_type,
            "sha1": sha1_hex(content),
            "_links": {"self": {"href": format!("{}/attachments/{}", FAKE_BASE, attachment_id)}}
        });
        if release["_embedded"]["sw360:attachments"].is_null() {
            release["_embedded"]["sw360:attachments"] = json!([]);
        }
        release["_embedded"]["sw360:attachments"]
            .as_array_mut()
            .unwrap()
            .push(attachment);
        state
            .contents
            .insert(attachment_id.to_string(), content.to_vec());
    }

    fn log(&self, method: &str, path: &str) {
        self.state
            .lock()
            .unwrap()
            .requests
            .push((method.to_string(), path.to_string()));
    }
}

fn sha1_hex(content: &[u8]) -> String {
    use sha1::{Digest, Sha1};
    hex::encode(Sha1::digest(content))
}

fn relative(path: &str) -> &str {
    path.strip_prefix(FAKE_BASE).unwrap_or(path)
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn query_pairs(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| {
            (
                urlencoding::decode(k).unwrap().into_owned(),
                urlencoding::decode(v).unwrap().into_owned(),
            )
        })
        .collect()
}

fn not_found(path: &str) -> anyhow::Error {
    CatalogError::RequestFailed {
        status: 404,
        endpoint: path.to_string(),
        message: "Not Found".to_string(),
    }
    .into()
}

#[async_trait]
impl CatalogTransport for FakeCatalog {
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        self.log("GET", path);
        let path = relative(path);
        let (path, query) = path.split_once('?').unwrap_or((path, ""));
        let state = self.state.lock().unwrap();

        match segments(path).as_slice() {
            ["components"] => {
                let pairs = query_pairs(query);
                let name = pairs
                    .iter()
                    .find(|(k, _)| k == "name")
                    .map(|(_, v)| v.clone())
                    .unwrap_or_default();
                let hits: Vec<Value> = state
                    .components
                    .values()
                    .filter(|c| c["name"].as_str().unwrap_or_default().contains(&name))
                    .map(|c| json!({"name": c["name"].clone(), "_links": c["_links"].clone()}))
                    .collect();
                if hits.is_empty() {
                    return Ok(Some(json!({})));
                }
                Ok(Some(json!({"_embedded": {"sw360:components": hits}})))
            }
            ["components", id] => Ok(state.components.get(*id).cloned()),
            ["releases", "searchByExternalIds"] => {
                let pairs = query_pairs(query);
                let hits: Vec<Value> = state
                    .releases
                    .values()
                    .filter(|r| {
                        pairs
                            .iter()
                            .all(|(k, v)| r["externalIds"][k].as_str() == Some(v.as_str()))
                    })
                    .map(|r| {
                        json!({
                            "name": r["name"].clone(),
                            "version": r["version"].clone(),
                            "_links": {"self": r["_links"]["self"].clone()}
                        })
                    })
                    .collect();
                if hits.is_empty() {
                    return Ok(None);
                }
                Ok(Some(json!({"_embedded": {"sw360:releases": hits}})))
            }
            ["releases", id] => Ok(state.releases.get(*id).cloned()),
            ["projects"] => {
                let pairs = query_pairs(query);
                let name = pairs
                    .iter()
                    .find(|(k, _)| k == "name")
                    .map(|(_, v)| v.to_lowercase())
                    .unwrap_or_default();
                let hits: Vec<Value> = state
                    .projects
                    .values()
                    .filter(|p| {
                        p["name"]
                            .as_str()
                            .unwrap_or_default()
                            .to_lowercase()
                            .contains(&name)
                    })
                    .map(|p| {
                        json!({
                            "name": p["name"].clone(),
                            "version": p["version"].clone(),
                            "_links": p["_links"].clone()
                        })
                    })
                    .collect();
                Ok(Some(json!({"_embedded": {"sw360:projects": hits}})))
            }
            ["projects", id, "releases"] => {
                let Some(hrefs) = state.project_releases.get(*id) else {
                    return Ok(None);
                };
                let linked: Vec<Value> = hrefs
                    .iter()
                    .filter_map(|href| {
                        let id = relative(href).trim_start_matches("/releases/");
                        state.releases.get(id)
                    })
                    .map(|r| {
                        json!({
                            "name": r["name"].clone(),
                            "version": r["version"].clone(),
                            "_links": {"self": r["_links"]["self"].clone()}
                        })
                    })
                    .collect();
                Ok(Some(json!({"_embedded": {"sw360:releases": linked}})))
            }
            ["licenses", name] => {
                let name = urlencoding::decode(name).unwrap().into_owned();
                if name == "Apache-2.0" {
                    Ok(Some(json!({"shortName": name, "fullName": "Apache License 2.0"})))
                } else {
                    Ok(None)
                }
            }
            _ => Ok(None),
        }
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.log("POST", path);
        let rel = relative(path);
        let mut state = self.state.lock().unwrap();
        state.bodies.push(body.clone());

        match segments(rel).as_slice() {
            ["components"] => {
                let id = state.next_id("c");
                let mut component = body.clone();
                component["_links"] =
                    json!({"self": {"href": format!("{}/components/{}", FAKE_BASE, id)}});
                component["_embedded"] = json!({"sw360:releases": []});
                state.components.insert(id, component.clone());

                if std::mem::take(&mut state.reject_next_component_create) {
                    return Err(CatalogError::RequestFailed {
                        status: 409,
                        endpoint: path.to_string(),
                        message: "Conflict".to_string(),
                    }
                    .into());
                }
                Ok(component)
            }
            ["releases"] => {
                let id = state.next_id("r");
                let mut release = body.clone();
                Self::store_release(&mut state, &id, &mut release);
                Ok(release)
            }
            ["projects"] => {
                let id = state.next_id("p");
                let mut project = body.clone();
                project["_links"] =
                    json!({"self": {"href": format!("{}/projects/{}", FAKE_BASE, id)}});
                state.projects.insert(id, project.clone());
                Ok(project)
            }
            ["projects", id, "releases"] => {
                let project_id = id.to_string();
                if !state.projects.contains_key(&project_id) {
                    return Err(not_found(path));
                }
                let hrefs: Vec<String> = body
                    .as_array()
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(|item| item.as_str().map(str::to_string))
                            .collect()
                    })
                    .unwrap_or_default();
                state
                    .project_releases
                    .entry(project_id)
                    .or_default()
                    .extend(hrefs);
                // The server answers this request with an empty body
                Err(CatalogError::NoContent {
                    endpoint: path.to_string(),
                }
                .into())
            }
            _ => Err(not_found(path)),
        }
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<Value> {
        self.log("PATCH", path);
        let rel = relative(path);
        let mut state = self.state.lock().unwrap();
        state.bodies.push(body.clone());

        match segments(rel).as_slice() {
            ["releases", id] => {
                let stored = state
                    .releases
                    .get_mut(*id)
                    .ok_or_else(|| not_found(path))?;
                if let Some(fields) = body.as_object() {
                    for (key, value) in fields {
                        stored[key.as_str()] = value.clone();
                    }
                }
                Ok(stored.clone())
            }
            _ => Err(not_found(path)),
        }
    }

    async fn upload_multipart(&self, path: &str, upload: MultipartUpload) -> Result<Value> {
        self.log("UPLOAD", path);
        let rel = relative(path);
        let mut state = self.state.lock().unwrap();

        match segments(rel).as_slice() {
            ["releases", id, "attachments"] => {
                let release_id = id.to_string();
                if !state.releases.contains_key(&release_id) {
                    return Err(not_found(path));
                }
                let attachment_id = state.next_id("a");
                let attachment_type = upload.metadata["attachmentType"]
                    .as_str()
                    .unwrap_or("OTHER")
                    .to_string();
                Self::append_attachment(
                    &mut state,
                    &release_id,
                    &attachment_id,
                    &upload.file_name,
                    &attachment_type,
                    &upload.file_bytes,
                );
                Ok(state.releases[&release_id].clone())
            }
            _ => Err(not_found(path)),
        }
    }

    async fn download_binary(&self, path: &str) -> Result<Vec<u8>> {
        self.log("DOWNLOAD", path);
        let rel = relative(path);
        let state = self.state.lock().unwrap();

        match segments(rel).as_slice() {
            ["releases", _, "attachments", attachment_id] => {
                if state.failing_downloads.contains(*attachment_id) {
                    return Err(CatalogError::NoContent {
                        endpoint: path.to_string(),
                    }
                    .into());
                }
                state
                    .contents
                    .get(*attachment_id)
                    .cloned()
                    .ok_or_else(|| not_found(path))
            }
            _ => Err(not_found(path)),
        }
    }
}
