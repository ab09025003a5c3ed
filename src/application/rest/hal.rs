use crate::shared::Result;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

const EMBEDDED: &str = "_embedded";
const LINKS: &str = "_links";

/// Extracts `_embedded.<key>` from a HAL list response
///
/// A missing body, a missing `_embedded` section or a missing key all mean
/// an empty result.
pub(crate) fn embedded_list<T: DeserializeOwned>(body: Option<Value>, key: &str) -> Result<Vec<T>> {
    let Some(mut body) = body else {
        return Ok(Vec::new());
    };
    match body.get_mut(EMBEDDED).and_then(|embedded| embedded.get_mut(key)) {
        Some(list) => serde_json::from_value(list.take())
            .with_context(|| format!("Failed to parse embedded '{}' list", key)),
        None => Ok(Vec::new()),
    }
}

/// Parses a single HAL resource
pub(crate) fn entity<T: DeserializeOwned>(body: Value, kind: &str) -> Result<T> {
    serde_json::from_value(body).with_context(|| format!("Failed to parse {} response", kind))
}

/// Serializes an entity for POST/PATCH without its server-owned HAL sections
pub(crate) fn request_body<T: Serialize>(entity: &T) -> Result<Value> {
    let mut body = serde_json::to_value(entity)?;
    if let Some(object) = body.as_object_mut() {
        object.remove(LINKS);
        object.remove(EMBEDDED);
    }
    Ok(body)
}
