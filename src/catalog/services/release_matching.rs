use crate::catalog::domain::{Component, SparseAttachment, SparseRelease};
use crate::shared::error::CatalogError;
use crate::shared::Result;
use std::collections::BTreeMap;

/// ReleaseMatcher service selecting remote candidates for a local release
///
/// Pure logic over already fetched search results; no I/O.
pub struct ReleaseMatcher;

impl ReleaseMatcher {
    /// Selects the single release matched by an external-id search
    ///
    /// # Arguments
    /// * `candidates` - Releases returned by the external-id search
    /// * `external_ids` - The identifiers that were searched for
    ///
    /// # Returns
    /// `None` when nothing matched, the match when exactly one did
    ///
    /// # Errors
    /// Returns `CatalogError::AmbiguousMatch` when more than one release matched
    pub fn select_unique_by_external_ids(
        candidates: Vec<SparseRelease>,
        external_ids: &BTreeMap<String, String>,
    ) -> Result<Option<SparseRelease>> {
        if candidates.len() > 1 {
            return Err(CatalogError::AmbiguousMatch {
                count: candidates.len(),
                external_ids: format_external_ids(external_ids),
            }
            .into());
        }
        Ok(candidates.into_iter().next())
    }

    /// Finds the first embedded release of a component with exactly the given version
    pub fn find_release_by_version<'a>(
        component: &'a Component,
        version: &str,
    ) -> Option<&'a SparseRelease> {
        component
            .releases()
            .iter()
            .find(|release| release.version() == version)
    }

    /// Checks whether an attachment with the same file name is already known
    pub fn is_duplicate_attachment(filename: &str, attachments: &[SparseAttachment]) -> bool {
        attachments
            .iter()
            .any(|attachment| attachment.filename() == filename)
    }
}

fn format_external_ids(external_ids: &BTreeMap<String, String>) -> String {
    let pairs: Vec<String> = external_ids
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::domain::AttachmentType;

    fn ids() -> BTreeMap<String, String> {
        BTreeMap::from([("hash_1".to_string(), "abc".to_string())])
    }

    #[test]
    fn test_select_unique_none() {
        let selected = ReleaseMatcher::select_unique_by_external_ids(vec![], &ids()).unwrap();
        assert!(selected.is_none());
    }

    #[test]
    fn test_select_unique_single() {
        let candidate = SparseRelease::new("commons-io", "2.6").with_self_link("/releases/r-1");
        let selected =
            ReleaseMatcher::select_unique_by_external_ids(vec![candidate.clone()], &ids()).unwrap();
        assert_eq!(selected, Some(candidate));
    }

    #[test]
    fn test_select_unique_ambiguous() {
        let candidates = vec![
            SparseRelease::new("commons-io", "2.6").with_self_link("/releases/r-1"),
            SparseRelease::new("commons-io", "2.6").with_self_link("/releases/r-2"),
        ];
        let err = ReleaseMatcher::select_unique_by_external_ids(candidates, &ids()).unwrap_err();
        match err.downcast_ref::<CatalogError>() {
            Some(CatalogError::AmbiguousMatch {
                count,
                external_ids,
            }) => {
                assert_eq!(*count, 2);
                assert_eq!(external_ids, "{hash_1=abc}");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_find_release_by_version_exact_match() {
        let mut component = Component::new("commons-io").with_category("Library");
        component.add_release(SparseRelease::new("commons-io", "2.6.1"));
        component.add_release(SparseRelease::new("commons-io", "2.6"));

        let found = ReleaseMatcher::find_release_by_version(&component, "2.6").unwrap();
        assert_eq!(found.version(), "2.6");
        assert!(ReleaseMatcher::find_release_by_version(&component, "2").is_none());
    }

    #[test]
    fn test_is_duplicate_attachment() {
        let attachments = vec![SparseAttachment::new("src.zip", AttachmentType::Source)];
        assert!(ReleaseMatcher::is_duplicate_attachment("src.zip", &attachments));
        assert!(!ReleaseMatcher::is_duplicate_attachment("doc.pdf", &attachments));
    }
}
