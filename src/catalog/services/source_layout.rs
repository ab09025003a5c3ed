use crate::catalog::domain::Release;
use std::path::{Path, PathBuf};

/// SourceLayout service deciding where downloaded sources live in the cache
///
/// Every release gets `<root>/<name>/<version>/`, with both segments sanitized.
pub struct SourceLayout;

impl SourceLayout {
    /// Replaces every character outside `[A-Za-z0-9.:-]` with `_`
    pub fn sanitize_path_component(value: &str) -> String {
        let sanitized: String = value
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | ':' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        // A bare ".." would escape the cache
        if sanitized.chars().all(|c| c == '.') {
            sanitized.replace('.', "_")
        } else {
            sanitized
        }
    }

    /// Directory the sources of `release` are downloaded to
    ///
    /// The mapping is lossy: names differing only in replaced characters
    /// (`a/b` and `a_b`) share a folder.
    pub fn release_folder(root: &Path, release: &Release) -> PathBuf {
        root.join(Self::sanitize_path_component(release.name()))
            .join(Self::sanitize_path_component(release.version()))
    }
}
