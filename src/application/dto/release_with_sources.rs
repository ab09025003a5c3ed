use crate::catalog::domain::Release;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// A release together with the local paths of its downloaded source attachments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseWithSources {
    release: Release,
    sources: BTreeSet<PathBuf>,
}

impl ReleaseWithSources {
    pub fn new(release: Release, sources: BTreeSet<PathBuf>) -> Self {
        Self { release, sources }
    }

    pub fn release(&self) -> &Release {
        &self.release
    }

    pub fn sources(&self) -> &BTreeSet<PathBuf> {
        &self.sources
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.sources.contains(path)
    }
}
