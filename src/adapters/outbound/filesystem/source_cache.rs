use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Outcome of a cache cleanup
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheCleanupReport {
    pub deleted_files: Vec<PathBuf>,
    pub deleted_directories: Vec<PathBuf>,
    /// Entries that could not be inspected or deleted
    pub failures: usize,
}

/// SourceCache adapter maintaining the local source download directory
pub struct SourceCache;

impl SourceCache {
    /// Deletes every file below `root` that is not in `referenced`, then every
    /// directory left empty. The root itself is kept.
    ///
    /// Errors on individual entries are logged and skipped.
    pub fn remove_unreferenced(root: &Path, referenced: &HashSet<PathBuf>) -> CacheCleanupReport {
        let mut report = CacheCleanupReport::default();

        if !root.is_dir() {
            return report;
        }

        // Children are visited before their directory, so emptied directories
        // can be removed on the way up.
        for entry in WalkDir::new(root).min_depth(1).contents_first(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to inspect cache entry");
                    report.failures += 1;
                    continue;
                }
            };
            let path = entry.path();

            if entry.file_type().is_dir() {
                if is_empty_dir(path) {
                    match fs::remove_dir(path) {
                        Ok(()) => {
                            tracing::info!(path = %path.display(), "Removed empty cache directory");
                            report.deleted_directories.push(path.to_path_buf());
                        }
                        Err(e) => {
                            tracing::warn!(path = %path.display(), error = %e, "Failed to remove cache directory");
                            report.failures += 1;
                        }
                    }
                }
            } else if !referenced.contains(path) {
                match fs::remove_file(path) {
                    Ok(()) => {
                        tracing::info!(path = %path.display(), "Removed unreferenced file");
                        report.deleted_files.push(path.to_path_buf());
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to remove unreferenced file");
                        report.failures += 1;
                    }
                }
            }
        }

        report
    }
}

fn is_empty_dir(path: &Path) -> bool {
    fs::read_dir(path)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}
