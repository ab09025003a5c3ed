use crate::adapters::outbound::filesystem::{CacheCleanupReport, SourceCache};
use crate::application::dto::ReleaseWithSources;
use crate::catalog::domain::{Release, SparseAttachment};
use crate::catalog::services::SourceLayout;
use crate::ports::inbound::ReleaseAdapter;
use crate::ports::outbound::ProgressReporter;
use crate::shared::error::CatalogError;
use crate::shared::security::validate_attachment_filename;
use crate::shared::Result;
use futures::stream::{self, StreamExt};
use sha1::{Digest, Sha1};
use std::collections::{BTreeSet, HashSet};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_util::sync::CancellationToken;

/// Number of releases whose sources are downloaded at the same time
const MAX_CONCURRENT_DOWNLOADS: usize = 8;
const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// SourcesExporter - materializes source attachments in a local cache directory
///
/// Sources of a release land in `<source_dir>/<name>/<version>/`. A failed
/// download only drops that one file from the result.
///
/// # Type Parameters
/// * `PR` - ProgressReporter implementation
pub struct SourcesExporter<PR> {
    source_dir: PathBuf,
    progress_reporter: PR,
    cancellation: Option<CancellationToken>,
}

impl<PR: ProgressReporter> SourcesExporter<PR> {
    pub fn new(source_dir: impl Into<PathBuf>, progress_reporter: PR) -> Self {
        Self {
            source_dir: source_dir.into(),
            progress_reporter,
            cancellation: None,
        }
    }

    /// Stops starting new downloads once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Downloads the source attachments of all releases
    ///
    /// # Returns
    /// One entry per release with the paths that were materialized, newest
    /// release first, then by name and version
    pub async fn download_sources<RA>(&self, adapter: &RA, releases: &[Release]) -> Vec<ReleaseWithSources>
    where
        RA: ReleaseAdapter + ?Sized,
    {
        let total = releases.len();
        let completed = AtomicUsize::new(0);
        self.progress_reporter.report(&format!(
            "📥 Downloading sources of {} release(s) to {}",
            total,
            self.source_dir.display()
        ));

        let mut results: Vec<ReleaseWithSources> = stream::iter(releases)
            .map(|release| {
                let completed = &completed;
                async move {
                    let sources = self.download_release_sources(adapter, release).await;
                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    self.progress_reporter
                        .report_progress(done, total, Some(release.name()));
                    ReleaseWithSources::new(release.clone(), sources)
                }
            })
            .buffer_unordered(MAX_CONCURRENT_DOWNLOADS)
            .collect()
            .await;

        results.sort_by(|a, b| {
            let (a, b) = (a.release(), b.release());
            b.created_on()
                .cmp(&a.created_on())
                .then_with(|| a.name().cmp(b.name()))
                .then_with(|| a.version().cmp(b.version()))
        });

        let files: usize = results.iter().map(|r| r.sources().len()).sum();
        self.progress_reporter
            .report_completion(&format!("✅ {} source file(s) available", files));
        results
    }

    async fn download_release_sources<RA>(&self, adapter: &RA, release: &Release) -> BTreeSet<PathBuf>
    where
        RA: ReleaseAdapter + ?Sized,
    {
        let folder = SourceLayout::release_folder(&self.source_dir, release);
        let mut sources = BTreeSet::new();

        for attachment in release
            .attachments()
            .iter()
            .filter(|attachment| attachment.attachment_type().is_source())
        {
            if self.is_cancelled() {
                tracing::warn!(release = release.name(), "Source download cancelled");
                break;
            }

            match self.download_source(adapter, release, attachment, &folder).await {
                Ok(Some(path)) => {
                    sources.insert(path);
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(
                        release = release.name(),
                        version = release.version(),
                        file = attachment.filename(),
                        error = %error,
                        "Failed to download source attachment"
                    );
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Could not download {} of {}:{}",
                        attachment.filename(),
                        release.name(),
                        release.version()
                    ));
                }
            }
        }

        sources
    }

    async fn download_source<RA>(
        &self,
        adapter: &RA,
        release: &Release,
        attachment: &SparseAttachment,
        folder: &Path,
    ) -> Result<Option<PathBuf>>
    where
        RA: ReleaseAdapter + ?Sized,
    {
        validate_attachment_filename(attachment.filename(), folder)?;
        let local = folder.join(attachment.filename());

        if let Some(expected) = attachment.sha1() {
            if cached_copy_matches(&local, expected).await {
                tracing::debug!(path = %local.display(), "Reusing cached source file");
                return Ok(Some(local));
            }
        }

        match &self.cancellation {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(CatalogError::Cancelled {
                        operation: "source download".to_string(),
                    }
                    .into()),
                    downloaded = adapter.download_attachment(release, attachment, folder) => downloaded,
                }
            }
            None => adapter.download_attachment(release, attachment, folder).await,
        }
    }

    /// Deletes every file in the source directory not referenced by `releases`
    /// and every directory left empty
    ///
    /// # Errors
    /// Only fails if the cleanup task itself cannot run; per-file errors are
    /// logged and counted in the report
    pub async fn remove_unreferenced_files(
        &self,
        releases: &[ReleaseWithSources],
    ) -> Result<CacheCleanupReport> {
        let referenced: HashSet<PathBuf> = releases
            .iter()
            .flat_map(|release| release.sources().iter().cloned())
            .collect();
        let root = self.source_dir.clone();

        let report = tokio::task::spawn_blocking(move || {
            SourceCache::remove_unreferenced(&root, &referenced)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Cache cleanup task failed: {}", e))?;

        if !report.deleted_files.is_empty() {
            self.progress_reporter.report(&format!(
                "🧹 Removed {} unreferenced file(s) from the source cache",
                report.deleted_files.len()
            ));
        }
        Ok(report)
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}

/// Checks whether `local` already holds content with the SHA-1 `expected`
///
/// Hashing runs on the blocking pool. An existing entry that cannot be hashed
/// counts as a mismatch, so the attachment is downloaded again.
async fn cached_copy_matches(local: &Path, expected: &str) -> bool {
    let path = local.to_path_buf();
    let hashed = tokio::task::spawn_blocking(move || -> Result<Option<String>> {
        if fs::symlink_metadata(&path).is_err() {
            return Ok(None);
        }
        calculate_sha1_hash(&path).map(Some)
    })
    .await;

    match hashed {
        Ok(Ok(Some(actual))) => actual.eq_ignore_ascii_case(expected),
        Ok(Ok(None)) => false,
        Ok(Err(error)) => {
            tracing::warn!(
                path = %local.display(),
                error = %error,
                "Failed to hash cached source file, downloading it again"
            );
            false
        }
        Err(error) => {
            tracing::warn!(path = %local.display(), error = %error, "Hash task failed");
            false
        }
    }
}

/// Computes the lowercase hex digest of a file with any `Digest` algorithm
pub fn calculate_hash<D: Digest>(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| CatalogError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    let mut hasher = D::new();
    let mut buffer = vec![0u8; HASH_BUFFER_SIZE];
    loop {
        let read = file
            .read(&mut buffer)
            .map_err(|e| CatalogError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// SHA-1 of a file, the checksum the catalog stores for attachments
pub fn calculate_sha1_hash(path: &Path) -> Result<String> {
    calculate_hash::<Sha1>(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_calculate_sha1_hash() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hello.txt");
        std::fs::write(&path, b"hello world").unwrap();

        assert_eq!(
            calculate_sha1_hash(&path).unwrap(),
            "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
        );
    }

    #[tokio::test]
    async fn test_cached_copy_matches() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sources.zip");
        std::fs::write(&path, b"hello world").unwrap();

        assert!(cached_copy_matches(&path, "2AAE6C35C94FCFB415DBE95F408B9CE91EE846ED").await);
        assert!(!cached_copy_matches(&path, "0000").await);
        assert!(!cached_copy_matches(&temp_dir.path().join("absent.zip"), "0000").await);
    }

    #[tokio::test]
    async fn test_cached_copy_that_cannot_be_hashed_is_a_mismatch() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sources.zip");
        std::fs::create_dir(&path).unwrap();

        assert!(calculate_sha1_hash(&path).is_err());
        assert!(!cached_copy_matches(&path, "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed").await);
    }

    #[test]
    fn test_calculate_hash_missing_file() {
        let err = calculate_sha1_hash(Path::new("/nonexistent/file")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::FileReadError { .. })
        ));
    }
}
