use crate::catalog::domain::License;
use crate::ports::inbound::LicenseAdapter;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingLicenseAdapter wraps a LicenseAdapter and adds in-memory caching.
///
/// This adapter implements the decorator pattern: licenses change rarely,
/// but the same handful of them is looked up for almost every release.
/// Negative results are cached as well. Failed lookups are not cached.
pub struct CachingLicenseAdapter<L> {
    inner: L,
    cache: Arc<DashMap<String, Option<License>>>,
}

impl<L: LicenseAdapter> CachingLicenseAdapter<L> {
    /// Creates a new caching adapter wrapping the given inner adapter
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

/// Clones share the cache
impl<L: LicenseAdapter + Clone> Clone for CachingLicenseAdapter<L> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            cache: Arc::clone(&self.cache),
        }
    }
}

#[async_trait]
impl<L: LicenseAdapter> LicenseAdapter for CachingLicenseAdapter<L> {
    async fn get_license_by_name(&self, name: &str) -> Result<Option<License>> {
        if let Some(cached) = self.cache.get(name) {
            return Ok(cached.clone());
        }

        let license = self.inner.get_license_by_name(name).await?;
        self.cache.insert(name.to_string(), license.clone());

        Ok(license)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock adapter for testing that tracks call counts
    struct MockLicenseAdapter {
        call_count: AtomicUsize,
    }

    impl MockLicenseAdapter {
        fn new() -> Self {
            Self {
                call_count: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LicenseAdapter for MockLicenseAdapter {
        async fn get_license_by_name(&self, name: &str) -> Result<Option<License>> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if name == "unknown" {
                return Ok(None);
            }
            if name == "broken" {
                anyhow::bail!("connection reset");
            }
            Ok(Some(License::new(name).with_full_name(format!("{} License", name))))
        }
    }

    #[tokio::test]
    async fn test_caching_adapter_returns_cached_value() {
        let adapter = CachingLicenseAdapter::new(MockLicenseAdapter::new());

        let first = adapter.get_license_by_name("MIT").await.unwrap();
        let second = adapter.get_license_by_name("MIT").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.unwrap().full_name(), Some("MIT License"));
        assert_eq!(adapter.inner.call_count.load(Ordering::SeqCst), 1);
        assert_eq!(adapter.cache_size(), 1);
    }

    #[tokio::test]
    async fn test_caching_adapter_caches_absent_license() {
        let adapter = CachingLicenseAdapter::new(MockLicenseAdapter::new());

        assert!(adapter.get_license_by_name("unknown").await.unwrap().is_none());
        assert!(adapter.get_license_by_name("unknown").await.unwrap().is_none());
        assert_eq!(adapter.inner.call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_caching_adapter_does_not_cache_errors() {
        let adapter = CachingLicenseAdapter::new(MockLicenseAdapter::new());

        assert!(adapter.get_license_by_name("broken").await.is_err());
        assert!(adapter.get_license_by_name("broken").await.is_err());
        assert_eq!(adapter.inner.call_count.load(Ordering::SeqCst), 2);
        assert_eq!(adapter.cache_size(), 0);
    }
}
