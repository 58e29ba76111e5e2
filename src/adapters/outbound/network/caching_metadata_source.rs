use crate::graph_resolution::domain::PackageMetadata;
use crate::ports::outbound::MetadataSource;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingMetadataSource wraps a MetadataSource and adds in-memory caching.
///
/// Successful documents are kept for the lifetime of the process, keyed by
/// package name. Failures are never cached, so a package that failed to
/// load is fetched again on the next attempt.
pub struct CachingMetadataSource<S: MetadataSource> {
    inner: S,
    cache: Arc<DashMap<String, PackageMetadata>>,
}

impl<S: MetadataSource> CachingMetadataSource<S> {
    /// Creates a new caching source wrapping the given inner source
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: MetadataSource> MetadataSource for CachingMetadataSource<S> {
    async fn fetch_metadata(&self, package_name: &str) -> Result<PackageMetadata> {
        if let Some(cached) = self.cache.get(package_name) {
            return Ok(cached.clone());
        }

        let metadata = self.inner.fetch_metadata(package_name).await?;
        self.cache
            .insert(package_name.to_string(), metadata.clone());

        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeRegistry;

    #[tokio::test]
    async fn test_returns_cached_document() {
        let source =
            CachingMetadataSource::new(FakeRegistry::new().with_package("react", "16.4.0", &[]));

        let first = source.fetch_metadata("react").await.unwrap();
        let second = source.fetch_metadata("react").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(source.inner().fetch_count("react"), 1);
        assert_eq!(source.cache_size(), 1);
    }

    #[tokio::test]
    async fn test_packages_cached_separately() {
        let source = CachingMetadataSource::new(
            FakeRegistry::new()
                .with_package("react", "16.4.0", &[])
                .with_package("vue", "3.0.0", &[]),
        );

        source.fetch_metadata("react").await.unwrap();
        source.fetch_metadata("vue").await.unwrap();

        assert_eq!(source.cache_size(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let source =
            CachingMetadataSource::new(FakeRegistry::new().with_failure("flaky", "timeout"));

        assert!(source.fetch_metadata("flaky").await.is_err());
        assert!(source.fetch_metadata("flaky").await.is_err());

        assert_eq!(source.inner().fetch_count("flaky"), 2);
        assert_eq!(source.cache_size(), 0);
    }
}
