use crate::graph_resolution::domain::PackageMetadata;
use crate::shared::Result;
use async_trait::async_trait;

/// MetadataSource port for fetching registry documents
///
/// This port abstracts where package metadata comes from: the remote npm
/// registry, a local `node_modules` tree, or an in-memory fake in tests.
///
/// # Errors
/// Implementations should return a [`DepGraphError`] (`NotFound` or
/// `MetadataFetch`) wrapped in `anyhow::Error` so callers can classify it.
/// Any other error is treated as a fetch failure.
///
/// [`DepGraphError`]: crate::shared::error::DepGraphError
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetches the full metadata document for a package
    ///
    /// # Arguments
    /// * `package_name` - Package name, possibly scoped (`@scope/name`)
    async fn fetch_metadata(&self, package_name: &str) -> Result<PackageMetadata>;
}
