use crate::shared::Result;
use async_trait::async_trait;
use serde::Serialize;

/// A single search suggestion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// PackageSearch port for registry text search
///
/// Feeds package names into node creation; it plays no part in resolution.
#[async_trait]
pub trait PackageSearch: Send + Sync {
    /// Searches the registry
    ///
    /// # Arguments
    /// * `text` - Free search text
    /// * `size` - Maximum number of hits to return
    async fn search(&self, text: &str, size: usize) -> Result<Vec<SearchHit>>;
}
