use super::DependencyMap;
use crate::shared::Result;
use serde::Deserialize;

/// A local package.json used to seed the graph with a root package
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dependencies: Option<DependencyMap>,
    #[serde(default)]
    pub optional_dependencies: Option<DependencyMap>,
    #[serde(default)]
    pub peer_dependencies: Option<DependencyMap>,
}

impl PackageManifest {
    pub fn from_json(content: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(content)?;
        if manifest.name.trim().is_empty() {
            anyhow::bail!("Manifest \"name\" field must not be empty");
        }
        Ok(manifest)
    }

    /// Total number of declared dependency entries across all maps
    pub fn dependency_count(&self) -> usize {
        [
            &self.dependencies,
            &self.optional_dependencies,
            &self.peer_dependencies,
        ]
        .iter()
        .map(|m| m.as_ref().map_or(0, |m| m.len()))
        .sum()
    }
}
