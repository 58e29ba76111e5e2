use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Dependency name to range mapping as found in registry metadata.
///
/// Keeps the document's key order, which decides node discovery order.
pub type DependencyMap = IndexMap<String, String>;

/// Registry document for a package (`GET {registry}/{name}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "lenient_versions")]
    pub versions: BTreeMap<String, VersionMetadata>,
}

impl PackageMetadata {
    /// The `latest` dist-tag, if published
    pub fn latest(&self) -> Option<&str> {
        self.dist_tags.get("latest").map(String::as_str)
    }

    /// Wraps a single installed manifest (e.g. from node_modules) as a
    /// registry document that offers exactly that version as `latest`.
    pub fn from_installed(version_metadata: VersionMetadata) -> Self {
        let mut metadata = Self {
            name: version_metadata.name.clone(),
            description: version_metadata.description.clone(),
            ..Self::default()
        };
        if let Some(version) = version_metadata.version.clone() {
            metadata
                .dist_tags
                .insert("latest".to_string(), version.clone());
            metadata.versions.insert(version, version_metadata);
        }
        metadata
    }
}

/// Per-version document; also the shape of an installed package.json
///
/// Fields with an unexpected shape decode as absent, so one odd entry
/// never rejects the surrounding registry document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMetadata {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub dependencies: Option<DependencyMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub optional_dependencies: Option<DependencyMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub peer_dependencies: Option<DependencyMap>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

/// A version entry that is not an object is kept as an empty version
fn lenient_versions<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, VersionMetadata>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(version, value)| {
            let metadata = serde_json::from_value(value).unwrap_or_default();
            (version, metadata)
        })
        .collect())
}
