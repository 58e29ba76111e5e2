use async_trait::async_trait;
use depgraph_navigator::prelude::*;
use depgraph_navigator::shared::error::DepGraphError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock MetadataSource serving an in-memory registry
///
/// Every published version becomes `latest` for its package. Fetches are
/// counted per package name.
#[derive(Default, Clone)]
pub struct MockMetadataSource {
    packages: HashMap<String, PackageMetadata>,
    failures: HashMap<String, String>,
    fetches: Arc<Mutex<HashMap<String, usize>>>,
}

impl MockMetadataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(
        mut self,
        name: &str,
        version: &str,
        dependencies: &[(&str, &str)],
    ) -> Self {
        let dependencies: DependencyMap = dependencies
            .iter()
            .map(|(name, range)| (name.to_string(), range.to_string()))
            .collect();
        let metadata = self
            .packages
            .entry(name.to_string())
            .or_insert_with(|| PackageMetadata {
                name: Some(name.to_string()),
                ..PackageMetadata::default()
            });
        metadata
            .dist_tags
            .insert("latest".to_string(), version.to_string());
        metadata.versions.insert(
            version.to_string(),
            VersionMetadata {
                name: Some(name.to_string()),
                version: Some(version.to_string()),
                description: Some(format!("The {} package", name)),
                dependencies: Some(dependencies),
                ..VersionMetadata::default()
            },
        );
        self
    }

    pub fn with_failure(mut self, name: &str, details: &str) -> Self {
        self.failures.insert(name.to_string(), details.to_string());
        self
    }

    pub fn fetch_count(&self, name: &str) -> usize {
        self.fetches
            .lock()
            .unwrap()
            .get(name)
            .copied()
            .unwrap_or_default()
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl MetadataSource for MockMetadataSource {
    async fn fetch_metadata(&self, package_name: &str) -> Result<PackageMetadata> {
        *self
            .fetches
            .lock()
            .unwrap()
            .entry(package_name.to_string())
            .or_default() += 1;

        if let Some(details) = self.failures.get(package_name) {
            return Err(DepGraphError::MetadataFetch {
                package: package_name.to_string(),
                details: details.clone(),
            }
            .into());
        }
        self.packages.get(package_name).cloned().ok_or_else(|| {
            DepGraphError::NotFound {
                package: package_name.to_string(),
            }
            .into()
        })
    }
}
