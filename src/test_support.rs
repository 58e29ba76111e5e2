//! In-memory registry shared by unit tests

use crate::graph_resolution::domain::{DependencyMap, PackageMetadata, VersionMetadata};
use crate::ports::outbound::{MetadataSource, ProgressReporter};
use crate::shared::error::DepGraphError;
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

pub fn deps(entries: &[(&str, &str)]) -> DependencyMap {
    entries
        .iter()
        .map(|(name, range)| (name.to_string(), range.to_string()))
        .collect()
}

/// Progress reporter that discards everything
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn report(&self, _message: &str) {}
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
    fn report_error(&self, _message: &str) {}
    fn report_completion(&self, _message: &str) {}
}

#[derive(Default)]
pub struct FakeRegistry {
    packages: HashMap<String, PackageMetadata>,
    failures: HashMap<String, String>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `name@version` with the given dependencies; the last
    /// published version becomes `latest`
    pub fn with_package(self, name: &str, version: &str, dependencies: &[(&str, &str)]) -> Self {
        self.with_version(
            name,
            VersionMetadata {
                name: Some(name.to_string()),
                version: Some(version.to_string()),
                description: Some(format!("{} package", name)),
                dependencies: Some(deps(dependencies)),
                ..VersionMetadata::default()
            },
        )
    }

    pub fn with_version(mut self, name: &str, version_metadata: VersionMetadata) -> Self {
        let version = version_metadata.version.clone().unwrap_or_default();
        let metadata = self
            .packages
            .entry(name.to_string())
            .or_insert_with(|| PackageMetadata {
                name: Some(name.to_string()),
                ..PackageMetadata::default()
            });
        metadata
            .dist_tags
            .insert("latest".to_string(), version.clone());
        metadata.versions.insert(version, version_metadata);
        self
    }

    pub fn without_latest(mut self, name: &str) -> Self {
        if let Some(metadata) = self.packages.get_mut(name) {
            metadata.dist_tags.remove("latest");
        }
        self
    }

    pub fn with_failure(mut self, name: &str, message: &str) -> Self {
        self.failures.insert(name.to_string(), message.to_string());
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
}

#[async_trait]
impl MetadataSource for FakeRegistry {
    async fn fetch_metadata(&self, package_name: &str) -> Result<PackageMetadata> {
        *self
            .fetches
            .lock()
            .unwrap()
            .entry(package_name.to_string())
            .or_default() += 1;

        tokio::task::yield_now().await;

        if let Some(message) = self.failures.get(package_name) {
            return Err(DepGraphError::MetadataFetch {
                package: package_name.to_string(),
                details: message.clone(),
            }
            .into());
        }
        self.packages
            .get(package_name)
            .cloned()
            .ok_or_else(|| {
                DepGraphError::NotFound {
                    package: package_name.to_string(),
                }
                .into()
            })
    }
}
