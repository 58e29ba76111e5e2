use crate::graph_resolution::domain::{PackageMetadata, PackageName, VersionMetadata};
use crate::ports::outbound::MetadataSource;
use crate::shared::security::{read_regular_file, MAX_MANIFEST_SIZE};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// NodeModulesMetadataSource - prefers installed packages over the registry
///
/// Starting at `start_dir` and walking up through its ancestors, looks for
/// `node_modules/{name}/package.json`. The first readable manifest wins and
/// is offered as the only available version. When no ancestor has the
/// package installed, the request goes to the wrapped source.
pub struct NodeModulesMetadataSource<S: MetadataSource> {
    start_dir: PathBuf,
    inner: S,
}

impl<S: MetadataSource> NodeModulesMetadataSource<S> {
    pub fn new(start_dir: impl Into<PathBuf>, inner: S) -> Self {
        Self {
            start_dir: start_dir.into(),
            inner,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn find_installed(&self, package_name: &str) -> Option<(PathBuf, VersionMetadata)> {
        PackageName::new(package_name).ok()?;
        self.start_dir.ancestors().find_map(|dir| {
            let candidate = dir
                .join("node_modules")
                .join(package_name)
                .join("package.json");
            read_installed(&candidate).map(|metadata| (candidate, metadata))
        })
    }
}

fn read_installed(path: &Path) -> Option<VersionMetadata> {
    if !path.is_file() {
        return None;
    }
    let content = read_regular_file(path, "package.json", MAX_MANIFEST_SIZE).ok()?;
    let metadata: VersionMetadata = serde_json::from_str(&content).ok()?;
    metadata.version.is_some().then_some(metadata)
}

#[async_trait]
impl<S: MetadataSource> MetadataSource for NodeModulesMetadataSource<S> {
    async fn fetch_metadata(&self, package_name: &str) -> Result<PackageMetadata> {
        if let Some((path, installed)) = self.find_installed(package_name) {
            debug!(package = %package_name, path = %path.display(), "using installed package");
            return Ok(PackageMetadata::from_installed(installed));
        }
        self.inner.fetch_metadata(package_name).await
    }
}
