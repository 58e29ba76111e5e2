use crate::graph_resolution::domain::PackageManifest;
use crate::shared::Result;
use std::path::Path;

/// ManifestReader port for reading a local package.json
pub trait ManifestReader {
    /// Reads and parses the manifest at `path`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The file is not a regular file or is too large
    /// - The content is not a valid manifest
    fn read_manifest(&self, path: &Path) -> Result<PackageManifest>;
}
