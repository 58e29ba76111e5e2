use crate::graph_resolution::domain::PackageManifest;
use crate::ports::outbound::ManifestReader;
use crate::shared::error::DepGraphError;
use crate::shared::security::{read_regular_file, MAX_MANIFEST_SIZE};
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// FileSystemReader adapter for reading `package.json` manifests
///
/// Accepts either the manifest file itself or a directory containing one.
/// Symbolic links, non-regular files and oversized files are rejected.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    fn manifest_path(path: &Path) -> PathBuf {
        if path.is_dir() {
            path.join("package.json")
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestReader for FileSystemReader {
    fn read_manifest(&self, path: &Path) -> Result<PackageManifest> {
        let manifest_path = Self::manifest_path(path);

        if !manifest_path.exists() {
            return Err(DepGraphError::FileReadError {
                path: manifest_path,
                details: "package.json does not exist".to_string(),
            }
            .into());
        }

        let content = read_regular_file(&manifest_path, "package.json", MAX_MANIFEST_SIZE)
            .map_err(|e| DepGraphError::FileReadError {
                path: manifest_path.clone(),
                details: e.to_string(),
            })?;

        PackageManifest::from_json(&content).map_err(|e| {
            DepGraphError::InvalidManifest {
                path: manifest_path,
                details: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_manifest_from_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("package.json"),
            r#"{"name":"my-app","version":"1.0.0","dependencies":{"react":"^16.0.0"}}"#,
        )
        .unwrap();

        let manifest = FileSystemReader::new()
            .read_manifest(temp_dir.path())
            .unwrap();

        assert_eq!(manifest.name, "my-app");
        assert_eq!(manifest.dependency_count(), 1);
    }

    #[test]
    fn test_read_manifest_from_file_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.json");
        fs::write(&path, r#"{"name":"other"}"#).unwrap();

        let manifest = FileSystemReader::new().read_manifest(&path).unwrap();
        assert_eq!(manifest.name, "other");
    }

    #[test]
    fn test_read_manifest_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let error = FileSystemReader::new()
            .read_manifest(temp_dir.path())
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<DepGraphError>(),
            Some(DepGraphError::FileReadError { .. })
        ));
    }

    #[test]
    fn test_read_manifest_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("package.json"), "{ not json").unwrap();

        let error = FileSystemReader::new()
            .read_manifest(temp_dir.path())
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<DepGraphError>(),
            Some(DepGraphError::InvalidManifest { .. })
        ));
        assert!(error.to_string().contains("Invalid package manifest"));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_manifest_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.json");
        let link = temp_dir.path().join("package.json");
        fs::write(&target, r#"{"name":"app"}"#).unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let error = FileSystemReader::new().read_manifest(&link).unwrap_err();
        assert!(error.to_string().contains("symbolic link"));
    }
}
