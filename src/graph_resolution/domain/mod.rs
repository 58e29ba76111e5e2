pub mod dependency_edge;
pub mod graph_element;
pub mod graph_store;
pub mod package_manifest;
pub mod package_metadata;
pub mod package_node;
pub mod report_metadata;

pub use dependency_edge::DependencyEdge;
pub use graph_element::{ElementKind, GraphElement};
pub use graph_store::GraphStore;
pub use package_manifest::PackageManifest;
pub use package_metadata::{DependencyMap, PackageMetadata, VersionMetadata};
pub use package_node::{PackageName, PackageNode, ResolutionState};
pub use report_metadata::ReportMetadata;
