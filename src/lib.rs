//! depgraph-navigator - incremental explorer for npm dependency graphs
//!
//! The graph starts from a single package (or the dependencies of a
//! `package.json`) and grows one resolution at a time: resolving a node
//! fetches its registry metadata, picks a concrete version for the ranges
//! that require it and adds its dependencies as new, unresolved nodes.
//! A name filter controls which part of the graph is published to the view.
//!
//! # Architecture
//!
//! - **Domain Layer** (`graph_resolution`): graph model, version policies and services
//! - **Application Layer** (`application`): model coordinator, use cases and read models
//! - **Ports** (`ports`): interfaces to the registry, layout, view and console
//! - **Adapters** (`adapters`): concrete implementations of the ports
//! - **Shared** (`shared`): error types, result alias and filesystem helpers
//!
//! # Example
//!
//! ```no_run
//! use depgraph_navigator::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let registry = CachingMetadataSource::new(NpmRegistryClient::new()?);
//! let coordinator = ModelCoordinator::new(
//!     GraphService::new(GraphGenerator::new(registry)),
//!     LayeredLayout::new(),
//!     RecordingView::new(),
//!     StderrProgressReporter::new(),
//! );
//! let use_case = ExploreGraphUseCase::new(coordinator, FileSystemReader::new());
//!
//! let request = GraphRequest::new(
//!     Some("react@^18.0.0".parse().map_err(anyhow::Error::msg)?),
//!     None,
//!     ResolveMode::Depth(2),
//!     None,
//! );
//! let report = use_case.execute(request).await?;
//! println!("{}", JsonFormatter::new().format(&report)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod graph_resolution;
pub mod ports;
pub mod shared;

#[cfg(test)]
mod test_support;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, NodeModulesMetadataSource, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::layout::LayeredLayout;
    pub use crate::adapters::outbound::network::{CachingMetadataSource, NpmRegistryClient};
    pub use crate::adapters::outbound::view::{RecordingView, ViewEvent};
    pub use crate::application::dto::{GraphRequest, OutputFormat, PackageSpec, ResolveMode};
    pub use crate::application::read_models::{
        DiagramLayout, EdgeView, GraphReport, GraphSummary, GraphViewModel, NodeView, PopupClass,
    };
    pub use crate::application::use_cases::{ExploreGraphUseCase, ModelCoordinator};
    pub use crate::graph_resolution::domain::{
        DependencyEdge, DependencyMap, GraphStore, PackageManifest, PackageMetadata, PackageName, PackageNode,
        ResolutionState, VersionMetadata,
    };
    pub use crate::graph_resolution::policies::{NpmRange, VersionSelection};
    pub use crate::graph_resolution::services::{GraphFilter, GraphGenerator, GraphService};
    pub use crate::ports::outbound::{
        DiagramView, GraphFormatter, GraphLayout, ManifestReader, MetadataSource,
        OutputPresenter, PackageSearch, ProgressReporter, SearchHit,
    };
    pub use crate::shared::Result;
}
