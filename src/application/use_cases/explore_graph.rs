use super::ModelCoordinator;
use crate::application::dto::{GraphRequest, ResolveMode};
use crate::application::read_models::{GraphReport, GraphSummary};
use crate::graph_resolution::services::ReportMetadataGenerator;
use crate::ports::outbound::{DiagramView, GraphLayout, ManifestReader, MetadataSource, ProgressReporter};
use crate::shared::error::DepGraphError;
use crate::shared::Result;

/// ExploreGraphUseCase - one-shot exploration for the command line
///
/// Seeds the graph from a manifest and/or a package, resolves it to the
/// requested depth, applies the filter and snapshots the published
/// diagram into a [`GraphReport`].
///
/// # Type Parameters
/// * `M` - MetadataSource implementation
/// * `MR` - ManifestReader implementation
/// * `L` - GraphLayout implementation
/// * `V` - DiagramView implementation
/// * `PR` - ProgressReporter implementation
pub struct ExploreGraphUseCase<M, MR, L, V, PR> {
    coordinator: ModelCoordinator<M, L, V, PR>,
    manifest_reader: MR,
}

impl<M, MR, L, V, PR> ExploreGraphUseCase<M, MR, L, V, PR>
where
    M: MetadataSource,
    MR: ManifestReader,
    L: GraphLayout,
    V: DiagramView,
    PR: ProgressReporter,
{
    pub fn new(coordinator: ModelCoordinator<M, L, V, PR>, manifest_reader: MR) -> Self {
        Self {
            coordinator,
            manifest_reader,
        }
    }

    pub fn coordinator(&self) -> &ModelCoordinator<M, L, V, PR> {
        &self.coordinator
    }

    /// Executes the exploration
    ///
    /// # Errors
    /// Returns an error if the request has no seed, the manifest cannot be
    /// read, or the package name is invalid. Packages that fail to resolve
    /// are recorded on their nodes and do not fail the run.
    pub async fn execute(&self, request: GraphRequest) -> Result<GraphReport> {
        // Step 1: Seed the graph
        self.seed(&request)?;

        // Step 2: Resolve
        let progress = self.coordinator.progress_reporter();
        let waves = match request.resolve_mode {
            ResolveMode::Depth(depth) => self.coordinator.resolve_to_depth(depth).await,
            ResolveMode::All => self.coordinator.resolve_graph().await,
        };
        progress.report(&format!(
            "✅ Resolved {} package(s) in {} wave(s)",
            self.coordinator
                .service()
                .store()
                .nodes()
                .filter(|node| node.is_resolved())
                .count(),
            waves
        ));

        // Step 3: Filter
        if let Some(filter) = &request.filter {
            self.coordinator.filter(filter);
        }

        // Step 4: Snapshot
        let report = self.build_report(request.filter);
        if report.summary.failed_nodes > 0 {
            progress.report_error(&format!(
                "⚠️  Warning: {} package(s) could not be resolved",
                report.summary.failed_nodes
            ));
        }
        progress.report_completion(&format!(
            "Success: {} of {} package(s) shown",
            report.summary.visible_nodes, report.summary.total_nodes
        ));
        Ok(report)
    }

    fn seed(&self, request: &GraphRequest) -> Result<()> {
        if !request.has_seed() {
            return Err(DepGraphError::Validation {
                message: "Nothing to explore: pass a package name or --manifest".to_string(),
            }
            .into());
        }

        let progress = self.coordinator.progress_reporter();
        if let Some(path) = &request.manifest_path {
            progress.report(&format!("📖 Loading manifest from: {}", path.display()));
            let manifest = self.manifest_reader.read_manifest(path)?;
            progress.report(&format!(
                "✅ Detected {} direct dependenc(ies)",
                manifest.dependency_count()
            ));
            self.coordinator.load_manifest(&manifest)?;
        }

        if let Some(package) = &request.package {
            progress.report(&format!("🌱 Adding package: {}", package));
            self.coordinator
                .create_node(&package.name, package.range.as_deref())?;
        }
        Ok(())
    }

    fn build_report(&self, filter: Option<String>) -> GraphReport {
        let model = self.coordinator.model().clone();
        let layout = self.coordinator.layout().clone();
        let summary = GraphSummary::new(&self.coordinator.service().store(), &model, filter);
        GraphReport::new(
            ReportMetadataGenerator::generate_default(),
            summary,
            model,
            layout,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::layout::LayeredLayout;
    use crate::adapters::outbound::view::RecordingView;
    use crate::graph_resolution::domain::PackageManifest;
    use crate::graph_resolution::services::{GraphGenerator, GraphService};
    use crate::test_support::{FakeRegistry, SilentReporter};
    use std::path::{Path, PathBuf};

    struct InlineManifest(&'static str);

    impl ManifestReader for InlineManifest {
        fn read_manifest(&self, _path: &Path) -> Result<PackageManifest> {
            PackageManifest::from_json(self.0)
        }
    }

    fn use_case(
        registry: FakeRegistry,
        manifest: &'static str,
    ) -> ExploreGraphUseCase<FakeRegistry, InlineManifest, LayeredLayout, RecordingView, SilentReporter>
    {
        let coordinator = ModelCoordinator::new(
            GraphService::new(GraphGenerator::new(registry)),
            LayeredLayout::new(),
            RecordingView::new(),
            SilentReporter,
        );
        ExploreGraphUseCase::new(coordinator, InlineManifest(manifest))
    }

    fn registry() -> FakeRegistry {
        FakeRegistry::new()
            .with_package("react", "16.4.0", &[("loose-envify", "^1.1.0")])
            .with_package("loose-envify", "1.4.0", &[("js-tokens", "^4.0.0")])
            .with_package("js-tokens", "4.0.0", &[])
    }

    fn request(package: &str, mode: ResolveMode) -> GraphRequest {
        GraphRequest::new(Some(package.parse().unwrap()), None, mode, None)
    }

    #[tokio::test]
    async fn test_requires_a_seed() {
        let result = use_case(registry(), "{}").execute(GraphRequest::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_default_depth_resolves_one_wave() {
        let report = use_case(registry(), "{}")
            .execute(request("react@^16.0.0", ResolveMode::default()))
            .await
            .unwrap();

        assert_eq!(report.summary.total_nodes, 2);
        assert_eq!(report.summary.resolved_nodes, 1);
        assert_eq!(report.edges.len(), 1);
        assert_eq!(report.layout.node_count(), 2);
        assert_eq!(report.metadata.tool_name(), "depgraph");
    }

    #[tokio::test]
    async fn test_resolve_all_with_filter() {
        let mut request = request("react", ResolveMode::All);
        request.filter = Some(" loose-envify ".to_string());

        let report = use_case(registry(), "{}").execute(request).await.unwrap();

        assert_eq!(report.summary.total_nodes, 3);
        assert_eq!(report.summary.visible_nodes, 2);
        assert_eq!(report.summary.filter.as_deref(), Some(" loose-envify "));
        let names: Vec<&str> = report.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["react", "loose-envify"]);
    }

    #[tokio::test]
    async fn test_manifest_seed_resolves_dependencies() {
        let manifest = r#"{"name":"my-app","version":"0.1.0","dependencies":{"react":"^16.0.0"}}"#;
        let request = GraphRequest::new(
            None,
            Some(PathBuf::from("package.json")),
            ResolveMode::Depth(1),
            None,
        );

        let report = use_case(registry(), manifest).execute(request).await.unwrap();

        let react = report.nodes.iter().find(|n| n.id == "react").unwrap();
        assert!(react.resolved);
        assert_eq!(react.resolved_version.as_deref(), Some("16.4.0"));
        assert_eq!(report.summary.total_nodes, 3);
    }

    #[tokio::test]
    async fn test_failures_are_reported_not_fatal() {
        let registry = registry().with_failure("js-tokens", "ECONNRESET");
        let report = use_case(registry, "{}")
            .execute(request("react", ResolveMode::All))
            .await
            .unwrap();

        assert_eq!(report.summary.failed_nodes, 1);
        let failed = report.nodes.iter().find(|n| n.id == "js-tokens").unwrap();
        assert_eq!(
            failed.error.as_deref(),
            Some("Could not load package metadata for js-tokens")
        );
    }
}
