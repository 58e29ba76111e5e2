/// Integration tests for the application layer
mod test_utilities;

use std::path::PathBuf;
use test_utilities::mocks::*;
use depgraph_navigator::prelude::*;

type TestUseCase = ExploreGraphUseCase<
    MockMetadataSource,
    FileSystemReader,
    LayeredLayout,
    RecordingView,
    MockProgressReporter,
>;

fn react_registry() -> MockMetadataSource {
    MockMetadataSource::new()
        .with_package(
            "react",
            "16.4.1",
            &[("loose-envify", "^1.1.0"), ("object-assign", "^4.1.1")],
        )
        .with_package("loose-envify", "1.4.0", &[("js-tokens", "^3.0.0 || ^4.0.0")])
        .with_package("object-assign", "4.1.1", &[])
        .with_package("js-tokens", "4.0.0", &[])
}

fn create_use_case(source: MockMetadataSource, progress: MockProgressReporter) -> TestUseCase {
    let coordinator = ModelCoordinator::new(
        GraphService::new(GraphGenerator::new(source)),
        LayeredLayout::new(),
        RecordingView::new(),
        progress,
    );
    ExploreGraphUseCase::new(coordinator, FileSystemReader::new())
}

fn package(text: &str) -> Option<PackageSpec> {
    Some(text.parse().unwrap())
}

fn node<'a>(report: &'a GraphReport, id: &str) -> &'a NodeView {
    report
        .nodes
        .iter()
        .find(|node| node.id == id)
        .unwrap_or_else(|| panic!("node {} not in report", id))
}

#[tokio::test]
async fn test_explore_package_default_depth() {
    let source = react_registry();
    let progress = MockProgressReporter::new();
    let use_case = create_use_case(source.clone(), progress.clone());

    let request = GraphRequest::new(package("react"), None, ResolveMode::Depth(1), None);
    let report = use_case.execute(request).await.unwrap();

    assert_eq!(report.summary.total_nodes, 3);
    assert_eq!(report.summary.total_edges, 2);
    assert_eq!(report.summary.resolved_nodes, 1);
    assert_eq!(report.summary.failed_nodes, 0);

    let react = node(&report, "react");
    assert!(react.root);
    assert_eq!(react.resolved_version.as_deref(), Some("16.4.1"));
    assert!(!node(&report, "loose-envify").resolved);
    assert_eq!(
        node(&report, "loose-envify").required_versions,
        vec!["^1.1.0".to_string()]
    );

    assert_eq!(source.fetch_count("react"), 1);
    assert_eq!(source.total_fetches(), 1);

    assert!(progress
        .messages()
        .iter()
        .any(|m| m.contains("Adding package: react")));
    assert_eq!(
        progress.completions(),
        vec!["Success: 3 of 3 package(s) shown".to_string()]
    );
    assert!(progress.errors().is_empty());
    assert!(progress.events().contains(&ProgressEvent::Progress {
        current: 1,
        total: 3,
        label: Some("wave 1".to_string()),
    }));
}

#[tokio::test]
async fn test_explore_resolve_all_fetches_each_package_once() {
    let source = react_registry();
    let use_case = create_use_case(source.clone(), MockProgressReporter::new());

    let request = GraphRequest::new(package("react"), None, ResolveMode::All, None);
    let report = use_case.execute(request).await.unwrap();

    assert_eq!(report.summary.total_nodes, 4);
    assert_eq!(report.summary.resolved_nodes, 4);
    assert_eq!(report.summary.total_edges, 3);
    assert_eq!(
        node(&report, "js-tokens").resolved_version.as_deref(),
        Some("4.0.0")
    );
    for name in ["react", "loose-envify", "object-assign", "js-tokens"] {
        assert_eq!(source.fetch_count(name), 1, "{}", name);
    }
}

#[tokio::test]
async fn test_shared_dependency_resolved_once() {
    let source = MockMetadataSource::new()
        .with_package("app-a", "1.0.0", &[("shared", "^2.0.0")])
        .with_package("app-b", "1.0.0", &[("shared", "^2.1.0")])
        .with_package("shared", "2.1.3", &[]);
    let coordinator = ModelCoordinator::new(
        GraphService::new(GraphGenerator::new(source.clone())),
        LayeredLayout::new(),
        RecordingView::new(),
        MockProgressReporter::new(),
    );

    coordinator.create_node("app-a", None).unwrap();
    coordinator.create_node("app-b", None).unwrap();
    coordinator.resolve_graph().await;

    let store = coordinator.service().store();
    let shared = store.node("shared").unwrap();
    assert!(shared.is_resolved());
    assert_eq!(
        shared.required_versions(),
        &["^2.0.0".to_string(), "^2.1.0".to_string()]
    );
    assert_eq!(store.incoming("shared").len(), 2);
    assert_eq!(source.fetch_count("shared"), 1);
}

#[tokio::test]
async fn test_cyclic_dependencies_terminate() {
    let source = MockMetadataSource::new()
        .with_package("ping", "1.0.0", &[("pong", "^1.0.0")])
        .with_package("pong", "1.0.0", &[("ping", "^1.0.0")]);
    let coordinator = ModelCoordinator::new(
        GraphService::new(GraphGenerator::new(source.clone())),
        LayeredLayout::new(),
        RecordingView::new(),
        MockProgressReporter::new(),
    );

    coordinator.create_node("ping", None).unwrap();
    let waves = coordinator.resolve_graph().await;

    assert_eq!(waves, 2);
    assert_eq!(coordinator.model().nodes.len(), 2);
    assert_eq!(coordinator.model().edges.len(), 2);
    assert_eq!(coordinator.layout().edge_count(), 2);
    assert_eq!(source.total_fetches(), 2);
}

#[tokio::test]
async fn test_failed_package_is_recorded_on_node() {
    let source = react_registry().with_failure("object-assign", "ECONNRESET");
    let progress = MockProgressReporter::new();
    let use_case = create_use_case(source, progress.clone());

    let request = GraphRequest::new(package("react"), None, ResolveMode::All, None);
    let report = use_case.execute(request).await.unwrap();

    assert_eq!(report.summary.failed_nodes, 1);
    let failed = node(&report, "object-assign");
    assert!(!failed.resolved);
    assert_eq!(
        failed.error.as_deref(),
        Some("Could not load package metadata for object-assign")
    );
    assert_eq!(failed.popup().class, PopupClass::Error);
    assert!(node(&report, "js-tokens").resolved);
    assert_eq!(progress.errors().len(), 1);
    assert!(progress.errors()[0].contains("1 package(s) could not be resolved"));
}

#[tokio::test]
async fn test_unknown_package_is_recorded_as_not_found() {
    let use_case = create_use_case(MockMetadataSource::new(), MockProgressReporter::new());

    let request = GraphRequest::new(package("left-padd"), None, ResolveMode::Depth(1), None);
    let report = use_case.execute(request).await.unwrap();

    assert_eq!(
        node(&report, "left-padd").error.as_deref(),
        Some("Package not found in registry: left-padd")
    );
}

#[tokio::test]
async fn test_required_range_selects_older_version() {
    let source = MockMetadataSource::new()
        .with_package("lib", "1.4.0", &[])
        .with_package("lib", "1.9.2", &[])
        .with_package("lib", "2.0.0", &[]);
    let use_case = create_use_case(source, MockProgressReporter::new());

    let request = GraphRequest::new(package("lib@^1.0.0"), None, ResolveMode::Depth(1), None);
    let report = use_case.execute(request).await.unwrap();

    assert_eq!(node(&report, "lib").resolved_version.as_deref(), Some("1.9.2"));
}

#[tokio::test]
async fn test_unmatched_range_falls_back_to_latest() {
    let source = MockMetadataSource::new()
        .with_package("lib", "1.4.0", &[])
        .with_package("lib", "2.0.0", &[]);
    let use_case = create_use_case(source, MockProgressReporter::new());

    let request = GraphRequest::new(package("lib@^5.0.0"), None, ResolveMode::Depth(1), None);
    let report = use_case.execute(request).await.unwrap();

    assert_eq!(node(&report, "lib").resolved_version.as_deref(), Some("2.0.0"));
}

#[tokio::test]
async fn test_filter_keeps_dependents_of_matches() {
    let use_case = create_use_case(react_registry(), MockProgressReporter::new());

    let request = GraphRequest::new(
        package("react"),
        None,
        ResolveMode::All,
        Some(" js-tokens ".to_string()),
    );
    let report = use_case.execute(request).await.unwrap();

    let mut visible: Vec<&str> = report.nodes.iter().map(|n| n.id.as_str()).collect();
    visible.sort();
    assert_eq!(visible, vec!["js-tokens", "loose-envify", "react"]);
    assert_eq!(report.summary.visible_nodes, 3);
    assert_eq!(report.summary.total_nodes, 4);
    assert_eq!(report.summary.visible_edges, 2);
    assert_eq!(report.summary.filter.as_deref(), Some(" js-tokens "));
    assert!(report.layout.node("object-assign").is_none());
}

#[tokio::test]
async fn test_explore_manifest_fixture() {
    let source = react_registry();
    let use_case = create_use_case(source.clone(), MockProgressReporter::new());

    let request = GraphRequest::new(
        None,
        Some(PathBuf::from("tests/fixtures/sample-project")),
        ResolveMode::Depth(1),
        None,
    );
    let report = use_case.execute(request).await.unwrap();

    let root = node(&report, "sample-project");
    assert!(root.root);
    assert!(root.resolved);
    assert_eq!(root.resolved_version.as_deref(), Some("1.0.0"));

    assert!(node(&report, "react").resolved);
    assert_eq!(
        node(&report, "fsevents").error.as_deref(),
        Some("Package not found in registry: fsevents")
    );
    assert!(report
        .edges
        .iter()
        .any(|edge| edge.id == "dependency:sample-project>fsevents" && edge.optional));
    assert_eq!(source.fetch_count("sample-project"), 0);
}

#[tokio::test]
async fn test_request_without_seed_fails() {
    let use_case = create_use_case(react_registry(), MockProgressReporter::new());

    let result = use_case.execute(GraphRequest::default()).await;
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Nothing to explore"));
}

#[tokio::test]
async fn test_missing_manifest_fails() {
    let use_case = create_use_case(react_registry(), MockProgressReporter::new());

    let request = GraphRequest::new(
        None,
        Some(PathBuf::from("/nonexistent/project")),
        ResolveMode::Depth(1),
        None,
    );
    assert!(use_case.execute(request).await.is_err());
}

#[tokio::test]
async fn test_toggle_unresolves_and_prunes() {
    let source = react_registry();
    let coordinator = ModelCoordinator::new(
        GraphService::new(GraphGenerator::new(source.clone())),
        LayeredLayout::new(),
        RecordingView::new(),
        MockProgressReporter::new(),
    );
    let react = coordinator.create_node("react", None).unwrap();

    let added = coordinator.select_nodes(std::slice::from_ref(&react)).await;
    assert_eq!(added, vec!["loose-envify".to_string(), "object-assign".to_string()]);
    assert_eq!(coordinator.model().nodes.len(), 3);

    let added = coordinator.select_nodes(std::slice::from_ref(&react)).await;
    assert!(added.is_empty());
    assert_eq!(coordinator.model().node_ids(), vec!["react".to_string()]);
    assert!(!coordinator.service().store().node("react").unwrap().is_resolved());
    assert!(!coordinator.is_loading());
    assert_eq!(source.fetch_count("react"), 1);
}

#[tokio::test]
async fn test_json_and_markdown_output() {
    let use_case = create_use_case(react_registry(), MockProgressReporter::new());

    let request = GraphRequest::new(package("react"), None, ResolveMode::Depth(2), None);
    let report = use_case.execute(request).await.unwrap();

    let json = JsonFormatter::new().format(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["summary"]["totalNodes"], 4);
    assert_eq!(value["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(value["edges"].as_array().unwrap().len(), 3);

    let markdown = MarkdownFormatter::new().format(&report).unwrap();
    assert!(markdown.contains("# Dependency Graph"));
    assert!(markdown.contains("| js-tokens | ^3.0.0 \\|\\| ^4.0.0 | - | *not resolved* |"));
    assert!(markdown.contains("- **loose-envify** → js-tokens (`^3.0.0 || ^4.0.0`)"));
}
