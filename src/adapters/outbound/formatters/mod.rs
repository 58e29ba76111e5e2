/// Formatter adapters for the graph report output formats
mod json_formatter;
mod markdown_formatter;

pub use json_formatter::JsonFormatter;
pub use markdown_formatter::MarkdownFormatter;

#[cfg(test)]
pub(crate) fn test_report() -> crate::application::read_models::GraphReport {
    use crate::adapters::outbound::layout::LayeredLayout;
    use crate::application::read_models::{GraphReport, GraphSummary, GraphViewModel};
    use crate::graph_resolution::domain::{DependencyEdge, GraphStore, PackageNode};
    use crate::graph_resolution::services::ReportMetadataGenerator;
    use crate::ports::outbound::GraphLayout;

    let mut react = PackageNode::new("react");
    react.mark_root();
    react.add_required_version("^16.0.0");
    react.apply_resolution(
        "16.4.1".to_string(),
        Some("UI library".to_string()),
        Some("https://www.npmjs.com/package/react".to_string()),
    );
    let mut envify = PackageNode::new("loose-envify");
    envify.add_required_version("^1.1.0");
    let mut broken = PackageNode::new("broken");
    broken.add_required_version("*");
    broken.mark_failed("Package not found in registry: broken".to_string());

    let mut store = GraphStore::new();
    store.insert_node(react);
    store.insert_node(envify);
    store.insert_node(broken);
    store
        .insert_edge(DependencyEdge::new("react", "loose-envify", "^1.1.0", false))
        .unwrap();
    store
        .insert_edge(DependencyEdge::new("react", "broken", "*", true))
        .unwrap();

    let model = GraphViewModel::from_store(&store);
    let layout = LayeredLayout::new().layout(&model);
    let summary = GraphSummary::new(&store, &model, None);
    GraphReport::new(
        ReportMetadataGenerator::generate_default(),
        summary,
        model,
        layout,
    )
}
