use crate::application::read_models::{
    EdgeView, GraphReport, GraphSummary, NodePlacement, NodeView, Point, PopupInfo,
};
use crate::graph_resolution::domain::ReportMetadata;
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct GraphDocument<'a> {
    metadata: &'a ReportMetadata,
    summary: &'a GraphSummary,
    bounds: Bounds,
    nodes: Vec<NodeEntry<'a>>,
    edges: Vec<EdgeEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct Bounds {
    width: f64,
    height: f64,
}

#[derive(Debug, Serialize)]
struct NodeEntry<'a> {
    #[serde(flatten)]
    node: &'a NodeView,
    popup: PopupInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    placement: Option<&'a NodePlacement>,
}

#[derive(Debug, Serialize)]
struct EdgeEntry<'a> {
    #[serde(flatten)]
    edge: &'a EdgeView,
    #[serde(skip_serializing_if = "is_empty_route")]
    route: &'a [Point],
}

fn is_empty_route(route: &&[Point]) -> bool {
    route.is_empty()
}

/// JsonFormatter adapter for the machine-readable graph document
///
/// Serializes the published diagram: visible nodes with their popup and
/// placement, visible edges with their route, plus summary counts.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphFormatter for JsonFormatter {
    fn format(&self, report: &GraphReport) -> Result<String> {
        let (width, height) = report.layout.bounds();
        let document = GraphDocument {
            metadata: &report.metadata,
            summary: &report.summary,
            bounds: Bounds { width, height },
            nodes: report
                .nodes
                .iter()
                .map(|node| NodeEntry {
                    node,
                    popup: node.popup(),
                    placement: report.layout.node(&node.id),
                })
                .collect(),
            edges: report
                .edges
                .iter()
                .map(|edge| EdgeEntry {
                    edge,
                    route: report.layout.route(&edge.id).unwrap_or_default(),
                })
                .collect(),
        };

        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| anyhow::anyhow!("Failed to serialize graph to JSON: {}", e))?;
        Ok(json)
    }
}
