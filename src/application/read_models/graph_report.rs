use super::{DiagramLayout, EdgeView, GraphViewModel, NodeView};
use crate::graph_resolution::domain::{GraphStore, ReportMetadata, ResolutionState};
use serde::Serialize;

/// Counts describing the whole graph, hidden parts included
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSummary {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub visible_nodes: usize,
    pub visible_edges: usize,
    pub resolved_nodes: usize,
    pub failed_nodes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl GraphSummary {
    pub fn new(store: &GraphStore, model: &GraphViewModel, filter: Option<String>) -> Self {
        Self {
            total_nodes: store.node_count(),
            total_edges: store.edge_count(),
            visible_nodes: model.nodes.len(),
            visible_edges: model.edges.len(),
            resolved_nodes: store.nodes().filter(|n| n.is_resolved()).count(),
            failed_nodes: store
                .nodes()
                .filter(|n| n.state() == ResolutionState::Errored)
                .count(),
            filter: filter.filter(|text| !text.trim().is_empty()),
        }
    }
}

/// Everything a formatter needs: the published diagram plus metadata
#[derive(Debug, Clone)]
pub struct GraphReport {
    pub metadata: ReportMetadata,
    pub summary: GraphSummary,
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
    pub layout: DiagramLayout,
}

impl GraphReport {
    pub fn new(
        metadata: ReportMetadata,
        summary: GraphSummary,
        model: GraphViewModel,
        layout: DiagramLayout,
    ) -> Self {
        Self {
            metadata,
            summary,
            nodes: model.nodes,
            edges: model.edges,
            layout,
        }
    }
}
