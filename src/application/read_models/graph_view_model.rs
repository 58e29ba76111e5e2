//! View model published to the layout and render collaborators
//!
//! Holds only visible elements; every edge has both endpoints among the nodes.

use crate::graph_resolution::domain::{DependencyEdge, GraphStore, PackageNode};
use serde::Serialize;

/// Popup body shown for a node that has not been resolved yet
pub const UNRESOLVED_HINT: &str =
    "This package has not been resolved yet. Select it to trigger resolution of package metadata.";

/// View representation of a package node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub id: String,
    pub name: String,
    pub required_versions: Vec<String>,
    pub resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub root: bool,
}

impl NodeView {
    pub fn from_node(node: &PackageNode) -> Self {
        Self {
            id: node.id().to_string(),
            name: node.name().to_string(),
            required_versions: node.required_versions().to_vec(),
            resolved: node.is_resolved(),
            resolved_version: node.resolved_version().map(str::to_string),
            description: node.description().map(str::to_string),
            url: node.url().map(str::to_string),
            error: node.error().map(str::to_string),
            root: node.is_root(),
        }
    }

    /// Hover information: an error wins over the description, and an
    /// unresolved node without either gets a hint
    pub fn popup(&self) -> PopupInfo {
        let versions = if self.required_versions.is_empty() {
            None
        } else {
            Some(self.required_versions.join(", "))
        };

        let class = if self.error.is_some() {
            PopupClass::Error
        } else if !self.resolved {
            PopupClass::Unresolved
        } else {
            PopupClass::Plain
        };

        let body = self
            .error
            .clone()
            .or_else(|| self.description.clone())
            .or_else(|| (!self.resolved).then(|| UNRESOLVED_HINT.to_string()))
            .unwrap_or_default();

        PopupInfo {
            title: self.name.clone(),
            versions,
            url: self.url.clone(),
            body,
            class,
        }
    }
}

/// Styling class of a popup body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PopupClass {
    Plain,
    Error,
    Unresolved,
}

/// Popup content for a node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupInfo {
    pub title: String,
    pub versions: Option<String>,
    pub url: Option<String>,
    pub body: String,
    pub class: PopupClass,
}

/// View representation of a dependency edge
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeView {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    pub optional: bool,
    /// Range from the dependency map, shown as the edge label
    pub version_range: String,
}

impl EdgeView {
    pub fn from_edge(edge: &DependencyEdge) -> Self {
        Self {
            id: edge.id().to_string(),
            source_id: edge.source_id().to_string(),
            target_id: edge.target_id().to_string(),
            optional: edge.is_optional(),
            version_range: edge.version_range().to_string(),
        }
    }
}

/// The visible part of the graph
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphViewModel {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

impl GraphViewModel {
    /// Collects the nodes not hidden by the filter and the edges whose
    /// endpoints are both visible
    pub fn from_store(store: &GraphStore) -> Self {
        let is_visible =
            |id: &str| store.node(id).is_some_and(|node| !node.is_hidden());

        let nodes = store
            .nodes()
            .filter(|node| !node.is_hidden())
            .map(NodeView::from_node)
            .collect();
        let edges = store
            .edges()
            .filter(|edge| is_visible(edge.source_id()) && is_visible(edge.target_id()))
            .map(EdgeView::from_edge)
            .collect();

        Self { nodes, edges }
    }

    pub fn node(&self, id: &str) -> Option<&NodeView> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|node| node.id.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
