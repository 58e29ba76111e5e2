//! Positions and routes returned by the layout collaborator

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Position (top-left corner) and size of a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodePlacement {
    pub position: Point,
    pub width: f64,
    pub height: f64,
}

impl NodePlacement {
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }
}

/// Layout result keyed by node id and edge id
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiagramLayout {
    nodes: BTreeMap<String, NodePlacement>,
    edges: BTreeMap<String, Vec<Point>>,
}

impl DiagramLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place_node(&mut self, id: impl Into<String>, placement: NodePlacement) {
        self.nodes.insert(id.into(), placement);
    }

    pub fn route_edge(&mut self, id: impl Into<String>, route: Vec<Point>) {
        self.edges.insert(id.into(), route);
    }

    pub fn node(&self, id: &str) -> Option<&NodePlacement> {
        self.nodes.get(id)
    }

    pub fn route(&self, id: &str) -> Option<&[Point]> {
        self.edges.get(id).map(Vec::as_slice)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Width and height of the box enclosing every node
    pub fn bounds(&self) -> (f64, f64) {
        self.nodes.values().fold((0.0, 0.0), |(w, h), placement| {
            (
                f64::max(w, placement.position.x + placement.width),
                f64::max(h, placement.position.y + placement.height),
            )
        })
    }
}
