use super::{DependencyEdge, PackageNode};
use serde::Serialize;

/// Discriminator for the two kinds of element held by the graph store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Edge,
}

/// Borrowed view of any element looked up by id
#[derive(Debug, Clone, Copy)]
pub enum GraphElement<'a> {
    Node(&'a PackageNode),
    Edge(&'a DependencyEdge),
}

impl<'a> GraphElement<'a> {
    pub fn kind(&self) -> ElementKind {
        match *self {
            GraphElement::Node(_) => ElementKind::Node,
            GraphElement::Edge(_) => ElementKind::Edge,
        }
    }

    pub fn id(&self) -> &'a str {
        match *self {
            GraphElement::Node(node) => node.id(),
            GraphElement::Edge(edge) => edge.id(),
        }
    }

    pub fn as_node(&self) -> Option<&'a PackageNode> {
        match *self {
            GraphElement::Node(node) => Some(node),
            GraphElement::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&'a DependencyEdge> {
        match *self {
            GraphElement::Edge(edge) => Some(edge),
            GraphElement::Node(_) => None,
        }
    }
}
