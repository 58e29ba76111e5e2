use super::{DependencyEdge, GraphElement, PackageNode};
use crate::shared::error::DepGraphError;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Stored value tagged with its insertion sequence number
#[derive(Debug, Clone)]
struct Slot<T> {
    seq: u64,
    value: T,
}

/// Mutable node/edge collection with an id index and an adjacency index
///
/// Iteration follows insertion order. Every edge endpoint is present as a
/// node at all times: edges can only be inserted between existing nodes,
/// and removing a node removes its incident edges.
#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: HashMap<String, Slot<PackageNode>>,
    edges: HashMap<String, Slot<DependencyEdge>>,
    node_order: BTreeMap<u64, String>,
    edge_order: BTreeMap<u64, String>,
    outgoing: HashMap<String, HashSet<String>>,
    incoming: HashMap<String, HashSet<String>>,
    next_seq: u64,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    pub fn node(&self, id: &str) -> Option<&PackageNode> {
        self.nodes.get(id).map(|slot| &slot.value)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut PackageNode> {
        self.nodes.get_mut(id).map(|slot| &mut slot.value)
    }

    pub fn edge(&self, id: &str) -> Option<&DependencyEdge> {
        self.edges.get(id).map(|slot| &slot.value)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn contains_edge(&self, id: &str) -> bool {
        self.edges.contains_key(id)
    }

    /// Looks up a node or an edge by id
    pub fn element(&self, id: &str) -> Option<GraphElement<'_>> {
        self.node(id)
            .map(GraphElement::Node)
            .or_else(|| self.edge(id).map(GraphElement::Edge))
    }

    /// Inserts a node; returns false and leaves the store untouched when the id exists
    pub fn insert_node(&mut self, node: PackageNode) -> bool {
        if self.nodes.contains_key(node.id()) {
            return false;
        }
        let seq = self.bump_seq();
        let id = node.id().to_string();
        self.node_order.insert(seq, id.clone());
        self.nodes.insert(id, Slot { seq, value: node });
        true
    }

    /// Inserts an edge between two existing nodes
    ///
    /// Returns `Ok(false)` when an edge with the same id is already present.
    ///
    /// # Errors
    /// `IllegalState` if either endpoint is missing
    pub fn insert_edge(&mut self, edge: DependencyEdge) -> Result<bool, DepGraphError> {
        if self.edges.contains_key(edge.id()) {
            return Ok(false);
        }
        for endpoint in [edge.source_id(), edge.target_id()] {
            if !self.nodes.contains_key(endpoint) {
                return Err(DepGraphError::IllegalState {
                    details: format!(
                        "edge {} references missing node {}",
                        edge.id(),
                        endpoint
                    ),
                });
            }
        }

        let seq = self.bump_seq();
        let id = edge.id().to_string();
        self.outgoing
            .entry(edge.source_id().to_string())
            .or_default()
            .insert(id.clone());
        self.incoming
            .entry(edge.target_id().to_string())
            .or_default()
            .insert(id.clone());
        self.edge_order.insert(seq, id.clone());
        self.edges.insert(id, Slot { seq, value: edge });
        Ok(true)
    }

    pub fn remove_edge(&mut self, id: &str) -> Option<DependencyEdge> {
        let slot = self.edges.remove(id)?;
        self.edge_order.remove(&slot.seq);
        if let Some(out) = self.outgoing.get_mut(slot.value.source_id()) {
            out.remove(id);
        }
        if let Some(inc) = self.incoming.get_mut(slot.value.target_id()) {
            inc.remove(id);
        }
        Some(slot.value)
    }

    /// Removes a node together with any edge still touching it
    pub fn remove_node(&mut self, id: &str) -> Option<PackageNode> {
        let incident: Vec<String> = self
            .outgoing
            .get(id)
            .into_iter()
            .chain(self.incoming.get(id))
            .flatten()
            .cloned()
            .collect();
        for edge_id in incident {
            self.remove_edge(&edge_id);
        }

        let slot = self.nodes.remove(id)?;
        self.node_order.remove(&slot.seq);
        self.outgoing.remove(id);
        self.incoming.remove(id);
        Some(slot.value)
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &PackageNode> + '_ {
        self.node_order
            .values()
            .filter_map(move |id| self.nodes.get(id).map(|slot| &slot.value))
    }

    /// Mutable access to every node (unordered)
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut PackageNode> + '_ {
        self.nodes.values_mut().map(|slot| &mut slot.value)
    }

    /// Edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &DependencyEdge> + '_ {
        self.edge_order
            .values()
            .filter_map(move |id| self.edges.get(id).map(|slot| &slot.value))
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.node_order.values().cloned().collect()
    }

    fn ordered_edges(&self, ids: Option<&HashSet<String>>) -> Vec<&DependencyEdge> {
        let mut slots: Vec<&Slot<DependencyEdge>> = ids
            .into_iter()
            .flatten()
            .filter_map(|id| self.edges.get(id))
            .collect();
        slots.sort_by_key(|slot| slot.seq);
        slots.into_iter().map(|slot| &slot.value).collect()
    }

    /// Edges whose source is `id`, in insertion order
    pub fn outgoing(&self, id: &str) -> Vec<&DependencyEdge> {
        self.ordered_edges(self.outgoing.get(id))
    }

    /// Edges whose target is `id`, in insertion order
    pub fn incoming(&self, id: &str) -> Vec<&DependencyEdge> {
        self.ordered_edges(self.incoming.get(id))
    }

    /// Number of edges touching `id` in either direction
    pub fn degree(&self, id: &str) -> usize {
        self.outgoing.get(id).map_or(0, HashSet::len) + self.incoming.get(id).map_or(0, HashSet::len)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.node_order.clear();
        self.edge_order.clear();
        self.outgoing.clear();
        self.incoming.clear();
    }
}
