use crate::application::read_models::{
    DiagramLayout, GraphViewModel, NodePlacement, NodeView, Point,
};
use crate::ports::outbound::GraphLayout;
use std::collections::{HashMap, VecDeque};

const CHAR_WIDTH: f64 = 7.0;
const NODE_PADDING: f64 = 12.0;
const MIN_NODE_WIDTH: f64 = 60.0;
const NODE_HEIGHT: f64 = 30.0;
const LAYER_GAP: f64 = 80.0;
const ROW_GAP: f64 = 20.0;

/// LayeredLayout - left-to-right layered layout of the published graph
///
/// Dependencies are placed one layer to the right of their deepest
/// dependent (longest-path layering). Edges closing a cycle are ignored
/// while layering and routed around the layers instead. Nodes in a layer
/// keep the order of the model, so repeated publishes of the same graph
/// produce the same picture.
#[derive(Debug, Clone, Default)]
pub struct LayeredLayout;

impl LayeredLayout {
    pub fn new() -> Self {
        Self
    }

    fn node_size(node: &NodeView) -> (f64, f64) {
        let label_len = match &node.resolved_version {
            Some(version) => node.name.chars().count() + 1 + version.chars().count(),
            None => node.name.chars().count(),
        };
        let width = (label_len as f64 * CHAR_WIDTH + 2.0 * NODE_PADDING).max(MIN_NODE_WIDTH);
        (width, NODE_HEIGHT)
    }
}

impl GraphLayout for LayeredLayout {
    fn layout(&self, model: &GraphViewModel) -> DiagramLayout {
        let mut result = DiagramLayout::new();
        if model.nodes.is_empty() {
            return result;
        }

        let index: HashMap<&str, usize> = model
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();
        let routed: Vec<(&str, usize, usize)> = model
            .edges
            .iter()
            .filter_map(|edge| {
                Some((
                    edge.id.as_str(),
                    *index.get(edge.source_id.as_str())?,
                    *index.get(edge.target_id.as_str())?,
                ))
            })
            .collect();
        let links: Vec<(usize, usize)> = routed.iter().map(|&(_, s, t)| (s, t)).collect();

        let back = back_edges(model.nodes.len(), &links);
        let layers = assign_layers(model.nodes.len(), &links, &back);

        let sizes: Vec<(f64, f64)> = model.nodes.iter().map(Self::node_size).collect();
        let layer_count = layers.iter().copied().max().unwrap_or_default() + 1;

        let mut layer_width = vec![0.0_f64; layer_count];
        for (node, &layer) in layers.iter().enumerate() {
            layer_width[layer] = layer_width[layer].max(sizes[node].0);
        }
        let mut layer_x = Vec::with_capacity(layer_count);
        let mut x = 0.0;
        for width in &layer_width {
            layer_x.push(x);
            x += width + LAYER_GAP;
        }

        let mut rows = vec![0usize; layer_count];
        for (i, node) in model.nodes.iter().enumerate() {
            let layer = layers[i];
            let (width, height) = sizes[i];
            let y = rows[layer] as f64 * (NODE_HEIGHT + ROW_GAP);
            rows[layer] += 1;
            result.place_node(
                node.id.clone(),
                NodePlacement {
                    position: Point::new(layer_x[layer], y),
                    width,
                    height,
                },
            );
        }

        for (edge_id, source, target) in routed {
            let (Some(from), Some(to)) = (
                result.node(&model.nodes[source].id).copied(),
                result.node(&model.nodes[target].id).copied(),
            ) else {
                continue;
            };
            result.route_edge(edge_id, route(&from, &to));
        }

        result
    }
}

/// Finds edges that point back to a node still on the DFS stack
fn back_edges(node_count: usize, links: &[(usize, usize)]) -> Vec<bool> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        White,
        Gray,
        Black,
    }

    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for (i, &(source, _)) in links.iter().enumerate() {
        outgoing[source].push(i);
    }

    let mut marks = vec![Mark::White; node_count];
    let mut back = vec![false; links.len()];

    for start in 0..node_count {
        if marks[start] != Mark::White {
            continue;
        }
        marks[start] = Mark::Gray;
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];

        while let Some(top) = stack.last_mut() {
            let (node, position) = *top;
            top.1 += 1;
            if let Some(&link) = outgoing[node].get(position) {
                let target = links[link].1;
                match marks[target] {
                    Mark::White => {
                        marks[target] = Mark::Gray;
                        stack.push((target, 0));
                    }
                    Mark::Gray => back[link] = true,
                    Mark::Black => {}
                }
            } else {
                marks[node] = Mark::Black;
                stack.pop();
            }
        }
    }
    back
}

/// Longest-path layering over the acyclic part of the graph
fn assign_layers(node_count: usize, links: &[(usize, usize)], back: &[bool]) -> Vec<usize> {
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut in_degree = vec![0usize; node_count];
    for (&(source, target), &is_back) in links.iter().zip(back) {
        if is_back {
            continue;
        }
        outgoing[source].push(target);
        in_degree[target] += 1;
    }

    let mut layers = vec![0usize; node_count];
    let mut queue: VecDeque<usize> = (0..node_count).filter(|&n| in_degree[n] == 0).collect();
    while let Some(node) = queue.pop_front() {
        for &target in &outgoing[node] {
            layers[target] = layers[target].max(layers[node] + 1);
            in_degree[target] -= 1;
            if in_degree[target] == 0 {
                queue.push_back(target);
            }
        }
    }
    layers
}

/// Polyline from the right side of `from` to the left side of `to`
fn route(from: &NodePlacement, to: &NodePlacement) -> Vec<Point> {
    let start = Point::new(from.position.x + from.width, from.center().y);
    let end = Point::new(to.position.x, to.center().y);

    if end.x > start.x {
        if start.y == end.y {
            return vec![start, end];
        }
        let mid_x = (start.x + end.x) / 2.0;
        return vec![start, Point::new(mid_x, start.y), Point::new(mid_x, end.y), end];
    }

    // Backward edge: leave to the right, pass above both nodes, enter from the left
    let out_x = start.x + LAYER_GAP / 4.0;
    let in_x = end.x - LAYER_GAP / 4.0;
    let top = from.position.y.min(to.position.y) - ROW_GAP / 2.0;
    vec![
        start,
        Point::new(out_x, start.y),
        Point::new(out_x, top),
        Point::new(in_x, top),
        Point::new(in_x, end.y),
        end,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_resolution::domain::{DependencyEdge, GraphStore, PackageNode};

    fn model(names: &[&str], links: &[(&str, &str)]) -> GraphViewModel {
        let mut store = GraphStore::new();
        for name in names {
            store.insert_node(PackageNode::new(*name));
        }
        for (source, target) in links {
            store
                .insert_edge(DependencyEdge::new(source, target, "*", false))
                .unwrap();
        }
        GraphViewModel::from_store(&store)
    }

    fn x(layout: &DiagramLayout, id: &str) -> f64 {
        layout.node(id).unwrap().position.x
    }

    fn y(layout: &DiagramLayout, id: &str) -> f64 {
        layout.node(id).unwrap().position.y
    }

    #[test]
    fn test_empty_model() {
        let layout = LayeredLayout::new().layout(&GraphViewModel::default());
        assert_eq!(layout.node_count(), 0);
        assert_eq!(layout.edge_count(), 0);
    }

    #[test]
    fn test_chain_flows_left_to_right() {
        let layout = LayeredLayout::new().layout(&model(&["a", "b", "c"], &[("a", "b"), ("b", "c")]));

        assert!(x(&layout, "a") < x(&layout, "b"));
        assert!(x(&layout, "b") < x(&layout, "c"));
        assert_eq!(y(&layout, "a"), y(&layout, "c"));
        assert_eq!(layout.edge_count(), 2);

        let a = layout.node("a").unwrap();
        let route = layout.route("dependency:a>b").unwrap();
        assert_eq!(route.len(), 2);
        assert_eq!(route[0], Point::new(a.position.x + a.width, a.center().y));
        assert_eq!(route[1].x, x(&layout, "b"));
    }

    #[test]
    fn test_longest_path_layering() {
        let layout = LayeredLayout::new().layout(&model(
            &["a", "b", "c"],
            &[("a", "b"), ("b", "c"), ("a", "c")],
        ));
        assert!(x(&layout, "c") > x(&layout, "b"));
    }

    #[test]
    fn test_siblings_share_layer_in_model_order() {
        let layout = LayeredLayout::new().layout(&model(
            &["app", "x", "y", "shared"],
            &[("app", "x"), ("app", "y"), ("x", "shared"), ("y", "shared")],
        ));

        assert_eq!(x(&layout, "x"), x(&layout, "y"));
        assert!(y(&layout, "x") < y(&layout, "y"));
        assert!(x(&layout, "shared") > x(&layout, "x"));
        assert_eq!(layout.route("dependency:app>y").unwrap().len(), 4);
    }

    #[test]
    fn test_cycle_terminates_with_backward_route() {
        let layout = LayeredLayout::new().layout(&model(&["a", "b"], &[("a", "b"), ("b", "a")]));

        assert!(x(&layout, "a") < x(&layout, "b"));
        let back = layout.route("dependency:b>a").unwrap();
        assert_eq!(back.len(), 6);
        assert!(back[2].y < y(&layout, "a"));
    }

    #[test]
    fn test_isolated_nodes_stack_in_first_layer() {
        let layout = LayeredLayout::new().layout(&model(&["a", "b"], &[]));
        assert_eq!(x(&layout, "a"), 0.0);
        assert_eq!(x(&layout, "b"), 0.0);
        assert_eq!(y(&layout, "b"), NODE_HEIGHT + ROW_GAP);
    }

    #[test]
    fn test_width_follows_label() {
        let layout = LayeredLayout::new().layout(&model(&["a", "a-much-longer-package-name"], &[]));
        let short = layout.node("a").unwrap().width;
        let long = layout.node("a-much-longer-package-name").unwrap().width;
        assert_eq!(short, MIN_NODE_WIDTH);
        assert!(long > short);
    }
}
