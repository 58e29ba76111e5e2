use crate::application::read_models::{DiagramLayout, GraphViewModel};

/// GraphLayout port for the layout collaborator
///
/// A pure function of the published model: it receives the visible nodes and
/// edges and returns positions and sizes per node id plus a route per edge id.
/// It never reads or mutates graph state.
pub trait GraphLayout {
    fn layout(&self, model: &GraphViewModel) -> DiagramLayout;
}
