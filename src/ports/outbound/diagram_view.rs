use crate::application::read_models::{DiagramLayout, GraphViewModel};

/// DiagramView port for the render collaborator
///
/// Receives complete, consistent snapshots only: every published edge has
/// both endpoints among the published nodes.
pub trait DiagramView {
    /// Replaces the displayed diagram
    fn publish(&self, model: &GraphViewModel, layout: &DiagramLayout);

    /// Toggles the busy indicator
    fn set_loading(&self, loading: bool);

    /// Selects the given node ids
    fn select(&self, ids: &[String]);

    /// Brings the given node ids into view
    fn center(&self, ids: &[String]);

    /// Deselects everything
    fn clear_selection(&self);
}
