use crate::application::read_models::{DiagramLayout, GraphViewModel};
use crate::ports::outbound::DiagramView;
use std::cell::RefCell;

/// Calls received by a [`RecordingView`], in order
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Published { nodes: usize, edges: usize },
    Loading(bool),
    Selected(Vec<String>),
    Centered(Vec<String>),
    SelectionCleared,
}

#[derive(Debug, Default)]
struct ViewState {
    model: GraphViewModel,
    layout: DiagramLayout,
    events: Vec<ViewEvent>,
    loading: bool,
    selection: Vec<String>,
    centered: Vec<String>,
}

/// RecordingView - headless view that keeps the last published diagram
///
/// Used by the CLI to pick up the final snapshot for formatting, and by
/// tests to observe publish cycles.
#[derive(Debug, Default)]
pub struct RecordingView {
    state: RefCell<ViewState>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_model(&self) -> GraphViewModel {
        self.state.borrow().model.clone()
    }

    pub fn last_layout(&self) -> DiagramLayout {
        self.state.borrow().layout.clone()
    }

    pub fn publish_count(&self) -> usize {
        self.state
            .borrow()
            .events
            .iter()
            .filter(|event| matches!(event, ViewEvent::Published { .. }))
            .count()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Every value passed to `set_loading`, oldest first
    pub fn loading_history(&self) -> Vec<bool> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|event| match event {
                ViewEvent::Loading(loading) => Some(*loading),
                _ => None,
            })
            .collect()
    }

    /// Current selection
    pub fn selection(&self) -> Vec<String> {
        self.state.borrow().selection.clone()
    }

    /// Ids of the most recent center request
    pub fn centered(&self) -> Vec<String> {
        self.state.borrow().centered.clone()
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.state.borrow().events.clone()
    }
}

impl DiagramView for RecordingView {
    fn publish(&self, model: &GraphViewModel, layout: &DiagramLayout) {
        let mut state = self.state.borrow_mut();
        state.events.push(ViewEvent::Published {
            nodes: model.nodes.len(),
            edges: model.edges.len(),
        });
        state.model = model.clone();
        state.layout = layout.clone();
        let published = &state.model;
        let kept: Vec<String> = state
            .selection
            .iter()
            .filter(|id| published.contains_node(id))
            .cloned()
            .collect();
        state.selection = kept;
    }

    fn set_loading(&self, loading: bool) {
        let mut state = self.state.borrow_mut();
        state.loading = loading;
        state.events.push(ViewEvent::Loading(loading));
    }

    fn select(&self, ids: &[String]) {
        let mut state = self.state.borrow_mut();
        state.selection = ids.to_vec();
        state.events.push(ViewEvent::Selected(ids.to_vec()));
    }

    fn center(&self, ids: &[String]) {
        let mut state = self.state.borrow_mut();
        state.centered = ids.to_vec();
        state.events.push(ViewEvent::Centered(ids.to_vec()));
    }

    fn clear_selection(&self) {
        let mut state = self.state.borrow_mut();
        state.selection.clear();
        state.events.push(ViewEvent::SelectionCleared);
    }
}
