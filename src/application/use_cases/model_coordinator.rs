use crate::application::read_models::{DiagramLayout, GraphViewModel};
use crate::graph_resolution::domain::{PackageManifest, PackageName};
use crate::graph_resolution::services::GraphService;
use crate::ports::outbound::{DiagramView, GraphLayout, MetadataSource, ProgressReporter};
use crate::shared::Result;
use futures::future::join_all;
use std::cell::{Cell, Ref, RefCell};
use std::collections::HashSet;
use tracing::debug;

/// ModelCoordinator - turns user operations into complete publish cycles
///
/// Every operation mutates the graph through the [`GraphService`] and then
/// publishes once: visibility is recomputed, the visible nodes and the edges
/// between them are laid out, the result is handed to the view, and queued
/// selection/center requests are flushed. The view never sees a graph in
/// the middle of a mutation.
///
/// Operations are meant to be issued one at a time; the loading flag is a
/// plain toggle and does not nest.
///
/// # Type Parameters
/// * `M` - MetadataSource implementation
/// * `L` - GraphLayout implementation
/// * `V` - DiagramView implementation
/// * `PR` - ProgressReporter implementation
pub struct ModelCoordinator<M, L, V, PR> {
    service: GraphService<M>,
    layout: L,
    view: V,
    progress_reporter: PR,
    loading: Cell<bool>,
    pending_select: RefCell<Vec<String>>,
    pending_center: RefCell<Vec<String>>,
    current_model: RefCell<GraphViewModel>,
    current_layout: RefCell<DiagramLayout>,
}

impl<M, L, V, PR> ModelCoordinator<M, L, V, PR>
where
    M: MetadataSource,
    L: GraphLayout,
    V: DiagramView,
    PR: ProgressReporter,
{
    pub fn new(service: GraphService<M>, layout: L, view: V, progress_reporter: PR) -> Self {
        Self {
            service,
            layout,
            view,
            progress_reporter,
            loading: Cell::new(false),
            pending_select: RefCell::new(Vec::new()),
            pending_center: RefCell::new(Vec::new()),
            current_model: RefCell::new(GraphViewModel::default()),
            current_layout: RefCell::new(DiagramLayout::default()),
        }
    }

    pub fn service(&self) -> &GraphService<M> {
        &self.service
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn progress_reporter(&self) -> &PR {
        &self.progress_reporter
    }

    /// The last published model
    pub fn model(&self) -> Ref<'_, GraphViewModel> {
        self.current_model.borrow()
    }

    /// The layout of the last published model
    pub fn layout(&self) -> Ref<'_, DiagramLayout> {
        self.current_layout.borrow()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// Queues a selection to be applied after the next publish
    pub fn request_select(&self, ids: &[String]) {
        self.pending_select.borrow_mut().extend_from_slice(ids);
    }

    /// Queues a center request to be applied after the next publish
    pub fn request_center(&self, ids: &[String]) {
        self.pending_center.borrow_mut().extend_from_slice(ids);
    }

    /// Adds a root node for `name`, publishing only if the node is new
    ///
    /// The node is selected afterwards.
    ///
    /// # Errors
    /// Returns an error if `name` is not a valid package name
    pub fn create_node(&self, name: &str, version: Option<&str>) -> Result<String> {
        let name = PackageName::new(name)?;
        let is_new = !self.service.store().contains_node(name.as_str());
        let id = self
            .service
            .generator()
            .create_root(name.as_str(), version);

        self.request_select(std::slice::from_ref(&id));
        if is_new {
            self.set_loading(true);
            self.update_model();
            self.set_loading(false);
        } else {
            self.flush_pending();
        }
        Ok(id)
    }

    /// Seeds the graph from a manifest and publishes it
    pub fn load_manifest(&self, manifest: &PackageManifest) -> Result<String> {
        self.set_loading(true);
        let loaded = self.service.generator().load_manifest(manifest);
        if let Ok(id) = &loaded {
            self.request_center(std::slice::from_ref(id));
        }
        self.update_model();
        self.set_loading(false);
        Ok(loaded?)
    }

    /// Resolves the given nodes concurrently
    ///
    /// Hidden and unknown nodes are skipped. With `toggle`, resolved nodes
    /// are unresolved instead.
    ///
    /// # Returns
    /// Ids of nodes whose incoming edge was newly added, without duplicates
    pub async fn resolve_nodes(&self, ids: &[String], toggle: bool) -> Vec<String> {
        let targets: Vec<String> = {
            let store = self.service.store();
            ids.iter()
                .filter(|id| store.node(id).is_some_and(|node| !node.is_hidden()))
                .cloned()
                .collect()
        };
        if targets.is_empty() {
            self.request_center(ids);
            self.flush_pending();
            return Vec::new();
        }

        self.set_loading(true);
        self.progress_reporter.report(&format!(
            "🔍 Resolving {} package(s)...",
            targets.len()
        ));

        let generator = self.service.generator();
        let results = join_all(targets.iter().map(|id| async move {
            if toggle {
                generator.toggle_resolve_node(id).await
            } else {
                generator.resolve_node(id).await
            }
        }))
        .await;

        self.request_center(&targets);
        self.update_model();
        self.set_loading(false);
        dedup_preserving_order(results.into_iter().flatten())
    }

    /// Resolves the whole visible graph wave by wave until no new nodes appear
    ///
    /// # Returns
    /// Number of waves run
    pub async fn resolve_graph(&self) -> usize {
        self.resolve_waves(None).await
    }

    /// Like [`resolve_graph`](Self::resolve_graph), but stops after `depth` waves
    pub async fn resolve_to_depth(&self, depth: usize) -> usize {
        self.resolve_waves(Some(depth)).await
    }

    async fn resolve_waves(&self, limit: Option<usize>) -> usize {
        self.set_loading(true);

        let mut wave: Vec<String> = self
            .service
            .store()
            .nodes()
            .filter(|node| !node.is_hidden() && !node.is_resolved())
            .map(|node| node.id().to_string())
            .collect();
        let generator = self.service.generator();
        let mut waves = 0;

        while !wave.is_empty() && limit.is_none_or(|limit| waves < limit) {
            waves += 1;
            self.progress_reporter.report(&format!(
                "🔍 Resolving wave {}: {} package(s)",
                waves,
                wave.len()
            ));
            debug!(wave = waves, size = wave.len(), "resolving wave");

            let results = join_all(wave.iter().map(|id| generator.resolve_node(id))).await;

            let store = self.service.store();
            wave = dedup_preserving_order(results.into_iter().flatten())
                .into_iter()
                .filter(|id| store.node(id).is_some_and(|node| !node.is_resolved()))
                .collect();
            self.progress_reporter.report_progress(
                store.nodes().filter(|node| node.is_resolved()).count(),
                store.node_count(),
                Some(&format!("wave {}", waves)),
            );
        }

        let center = {
            self.service.refresh();
            self.service
                .store()
                .nodes()
                .filter(|node| !node.is_hidden())
                .map(|node| node.id().to_string())
                .collect::<Vec<_>>()
        };
        self.request_center(&center);
        self.update_model();
        self.set_loading(false);
        waves
    }

    /// Applies a name filter, clears the selection and centers what remains
    pub fn filter(&self, text: &str) {
        self.set_loading(true);
        self.service.set_filter(text);
        self.service.refresh();
        self.view.clear_selection();

        let center: Vec<String> = self
            .service
            .store()
            .nodes()
            .filter(|node| !node.is_hidden())
            .map(|node| node.id().to_string())
            .collect();
        self.request_center(&center);
        self.update_model();
        self.set_loading(false);
    }

    /// Removes every node and edge and resets the filter
    pub fn clear(&self) {
        self.service.generator().clear();
        self.service.set_filter("");
        self.update_model();
    }

    /// Resolves the selected nodes, toggling when exactly one is selected
    pub async fn select_nodes(&self, ids: &[String]) -> Vec<String> {
        let nodes: Vec<String> = {
            let store = self.service.store();
            ids.iter()
                .filter(|id| store.contains_node(id))
                .cloned()
                .collect()
        };
        if nodes.is_empty() {
            return Vec::new();
        }
        self.resolve_nodes(&nodes, nodes.len() == 1).await
    }

    /// Resolves every node without toggling
    pub async fn select_all(&self) -> Vec<String> {
        let nodes = self.service.store().node_ids();
        if nodes.is_empty() {
            return Vec::new();
        }
        self.resolve_nodes(&nodes, false).await
    }

    /// Recomputes visibility and publishes the visible graph
    pub fn update_model(&self) {
        self.service.refresh();
        let model = GraphViewModel::from_store(&self.service.store());
        let layout = self.layout.layout(&model);
        self.view.publish(&model, &layout);
        debug!(
            nodes = model.nodes.len(),
            edges = model.edges.len(),
            "published model"
        );

        *self.current_model.borrow_mut() = model;
        *self.current_layout.borrow_mut() = layout;
        self.flush_pending();
    }

    /// Sends queued selection/center requests for nodes that are published
    fn flush_pending(&self) {
        let select = std::mem::take(&mut *self.pending_select.borrow_mut());
        let center = std::mem::take(&mut *self.pending_center.borrow_mut());

        let select = self.published_only(select);
        if !select.is_empty() {
            self.view.select(&select);
        }
        let center = self.published_only(center);
        if !center.is_empty() {
            self.view.center(&center);
        }
    }

    fn published_only(&self, ids: Vec<String>) -> Vec<String> {
        let store = self.service.store();
        let visible = |id: &String| store.node(id).is_some_and(|node| !node.is_hidden());
        dedup_preserving_order(ids.into_iter().filter(visible))
    }

    fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
        self.view.set_loading(loading);
    }
}

fn dedup_preserving_order(ids: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
