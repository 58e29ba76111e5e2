use crate::graph_resolution::domain::{
    DependencyEdge, DependencyMap, GraphStore, PackageManifest, PackageMetadata, PackageNode,
};
use crate::graph_resolution::policies::VersionSelection;
use crate::ports::outbound::MetadataSource;
use crate::shared::error::DepGraphError;
use std::cell::{Ref, RefCell};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Default website used for package links
pub const DEFAULT_WEBSITE_URL: &str = "https://www.npmjs.com";

/// GraphGenerator service - the incremental resolution engine
///
/// Owns the graph store and grows or prunes it as nodes are resolved and
/// unresolved against a [`MetadataSource`].
///
/// All methods take `&self`: the store sits behind a `RefCell` and no borrow
/// is held across an `.await`, so several resolutions can be in flight on the
/// same task while every store mutation stays atomic.
pub struct GraphGenerator<M> {
    source: M,
    store: RefCell<GraphStore>,
    website_url: String,
}

impl<M: MetadataSource> GraphGenerator<M> {
    pub fn new(source: M) -> Self {
        Self::with_website_url(source, DEFAULT_WEBSITE_URL)
    }

    pub fn with_website_url(source: M, website_url: impl Into<String>) -> Self {
        Self {
            source,
            store: RefCell::new(GraphStore::new()),
            website_url: website_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Read access to the graph store
    ///
    /// The returned guard must be dropped before awaiting any resolution.
    pub fn store(&self) -> Ref<'_, GraphStore> {
        self.store.borrow()
    }

    pub(crate) fn with_store_mut<R>(&self, f: impl FnOnce(&mut GraphStore) -> R) -> R {
        f(&mut self.store.borrow_mut())
    }

    pub fn source(&self) -> &M {
        &self.source
    }

    /// Returns the id of the node for `name`, creating it if needed
    ///
    /// A supplied range is appended to the node's required versions unless
    /// it is already recorded.
    pub fn generate_node(&self, name: &str, required_version: Option<&str>) -> String {
        let mut store = self.store.borrow_mut();
        if !store.contains_node(name) {
            store.insert_node(PackageNode::new(name));
        }
        if let (Some(range), Some(node)) = (required_version, store.node_mut(name)) {
            node.add_required_version(range);
        }
        name.to_string()
    }

    /// Like [`generate_node`](Self::generate_node), and flags the node as a
    /// root so that unresolving other nodes never prunes it
    pub fn create_root(&self, name: &str, required_version: Option<&str>) -> String {
        let id = self.generate_node(name, required_version);
        if let Some(node) = self.store.borrow_mut().node_mut(&id) {
            node.mark_root();
        }
        id
    }

    /// Adds an edge from `source_id` to every entry of `dependencies`,
    /// creating target nodes as needed
    ///
    /// # Returns
    /// Ids of the targets whose edge was newly added. Targets already linked
    /// from this source are left out.
    ///
    /// # Errors
    /// `IllegalState` if the source node does not exist
    pub fn add_dependencies(
        &self,
        source_id: &str,
        dependencies: &DependencyMap,
        optional: bool,
    ) -> Result<Vec<String>, DepGraphError> {
        if !self.store.borrow().contains_node(source_id) {
            return Err(DepGraphError::IllegalState {
                details: format!("cannot add dependencies to unknown node {}", source_id),
            });
        }

        let mut added = Vec::new();
        for (name, range) in dependencies {
            let target_id = self.generate_node(name, Some(range));
            let edge = DependencyEdge::new(source_id, &target_id, range, optional);
            if self.store.borrow_mut().insert_edge(edge)? {
                added.push(target_id);
            }
        }
        Ok(added)
    }

    /// Seeds the graph from a local manifest
    ///
    /// The manifest's package becomes a root that counts as resolved with the
    /// manifest's own version; its dependency maps become edges.
    pub fn load_manifest(&self, manifest: &PackageManifest) -> Result<String, DepGraphError> {
        let id = self.create_root(&manifest.name, manifest.version.as_deref());
        if let Some(node) = self.store.borrow_mut().node_mut(&id) {
            node.apply_resolution(
                manifest.version.clone().unwrap_or_default(),
                manifest.description.clone(),
                None,
            );
        }

        if let Some(dependencies) = &manifest.dependencies {
            self.add_dependencies(&id, dependencies, false)?;
        }
        if let Some(dependencies) = &manifest.optional_dependencies {
            self.add_dependencies(&id, dependencies, true)?;
        }
        if let Some(dependencies) = &manifest.peer_dependencies {
            self.add_dependencies(&id, dependencies, true)?;
        }
        Ok(id)
    }

    /// Resolves a node, reporting failures to the caller
    ///
    /// A node that is already resolved or being resolved is left alone and
    /// yields an empty list. On failure the node goes back to unresolved.
    ///
    /// # Returns
    /// Ids of dependency targets whose edge was newly added
    pub async fn try_resolve_node(&self, id: &str) -> Result<Vec<String>, DepGraphError> {
        let name = {
            let mut store = self.store.borrow_mut();
            let node = store.node_mut(id).ok_or_else(|| DepGraphError::IllegalState {
                details: format!("cannot resolve unknown node {}", id),
            })?;
            if node.is_resolved() || node.is_resolving() {
                return Ok(Vec::new());
            }
            node.mark_resolving();
            node.name().to_string()
        };

        debug!(package = %name, "fetching package metadata");
        let fetched = self
            .source
            .fetch_metadata(&name)
            .await
            .map_err(|error| classify_fetch_error(&name, error));

        let outcome = match fetched {
            Ok(metadata) => self.apply_metadata(id, &name, metadata),
            Err(error) => Err(error),
        };

        if outcome.is_err() {
            if let Some(node) = self.store.borrow_mut().node_mut(id) {
                if node.is_resolving() {
                    node.mark_unresolved();
                }
            }
        }
        outcome
    }

    /// Resolves a node; failures are recorded on the node, never returned
    pub async fn resolve_node(&self, id: &str) -> Vec<String> {
        match self.try_resolve_node(id).await {
            Ok(added) => added,
            Err(error) => {
                warn!(node = %id, error = %error, "package resolution failed");
                if let Some(node) = self.store.borrow_mut().node_mut(id) {
                    node.mark_failed(error.node_message());
                }
                Vec::new()
            }
        }
    }

    /// Unresolves a resolved node, otherwise resolves it
    pub async fn toggle_resolve_node(&self, id: &str) -> Vec<String> {
        let resolved = self
            .store
            .borrow()
            .node(id)
            .is_some_and(PackageNode::is_resolved);
        if resolved {
            self.unresolve_node(id);
            Vec::new()
        } else {
            self.resolve_node(id).await
        }
    }

    /// Discards the dependency edges below a node and prunes what is left
    /// without any edge
    ///
    /// Edges are removed depth first: every node reachable through outgoing
    /// edges loses its own outgoing edges before the edges leading to it are
    /// removed. Afterwards every node with no incident edge is deleted,
    /// except roots and the unresolved node itself.
    ///
    /// A shared dependency that is still referenced from elsewhere survives
    /// the sweep, but it stays marked resolved while having lost its outgoing
    /// edges, and nodes only reachable through it are pruned.
    pub fn unresolve_node(&self, id: &str) {
        let mut store = self.store.borrow_mut();
        if !store.contains_node(id) {
            return;
        }

        remove_edges_below(&mut store, id);

        let orphans: Vec<String> = store
            .nodes()
            .filter(|node| node.id() != id && !node.is_root() && store.degree(node.id()) == 0)
            .map(|node| node.id().to_string())
            .collect();
        debug!(node = %id, pruned = orphans.len(), "unresolved node");
        for orphan in orphans {
            store.remove_node(&orphan);
        }

        if let Some(node) = store.node_mut(id) {
            node.mark_unresolved();
        }
    }

    /// Removes every node and edge
    pub fn clear(&self) {
        self.store.borrow_mut().clear();
    }

    fn apply_metadata(
        &self,
        id: &str,
        name: &str,
        metadata: PackageMetadata,
    ) -> Result<Vec<String>, DepGraphError> {
        let required = {
            let store = self.store.borrow();
            match store.node(id) {
                Some(node) if node.is_resolving() => node.required_versions().to_vec(),
                // Removed or recreated while the fetch was in flight
                _ => return Ok(Vec::new()),
            }
        };

        let version = VersionSelection::resolve(
            &required,
            metadata.versions.keys().map(String::as_str),
            metadata.latest(),
        )
        .ok_or_else(|| DepGraphError::NoMatchingVersion {
            package: name.to_string(),
            required: required.clone(),
        })?;

        let version_metadata =
            metadata
                .versions
                .get(&version)
                .ok_or_else(|| DepGraphError::IllegalState {
                    details: format!(
                        "latest tag of {} points to unpublished version {}",
                        name, version
                    ),
                })?;

        let description = version_metadata
            .description
            .clone()
            .or_else(|| metadata.description.clone());
        let url = format!("{}/package/{}", self.website_url, name);

        if let Some(node) = self.store.borrow_mut().node_mut(id) {
            node.apply_resolution(version.clone(), description, Some(url));
        }
        debug!(package = %name, version = %version, "resolved package");

        let mut added = Vec::new();
        if let Some(dependencies) = &version_metadata.dependencies {
            added.extend(self.add_dependencies(id, dependencies, false)?);
        }
        if let Some(dependencies) = &version_metadata.optional_dependencies {
            added.extend(self.add_dependencies(id, dependencies, true)?);
        }
        if let Some(dependencies) = &version_metadata.peer_dependencies {
            added.extend(self.add_dependencies(id, dependencies, true)?);
        }
        Ok(added)
    }
}

/// Removes the outgoing edges of `start` and of every node reachable from it
fn remove_edges_below(store: &mut GraphStore, start: &str) {
    let mut visited: HashSet<String> = HashSet::new();
    let mut stack = vec![start.to_string()];
    while let Some(id) = stack.pop() {
        if !visited.insert(id.clone()) {
            continue;
        }
        let outgoing: Vec<(String, String)> = store
            .outgoing(&id)
            .iter()
            .map(|edge| (edge.id().to_string(), edge.target_id().to_string()))
            .collect();
        for (edge_id, target) in outgoing {
            store.remove_edge(&edge_id);
            if !visited.contains(&target) {
                stack.push(target);
            }
        }
    }
}

/// Keeps typed registry errors, wraps anything else as a fetch failure
fn classify_fetch_error(package: &str, error: anyhow::Error) -> DepGraphError {
    match error.downcast::<DepGraphError>() {
        Ok(typed) => typed,
        Err(other) => DepGraphError::MetadataFetch {
            package: package.to_string(),
            details: format!("{:#}", other),
        },
    }
}
