/// A directed dependency relation `source -> target`
///
/// Edges reference nodes by id and never own them. The id is derived from
/// the endpoint names only, so a second range for the same dependency name
/// maps onto the existing edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    id: String,
    source_id: String,
    target_id: String,
    optional: bool,
    version_range: String,
}

impl DependencyEdge {
    pub fn new(source_id: &str, target_id: &str, version_range: &str, optional: bool) -> Self {
        Self {
            id: Self::edge_id(source_id, target_id),
            source_id: source_id.to_string(),
            target_id: target_id.to_string(),
            optional,
            version_range: version_range.to_string(),
        }
    }

    /// Deterministic edge id for a `(source, target)` pair
    pub fn edge_id(source_id: &str, target_id: &str) -> String {
        format!("dependency:{}>{}", source_id, target_id)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// True for optional and peer dependencies
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Range text of the dependency entry that created the edge (edge label)
    pub fn version_range(&self) -> &str {
        &self.version_range
    }
}
