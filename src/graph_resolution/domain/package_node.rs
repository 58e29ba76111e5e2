use crate::shared::error::DepGraphError;
use crate::shared::Result;
use serde::Serialize;

/// Maximum length of an npm package name (registry limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 214;

/// NewType wrapper for a user supplied npm package name with validation
///
/// Names coming back from registry dependency maps are trusted as-is; this
/// type guards the entry points where a human types a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let invalid = |reason: &str| DepGraphError::InvalidPackageName {
            name: name.clone(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("Package name cannot be empty").into());
        }

        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            return Err(invalid(&format!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PACKAGE_NAME_LENGTH
            ))
            .into());
        }

        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(invalid("Package name cannot contain whitespace").into());
        }

        if name.contains("..") || name.contains('\\') || name.contains('?') || name.contains('#') {
            return Err(invalid("Package name contains URL-unsafe characters").into());
        }

        match name.strip_prefix('@') {
            Some(scoped) => {
                let mut parts = scoped.split('/');
                let scope = parts.next().unwrap_or_default();
                let bare = parts.next().unwrap_or_default();
                if scope.is_empty() || bare.is_empty() || parts.next().is_some() {
                    return Err(invalid("Scoped names must have the form @scope/name").into());
                }
            }
            None if name.contains('/') => {
                return Err(invalid("Only scoped names (@scope/name) may contain '/'").into());
            }
            None => {}
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-node resolution state machine
///
/// `Unresolved -> Resolving -> {Resolved | Errored}`; `Resolved -> Unresolved`
/// on unresolve. `Errored` counts as unresolved for every caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionState {
    #[default]
    Unresolved,
    Resolving,
    Resolved,
    Errored,
}

/// A package in the dependency graph, keyed by its name
#[derive(Debug, Clone, PartialEq)]
pub struct PackageNode {
    name: String,
    required_versions: Vec<String>,
    resolved_version: Option<String>,
    description: Option<String>,
    url: Option<String>,
    state: ResolutionState,
    hidden: bool,
    error: Option<String>,
    root: bool,
}

impl PackageNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required_versions: Vec::new(),
            resolved_version: None,
            description: None,
            url: None,
            state: ResolutionState::Unresolved,
            hidden: false,
            error: None,
            root: false,
        }
    }

    /// Node id; identical to the package name
    pub fn id(&self) -> &str {
        &self.name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Required ranges in discovery order, without duplicates
    pub fn required_versions(&self) -> &[String] {
        &self.required_versions
    }

    pub fn resolved_version(&self) -> Option<&str> {
        self.resolved_version.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn state(&self) -> ResolutionState {
        self.state
    }

    pub fn is_resolved(&self) -> bool {
        self.state == ResolutionState::Resolved
    }

    pub fn is_resolving(&self) -> bool {
        self.state == ResolutionState::Resolving
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True for nodes created directly by the user rather than discovered
    /// as a dependency. Roots survive the unresolve sweep.
    pub fn is_root(&self) -> bool {
        self.root
    }

    /// Appends a range unless it is empty or already recorded.
    /// Returns true if the range was added.
    pub fn add_required_version(&mut self, range: &str) -> bool {
        if range.is_empty() || self.required_versions.iter().any(|r| r == range) {
            return false;
        }
        self.required_versions.push(range.to_string());
        true
    }

    pub(crate) fn mark_root(&mut self) {
        self.root = true;
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub(crate) fn mark_resolving(&mut self) {
        self.state = ResolutionState::Resolving;
    }

    pub(crate) fn apply_resolution(
        &mut self,
        version: String,
        description: Option<String>,
        url: Option<String>,
    ) {
        self.resolved_version = Some(version);
        self.description = description;
        self.url = url;
        self.error = None;
        self.state = ResolutionState::Resolved;
    }

    pub(crate) fn mark_failed(&mut self, error: String) {
        self.error = Some(error);
        self.state = ResolutionState::Errored;
    }

    pub(crate) fn mark_unresolved(&mut self) {
        self.state = ResolutionState::Unresolved;
    }
}
