use crate::graph_resolution::domain::GraphStore;
use std::collections::HashSet;

/// GraphFilter - Decides node visibility from a name filter
///
/// The filter text uses a space convention to pick the matching mode:
///
/// | text        | matches names that ...   |
/// |-------------|--------------------------|
/// | `" react "` | equal `react`            |
/// | `" react"`  | start with `react`       |
/// | `"react "`  | end with `react`         |
/// | `"react"`   | contain `react`          |
/// | blank       | anything                 |
///
/// A node whose name does not match stays visible when a visible node can
/// be reached from it along dependency edges, so every match keeps the
/// chain of packages that depend on it.
#[derive(Debug, Default)]
pub struct GraphFilter {
    matcher: NameMatcher,
}

impl GraphFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the name filter
    ///
    /// Only the comparison value is trimmed; the mode is chosen from the
    /// leading and trailing characters of the raw text.
    pub fn set_filter(&mut self, text: &str) {
        self.matcher = NameMatcher::parse(text);
    }

    pub fn matches(&self, name: &str) -> bool {
        self.matcher.matches(name)
    }

    /// Recomputes the `hidden` flag of every node in the store
    ///
    /// # Returns
    /// Number of visible nodes after the pass
    pub fn refresh(&self, store: &mut GraphStore) -> usize {
        let mut node_count = 0;
        let mut visible_count = 0;
        for node in store.nodes_mut() {
            let visible = self.matcher.matches(node.name());
            node.set_hidden(!visible);
            node_count += 1;
            if visible {
                visible_count += 1;
            }
        }
        if visible_count == node_count {
            return visible_count;
        }

        let seeds: Vec<String> = store
            .nodes()
            .filter(|node| !node.is_hidden())
            .map(|node| node.id().to_string())
            .collect();

        let mut marked: HashSet<String> = HashSet::new();
        for seed in seeds {
            reveal_dependents(store, seed, &mut marked);
        }

        store.nodes().filter(|node| !node.is_hidden()).count()
    }
}

/// Walks incoming edges backwards from `start`, un-hiding every source
fn reveal_dependents(store: &mut GraphStore, start: String, marked: &mut HashSet<String>) {
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        if !marked.insert(id.clone()) {
            continue;
        }
        let sources: Vec<String> = store
            .incoming(&id)
            .iter()
            .map(|edge| edge.source_id().to_string())
            .collect();
        for source in sources {
            if let Some(node) = store.node_mut(&source) {
                node.set_hidden(false);
            }
            if !marked.contains(&source) {
                stack.push(source);
            }
        }
    }
}

/// Name matcher types selected by the filter text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum NameMatcher {
    /// Blank text
    #[default]
    All,
    /// `" term "`
    Exact(String),
    /// `" term"`
    Prefix(String),
    /// `"term "`
    Suffix(String),
    /// `"term"`
    Contains(String),
}

impl NameMatcher {
    fn parse(text: &str) -> Self {
        let term = text.trim();
        if term.is_empty() {
            NameMatcher::All
        } else if text.starts_with(' ') && text.ends_with(' ') {
            NameMatcher::Exact(term.to_string())
        } else if text.starts_with(' ') {
            NameMatcher::Prefix(term.to_string())
        } else if text.ends_with(' ') {
            NameMatcher::Suffix(term.to_string())
        } else {
            NameMatcher::Contains(term.to_string())
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            NameMatcher::All => true,
            NameMatcher::Exact(s) => name == s,
            NameMatcher::Prefix(prefix) => name.starts_with(prefix),
            NameMatcher::Suffix(suffix) => name.ends_with(suffix),
            NameMatcher::Contains(middle) => name.contains(middle),
        }
    }
}
