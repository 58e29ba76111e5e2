use crate::graph_resolution::domain::PackageName;
use std::path::PathBuf;
use std::str::FromStr;

/// A package given on the command line as `name` or `name@range`
///
/// Scoped names keep their leading `@`: `@types/node@^20` splits into
/// `@types/node` and `^20`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub name: String,
    pub range: Option<String>,
}

impl FromStr for PackageSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let separator = text
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '@')
            .map(|(i, _)| i);

        let (name, range) = match separator {
            Some(i) => {
                let range = text[i + 1..].trim();
                if range.is_empty() {
                    return Err(format!("Missing version range after '@' in '{}'", text));
                }
                (&text[..i], Some(range.to_string()))
            }
            None => (text, None),
        };

        let name = PackageName::new(name).map_err(|e| e.to_string())?;
        Ok(Self {
            name: name.into_string(),
            range,
        })
    }
}

impl std::fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.range {
            Some(range) => write!(f, "{}@{}", self.name, range),
            None => write!(f, "{}", self.name),
        }
    }
}

/// How far the exploration resolves from the seeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Resolve this many waves of newly discovered packages
    Depth(usize),
    /// Resolve until no unresolved visible package remains
    All,
}

impl Default for ResolveMode {
    fn default() -> Self {
        ResolveMode::Depth(1)
    }
}

/// GraphRequest - Internal request DTO for the explore use case
#[derive(Debug, Clone, Default)]
pub struct GraphRequest {
    /// Package to seed as a root
    pub package: Option<PackageSpec>,
    /// `package.json` whose dependencies seed the graph
    pub manifest_path: Option<PathBuf>,
    pub resolve_mode: ResolveMode,
    /// Name filter applied after resolution
    pub filter: Option<String>,
}

impl GraphRequest {
    pub fn new(
        package: Option<PackageSpec>,
        manifest_path: Option<PathBuf>,
        resolve_mode: ResolveMode,
        filter: Option<String>,
    ) -> Self {
        Self {
            package,
            manifest_path,
            resolve_mode,
            filter,
        }
    }

    pub fn has_seed(&self) -> bool {
        self.package.is_some() || self.manifest_path.is_some()
    }
}
