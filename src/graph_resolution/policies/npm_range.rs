use semver::{Version, VersionReq};

/// Comparison operators recognised at the start of an npm comparator
const OPERATORS: [&str; 8] = [">=", "<=", "~>", ">", "<", "=", "~", "^"];

/// An npm version range translated into `semver` requirements
///
/// npm ranges are a union (`||`) of comparator sets, where comparators in a
/// set are separated by whitespace. Each set becomes one [`VersionReq`]:
///
/// - `1.2.3 - 2.3.4` hyphen ranges become `>=1.2.3, <=2.3.4`
/// - a bare version is exact (`1.2.3` means `=1.2.3`, `1.2` means `=1.2`)
/// - `x`/`X`/`*` parts are dropped (`1.x` means `=1`, `x` means `*`)
/// - a leading `v` on a version and the Ruby-style `~>` are accepted
///
/// Dist-tags, URLs and other non-semver specifiers do not parse.
#[derive(Debug, Clone)]
pub struct NpmRange {
    alternatives: Vec<VersionReq>,
}

impl NpmRange {
    /// Parses an npm range; returns None when no alternative is a valid range
    pub fn parse(range: &str) -> Option<Self> {
        let alternatives: Vec<VersionReq> = range
            .split("||")
            .filter_map(|set| translate_set(set).and_then(|req| VersionReq::parse(&req).ok()))
            .collect();

        if alternatives.is_empty() {
            None
        } else {
            Some(Self { alternatives })
        }
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }

    /// Highest version among `available` that satisfies the range.
    /// Strings that are not valid versions are ignored.
    pub fn max_satisfying<'a, I>(&self, available: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        available
            .into_iter()
            .filter_map(|raw| Version::parse(raw).ok().map(|version| (version, raw)))
            .filter(|(version, _)| self.matches(version))
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, raw)| raw)
    }
}

/// Translates one whitespace separated comparator set into `semver` syntax
fn translate_set(set: &str) -> Option<String> {
    let tokens = join_detached_operators(set.split_whitespace().collect());

    if tokens.is_empty() {
        return Some("*".to_string());
    }

    if tokens.len() == 3 && tokens[1] == "-" {
        let bounds: Vec<String> = [(">=", &tokens[0]), ("<=", &tokens[2])]
            .into_iter()
            .map(|(op, v)| translate_version(v).map(|v| (op, v)))
            .collect::<Option<Vec<_>>>()?
            .into_iter()
            .filter(|(_, v)| v != "*")
            .map(|(op, v)| format!("{}{}", op, v))
            .collect();
        return Some(if bounds.is_empty() {
            "*".to_string()
        } else {
            bounds.join(", ")
        });
    }

    let mut comparators = Vec::with_capacity(tokens.len());
    for token in &tokens {
        comparators.push(translate_comparator(token)?);
    }

    // `*` alongside other comparators adds nothing
    if comparators.len() > 1 {
        comparators.retain(|c| c != "*");
    }

    Some(comparators.join(", "))
}

/// Merges `>= 1.2.3` (operator separated from its version) into `>=1.2.3`
fn join_detached_operators(tokens: Vec<&str>) -> Vec<String> {
    let mut joined: Vec<String> = Vec::with_capacity(tokens.len());
    let mut pending: Option<&str> = None;

    for token in tokens {
        match pending.take() {
            Some(op) => joined.push(format!("{}{}", op, token)),
            None if OPERATORS.contains(&token) => pending = Some(token),
            None => joined.push(token.to_string()),
        }
    }
    if let Some(op) = pending {
        joined.push(op.to_string());
    }
    joined
}

fn translate_comparator(token: &str) -> Option<String> {
    let (op, version) = OPERATORS
        .iter()
        .find_map(|op| token.strip_prefix(op).map(|rest| (*op, rest)))
        .unwrap_or(("", token));

    let version = translate_version(version)?;
    let op = match op {
        "~>" => "~",
        "" => "=",
        other => other,
    };

    if version == "*" {
        // `>=*`, `=*`, `^*` and `~*` are all "any"; `<*` and `>*` match nothing
        return match op {
            "<" | ">" => None,
            _ => Some("*".to_string()),
        };
    }
    Some(format!("{}{}", op, version))
}

/// Normalises a (possibly partial) version: strips a leading `v`/`=`, drops
/// wildcard parts, and rejects anything that is not numeric.
fn translate_version(version: &str) -> Option<String> {
    let version = version.trim_start_matches('=').trim_start_matches(['v', 'V']);
    if version.is_empty() {
        return None;
    }

    let (core, suffix) = match version.find(['-', '+']) {
        Some(idx) => version.split_at(idx),
        None => (version, ""),
    };

    let mut parts = Vec::with_capacity(3);
    for part in core.split('.') {
        if matches!(part, "x" | "X" | "*") {
            break;
        }
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        parts.push(part);
    }

    if parts.is_empty() {
        return Some("*".to_string());
    }
    if parts.len() > 3 {
        return None;
    }
    // A pre-release tag only makes sense on a full version
    if !suffix.is_empty() && parts.len() < 3 {
        return None;
    }
    Some(format!("{}{}", parts.join("."), suffix))
}
