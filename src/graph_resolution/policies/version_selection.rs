use super::NpmRange;

/// VersionSelection policy for choosing the concrete version of a package
///
/// Required ranges are tried in the order they were recorded, and the first
/// range with any satisfying version wins with its highest match. Later
/// ranges are not consulted even if they would select a newer version.
/// When no range matches, the `latest` dist-tag is used.
pub struct VersionSelection;

impl VersionSelection {
    /// Selects a version for a package
    ///
    /// # Arguments
    /// * `required` - Ranges in discovery order
    /// * `available` - Published version strings
    /// * `latest` - The `latest` dist-tag, if any
    ///
    /// # Returns
    /// The selected version, or None if neither a range nor `latest` applies
    pub fn resolve<'a, I>(required: &[String], available: I, latest: Option<&str>) -> Option<String>
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: Clone,
    {
        let available = available.into_iter();
        required
            .iter()
            .filter_map(|range| NpmRange::parse(range))
            .find_map(|range| range.max_satisfying(available.clone()))
            .map(str::to_string)
            .or_else(|| latest.map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AVAILABLE: [&str; 4] = ["1.2.0", "1.5.0", "2.0.0", "2.3.0"];

    fn ranges(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_first_range_wins_over_newer_match() {
        let selected = VersionSelection::resolve(
            &ranges(&["^1.0.0", "^2.0.0"]),
            AVAILABLE.iter().copied(),
            Some("2.3.0"),
        );
        assert_eq!(selected.as_deref(), Some("1.5.0"));
    }

    #[test]
    fn test_later_range_used_when_first_has_no_match() {
        let selected = VersionSelection::resolve(
            &ranges(&["^3.0.0", "~2.0.0"]),
            AVAILABLE.iter().copied(),
            Some("2.3.0"),
        );
        assert_eq!(selected.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_falls_back_to_latest() {
        let selected = VersionSelection::resolve(
            &ranges(&["^9.0.0"]),
            AVAILABLE.iter().copied(),
            Some("2.3.0"),
        );
        assert_eq!(selected.as_deref(), Some("2.3.0"));
    }

    #[test]
    fn test_no_ranges_uses_latest() {
        let selected = VersionSelection::resolve(&[], AVAILABLE.iter().copied(), Some("2.0.0"));
        assert_eq!(selected.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_unparsable_range_is_skipped() {
        let selected = VersionSelection::resolve(
            &ranges(&["next", "^1.2.0"]),
            AVAILABLE.iter().copied(),
            None,
        );
        assert_eq!(selected.as_deref(), Some("1.5.0"));
    }

    #[test]
    fn test_no_match_and_no_latest() {
        let selected =
            VersionSelection::resolve(&ranges(&["^9.0.0"]), AVAILABLE.iter().copied(), None);
        assert_eq!(selected, None);
    }
}
