/// ProgressReporter port for user-facing feedback while the graph grows
///
/// Resolution runs in waves and each wave may issue many registry requests,
/// so the coordinator reports per wave rather than per package. Output goes
/// to a channel separate from the report itself (stderr for the CLI).
pub trait ProgressReporter {
    /// A one-line status message
    fn report(&self, message: &str);

    /// Resolved packages so far out of the packages currently known
    ///
    /// `total` may grow between calls as waves discover new packages.
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// A warning that does not stop the run (e.g. packages that failed)
    fn report_error(&self, message: &str);

    /// Final message of a run
    fn report_completion(&self, message: &str);
}
