use crate::application::read_models::GraphReport;
use crate::shared::Result;

/// GraphFormatter port for formatting the final graph report
///
/// This port abstracts the output formats (JSON, Markdown, etc.).
pub trait GraphFormatter {
    /// Formats the report
    ///
    /// # Errors
    /// Returns an error if formatting or serialization fails
    fn format(&self, report: &GraphReport) -> Result<String>;
}
