use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::GraphFormatter;

/// Picks the formatter adapter for an [`OutputFormat`]
pub struct FormatterFactory;

impl FormatterFactory {
    /// # Examples
    /// ```
    /// use depgraph_navigator::application::dto::OutputFormat;
    /// use depgraph_navigator::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn GraphFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
        }
    }

    /// Status line printed before the report is rendered
    ///
    /// # Examples
    /// ```
    /// use depgraph_navigator::application::dto::OutputFormat;
    /// use depgraph_navigator::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Json);
    /// assert_eq!(message, "📝 Generating JSON graph output...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Generating JSON graph output...",
            OutputFormat::Markdown => "📝 Generating Markdown graph report...",
        }
    }
}
