use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownReportFormatter, XmlFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::{CatalogFormatter, ReportFormatter};

/// Factory for creating catalog formatters
///
/// This factory encapsulates the creation logic for different formatter implementations,
/// following the Factory Pattern. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates one formatter per concrete document format of `format`
    ///
    /// # Examples
    /// ```
    /// use driverpack_catalog::application::dto::OutputFormat;
    /// use driverpack_catalog::application::factories::FormatterFactory;
    ///
    /// let formatters = FormatterFactory::create_all(OutputFormat::All);
    /// assert_eq!(formatters.len(), 2);
    /// ```
    pub fn create_all(format: OutputFormat) -> Vec<Box<dyn CatalogFormatter>> {
        format.expand().into_iter().map(Self::create).collect()
    }

    /// Creates a formatter instance for a single document format.
    /// `All` yields the JSON formatter; use [`Self::create_all`] to expand it.
    pub fn create(format: OutputFormat) -> Box<dyn CatalogFormatter> {
        match format {
            OutputFormat::Json | OutputFormat::All => Box::new(JsonFormatter::new()),
            OutputFormat::Xml => Box::new(XmlFormatter::new()),
        }
    }

    /// Creates the summary report formatter
    pub fn create_report() -> Box<dyn ReportFormatter> {
        Box::new(MarkdownReportFormatter::new())
    }

    /// Returns the progress message for the specified output format
    ///
    /// # Examples
    /// ```
    /// use driverpack_catalog::application::dto::OutputFormat;
    /// use driverpack_catalog::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Xml);
    /// assert_eq!(message, "📝 Generating XML documents...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Generating JSON documents...",
            OutputFormat::Xml => "📝 Generating XML documents...",
            OutputFormat::All => "📝 Generating JSON and XML documents...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_json_formatter() {
        let formatter = FormatterFactory::create(OutputFormat::Json);
        assert_eq!(formatter.extension(), "json");
    }

    #[test]
    fn test_create_xml_formatter() {
        let formatter = FormatterFactory::create(OutputFormat::Xml);
        assert_eq!(formatter.extension(), "xml");
    }

    #[test]
    fn test_create_all_keeps_json_first() {
        let extensions: Vec<&str> = FormatterFactory::create_all(OutputFormat::All)
            .iter()
            .map(|f| f.extension())
            .collect();
        assert_eq!(extensions, vec!["json", "xml"]);
    }

    #[test]
    fn test_create_report() {
        assert_eq!(FormatterFactory::create_report().extension(), "md");
    }

    #[test]
    fn test_progress_message_all() {
        let message = FormatterFactory::progress_message(OutputFormat::All);
        assert_eq!(message, "📝 Generating JSON and XML documents...");
    }
}
