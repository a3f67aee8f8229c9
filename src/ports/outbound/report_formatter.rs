use crate::application::read_models::RunReportView;
use crate::shared::Result;

/// ReportFormatter port for rendering the human-readable run summary
pub trait ReportFormatter {
    /// File extension of the produced report, without the dot
    fn extension(&self) -> &'static str;

    /// Renders the summary of one run
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn format_report(&self, report: &RunReportView) -> Result<String>;
}
