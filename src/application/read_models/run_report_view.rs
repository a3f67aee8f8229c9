//! Read model of the Markdown run summary

use super::driver_pack_view::SourceView;

/// Status line of a run that wrote every document
pub const STATUS_SUCCESS: &str = "Success";
/// Status line of a run that wrote its documents with sources missing
pub const STATUS_PARTIAL: &str = "Partial";

/// Summary of one publishing run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReportView {
    pub title: String,
    pub status: String,
    /// RFC 3339, UTC
    pub generated_at_utc: String,
    pub duration_secs: f64,
    pub categories: Vec<CategorySummaryView>,
    pub outputs: Vec<OutputFileView>,
    pub sources: Vec<SourceView>,
    pub skipped_sources: Vec<SkippedSourceView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySummaryView {
    pub category: String,
    pub total_items: usize,
}

/// A structured document written by the run and its SHA-256
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFileView {
    pub file_name: String,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSourceView {
    pub source_name: String,
    pub reason: String,
}
