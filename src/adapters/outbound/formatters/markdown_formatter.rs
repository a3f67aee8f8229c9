use crate::application::read_models::{
    CategorySummaryView, OutputFileView, RunReportView, SkippedSourceView, SourceView,
    STATUS_SUCCESS,
};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Markdown table header for category totals
const CATEGORY_TABLE_HEADER: &str = "| Category | Items |\n";
const CATEGORY_TABLE_SEPARATOR: &str = "|----------|-------|\n";

/// Markdown table header for written documents
const OUTPUT_TABLE_HEADER: &str = "| File | SHA-256 |\n";
const OUTPUT_TABLE_SEPARATOR: &str = "|------|---------|\n";

/// Markdown table header for contributing sources
const SOURCE_TABLE_HEADER: &str = "| Manufacturer | Items | Last Updated | Catalog URL |\n";
const SOURCE_TABLE_SEPARATOR: &str = "|--------------|-------|--------------|-------------|\n";

/// Markdown table header for skipped sources
const SKIPPED_TABLE_HEADER: &str = "| Source | Reason |\n";
const SKIPPED_TABLE_SEPARATOR: &str = "|--------|--------|\n";

/// MarkdownReportFormatter adapter for the run summary report
///
/// This adapter implements the ReportFormatter port. Sections with nothing
/// to show are replaced by a one-line note so the layout stays stable.
pub struct MarkdownReportFormatter;

impl MarkdownReportFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }
}

/// Helper methods for rendering sections
impl MarkdownReportFormatter {
    fn render_header(&self, output: &mut String, report: &RunReportView) {
        let status_emoji = if report.status == STATUS_SUCCESS {
            "✅"
        } else {
            "⚠️"
        };
        output.push_str(&format!("# {}\n\n", report.title));
        output.push_str(&format!(
            "- **Status:** {} {}\n",
            status_emoji, report.status
        ));
        output.push_str(&format!("- **Generated:** {}\n", report.generated_at_utc));
        output.push_str(&format!("- **Duration:** {:.1}s\n\n", report.duration_secs));
    }

    fn render_categories(&self, output: &mut String, categories: &[CategorySummaryView]) {
        output.push_str("## Item Counts\n\n");
        output.push_str(CATEGORY_TABLE_HEADER);
        output.push_str(CATEGORY_TABLE_SEPARATOR);
        for category in categories {
            output.push_str(&format!(
                "| {} | {} |\n",
                Self::escape_markdown_table_cell(&category.category),
                category.total_items
            ));
        }
        output.push('\n');
    }

    fn render_outputs(&self, output: &mut String, outputs: &[OutputFileView]) {
        output.push_str("## Outputs\n\n");
        if outputs.is_empty() {
            output.push_str("No structured documents were written.\n\n");
            return;
        }
        output.push_str(OUTPUT_TABLE_HEADER);
        output.push_str(OUTPUT_TABLE_SEPARATOR);
        for file in outputs {
            output.push_str(&format!(
                "| {} | `{}` |\n",
                Self::escape_markdown_table_cell(&file.file_name),
                file.sha256
            ));
        }
        output.push('\n');
    }

    fn render_sources(&self, output: &mut String, sources: &[SourceView]) {
        output.push_str("## Sources\n\n");
        if sources.is_empty() {
            output.push_str("No source contributed items.\n\n");
            return;
        }
        output.push_str(SOURCE_TABLE_HEADER);
        output.push_str(SOURCE_TABLE_SEPARATOR);
        for source in sources {
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&source.manufacturer),
                source.item_count,
                source.last_updated,
                Self::escape_markdown_table_cell(&source.catalog_url)
            ));
        }
        output.push('\n');
    }

    fn render_skipped(&self, output: &mut String, skipped: &[SkippedSourceView]) {
        output.push_str("## Skipped Sources\n\n");
        if skipped.is_empty() {
            output.push_str("None.\n");
            return;
        }
        output.push_str(SKIPPED_TABLE_HEADER);
        output.push_str(SKIPPED_TABLE_SEPARATOR);
        for source in skipped {
            output.push_str(&format!(
                "| {} | {} |\n",
                Self::escape_markdown_table_cell(&source.source_name),
                Self::escape_markdown_table_cell(&source.reason)
            ));
        }
    }
}

impl Default for MarkdownReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownReportFormatter {
    fn extension(&self) -> &'static str {
        "md"
    }

    fn format_report(&self, report: &RunReportView) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, report);
        self.render_categories(&mut output, &report.categories);
        self.render_outputs(&mut output, &report.outputs);
        self.render_sources(&mut output, &report.sources);
        self.render_skipped(&mut output, &report.skipped_sources);

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::STATUS_PARTIAL;

    fn create_test_report() -> RunReportView {
        RunReportView {
            title: "Driver Pack Catalog".to_string(),
            status: STATUS_SUCCESS.to_string(),
            generated_at_utc: "2025-01-02T03:04:05Z".to_string(),
            duration_secs: 12.345,
            categories: vec![
                CategorySummaryView {
                    category: "Win".to_string(),
                    total_items: 3,
                },
                CategorySummaryView {
                    category: "WinPE".to_string(),
                    total_items: 0,
                },
            ],
            outputs: vec![OutputFileView {
                file_name: "DriverPacks.Win.json".to_string(),
                sha256: "deadbeef".to_string(),
            }],
            sources: vec![SourceView {
                manufacturer: "Dell".to_string(),
                catalog_url: "https://downloads.dell.com/catalog/DriverPackCatalog.cab"
                    .to_string(),
                last_updated: "2024-05-01T00:00:00Z".to_string(),
                item_count: 2,
            }],
            skipped_sources: Vec::new(),
        }
    }

    #[test]
    fn test_escape_markdown_table_cell() {
        let escaped = MarkdownReportFormatter::escape_markdown_table_cell("a | b\nc");
        assert_eq!(escaped, "a \\| b c");
    }

    #[test]
    fn test_format_report() {
        let markdown = MarkdownReportFormatter::new()
            .format_report(&create_test_report())
            .unwrap();

        assert!(markdown.starts_with("# Driver Pack Catalog\n"));
        assert!(markdown.contains("- **Status:** ✅ Success"));
        assert!(markdown.contains("- **Duration:** 12.3s"));
        assert!(markdown.contains("| Win | 3 |"));
        assert!(markdown.contains("| WinPE | 0 |"));
        assert!(markdown.contains("| DriverPacks.Win.json | `deadbeef` |"));
        assert!(markdown.contains("| Dell | 2 | 2024-05-01T00:00:00Z |"));
        assert!(markdown.ends_with("## Skipped Sources\n\nNone.\n"));
    }

    #[test]
    fn test_format_partial_report() {
        let mut report = create_test_report();
        report.status = STATUS_PARTIAL.to_string();
        report.sources.clear();
        report.skipped_sources.push(SkippedSourceView {
            source_name: "Lenovo".to_string(),
            reason: "HTTP 503 | retried".to_string(),
        });

        let markdown = MarkdownReportFormatter::new().format_report(&report).unwrap();
        assert!(markdown.contains("- **Status:** ⚠️ Partial"));
        assert!(markdown.contains("No source contributed items."));
        assert!(markdown.contains("| Lenovo | HTTP 503 \\| retried |"));
    }
}
