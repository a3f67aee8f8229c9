use crate::application::dto::{
    CatalogResponse, OsCatalogResponse, OutputFormat, PublishResponse, SkippedSource,
};
use crate::application::factories::FormatterFactory;
use crate::application::read_models::{
    CatalogReadModelBuilder, CategorySummaryView, OutputFileView, RunReportView,
    SkippedSourceView, SourceView, OS_CATEGORY, STATUS_PARTIAL, STATUS_SUCCESS,
};
use crate::ports::outbound::{OutputWriter, ProgressReporter};
use crate::shared::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};
use std::time::Duration;

/// File name stem of the driver pack documents
pub const DRIVER_PACKS_STEM: &str = "DriverPacks";
/// File name stem of the Windows image documents
pub const WINDOWS_IMAGES_STEM: &str = "WindowsImages";

/// One rendered document waiting to be written
struct RenderedDocument {
    file_name: String,
    content: String,
}

/// Everything a run summary needs besides the written files
struct RunSummary<'a> {
    title: &'a str,
    generated_at: DateTime<Utc>,
    duration: Duration,
    categories: Vec<CategorySummaryView>,
    sources: Vec<SourceView>,
    skipped_sources: &'a [SkippedSource],
}

/// PublishCatalogUseCase - serializes built catalogs and writes them out
///
/// Every document is rendered in memory before the first write, so a
/// serialization failure leaves the output directory untouched. Each write
/// goes through the atomic [`OutputWriter`]. The Markdown summary, carrying
/// the SHA-256 of every structured document, is written last.
pub struct PublishCatalogUseCase<W, PR> {
    writer: W,
    progress_reporter: PR,
    format: OutputFormat,
}

impl<W, PR> PublishCatalogUseCase<W, PR>
where
    W: OutputWriter,
    PR: ProgressReporter,
{
    pub fn new(writer: W, progress_reporter: PR, format: OutputFormat) -> Self {
        Self {
            writer,
            progress_reporter,
            format,
        }
    }

    /// Writes `DriverPacks.{Win,WinPE}.{ext}` and `DriverPacks.Report.md`
    pub fn publish_drivers(&self, response: &CatalogResponse) -> Result<PublishResponse> {
        let generated_at = response.catalog.generated_at;
        self.progress_reporter
            .report(FormatterFactory::progress_message(self.format));

        let models: Vec<_> = response
            .catalog
            .categories()
            .into_iter()
            .map(|category| CatalogReadModelBuilder::build(category, generated_at))
            .collect();

        let mut documents = Vec::new();
        for formatter in FormatterFactory::create_all(self.format) {
            for model in &models {
                documents.push(RenderedDocument {
                    file_name: format!(
                        "{}.{}.{}",
                        DRIVER_PACKS_STEM,
                        model.metadata.category,
                        formatter.extension()
                    ),
                    content: formatter.format_catalog(model)?,
                });
            }
        }

        let summary = RunSummary {
            title: "Driver Pack Catalog",
            generated_at,
            duration: response.duration,
            categories: models
                .iter()
                .map(|model| CategorySummaryView {
                    category: model.metadata.category.clone(),
                    total_items: model.metadata.total_items,
                })
                .collect(),
            sources: models
                .iter()
                .flat_map(|model| model.sources.iter().cloned())
                .collect(),
            skipped_sources: &response.skipped_sources,
        };

        self.write_all(DRIVER_PACKS_STEM, documents, summary)
    }

    /// Writes `WindowsImages.{ext}` and `WindowsImages.Report.md`
    pub fn publish_os(&self, response: &OsCatalogResponse) -> Result<PublishResponse> {
        self.progress_reporter
            .report(FormatterFactory::progress_message(self.format));

        let model = CatalogReadModelBuilder::build_os(
            &response.images,
            &response.sources,
            response.generated_at,
        );

        let mut documents = Vec::new();
        for formatter in FormatterFactory::create_all(self.format) {
            documents.push(RenderedDocument {
                file_name: format!("{}.{}", WINDOWS_IMAGES_STEM, formatter.extension()),
                content: formatter.format_os_catalog(&model)?,
            });
        }

        let summary = RunSummary {
            title: "Windows Image Catalog",
            generated_at: response.generated_at,
            duration: response.duration,
            categories: vec![CategorySummaryView {
                category: OS_CATEGORY.to_string(),
                total_items: model.metadata.total_items,
            }],
            sources: model.sources.clone(),
            skipped_sources: &response.skipped_sources,
        };

        self.write_all(WINDOWS_IMAGES_STEM, documents, summary)
    }

    fn write_all(
        &self,
        stem: &str,
        documents: Vec<RenderedDocument>,
        summary: RunSummary<'_>,
    ) -> Result<PublishResponse> {
        let outputs: Vec<OutputFileView> = documents
            .iter()
            .map(|document| OutputFileView {
                file_name: document.file_name.clone(),
                sha256: sha256_hex(&document.content),
            })
            .collect();

        let report_formatter = FormatterFactory::create_report();
        let report = report_formatter.format_report(&build_report(summary, outputs))?;
        let report_name = format!("{}.Report.{}", stem, report_formatter.extension());

        let mut written = Vec::with_capacity(documents.len() + 1);
        for document in &documents {
            written.push(self.writer.write(&document.file_name, &document.content)?);
        }
        written.push(self.writer.write(&report_name, &report)?);

        self.progress_reporter.report_completion(&format!(
            "✅ Wrote {} file(s)",
            written.len()
        ));

        Ok(PublishResponse { written })
    }
}

fn build_report(summary: RunSummary<'_>, outputs: Vec<OutputFileView>) -> RunReportView {
    let status = if summary.skipped_sources.is_empty() {
        STATUS_SUCCESS
    } else {
        STATUS_PARTIAL
    };
    RunReportView {
        title: summary.title.to_string(),
        status: status.to_string(),
        generated_at_utc: summary
            .generated_at
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        duration_secs: summary.duration.as_secs_f64(),
        categories: summary.categories,
        outputs,
        sources: summary.sources,
        skipped_sources: summary
            .skipped_sources
            .iter()
            .map(|skipped| SkippedSourceView {
                source_name: skipped.source_name.clone(),
                reason: skipped.reason.clone(),
            })
            .collect(),
    }
}

fn sha256_hex(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
