use crate::application::dto::{CatalogRequest, CatalogResponse, SkippedSource};
use crate::catalog_generation::domain::{DriverPack, Manufacturer};
use crate::catalog_generation::policies::ThresholdPolicy;
use crate::catalog_generation::services::CatalogUnifier;
use crate::ports::outbound::{ProgressReporter, VendorCatalogRepository};
use crate::shared::error::CatalogError;
use crate::shared::Result;
use chrono::Utc;
use std::collections::BTreeMap;
use std::time::Instant;

/// BuildDriverCatalogUseCase - Core use case for the unified driver pack catalog
///
/// Fetches every requested vendor one after another, normalizes the raw
/// records, unifies them into the Win and WinPE catalogs and enforces the
/// configured minimum item counts. A vendor whose fetch or parse fails is
/// recorded as a skipped source and the run continues.
///
/// # Type Parameters
/// * `REPO` - VendorCatalogRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct BuildDriverCatalogUseCase<REPO, PR> {
    repository: REPO,
    progress_reporter: PR,
}

impl<REPO, PR> BuildDriverCatalogUseCase<REPO, PR>
where
    REPO: VendorCatalogRepository,
    PR: ProgressReporter,
{
    /// Creates a new BuildDriverCatalogUseCase with injected dependencies
    pub fn new(repository: REPO, progress_reporter: PR) -> Self {
        Self {
            repository,
            progress_reporter,
        }
    }

    /// Executes the catalog build
    ///
    /// # Errors
    /// Returns `CatalogError::ThresholdNotMet` when a category ends up below
    /// its minimum. Nothing has been written at that point.
    pub async fn execute(&self, request: CatalogRequest) -> Result<CatalogResponse> {
        let started = Instant::now();
        let generated_at = Utc::now();

        // Step 1: Fetch and normalize every vendor
        let (records, catalog_urls, skipped_sources) = self.collect_records(&request).await;

        // Step 2: Merge, dedupe and order
        let catalog = CatalogUnifier::unify(records, &catalog_urls, generated_at);
        for category in catalog.categories() {
            self.progress_reporter.report(&format!(
                "📦 {} catalog: {} item(s) from {} source(s)",
                category.category,
                category.total_items(),
                category.sources.len()
            ));
        }

        // Step 3: Refuse to publish a catalog that shrank below its minimum
        for category in catalog.categories() {
            ThresholdPolicy::new(request.minimum_for(category.category))
                .check(category.category.as_str(), category.total_items())?;
        }

        Ok(CatalogResponse {
            catalog,
            skipped_sources,
            duration: started.elapsed(),
        })
    }

    async fn collect_records(
        &self,
        request: &CatalogRequest,
    ) -> (
        Vec<DriverPack>,
        BTreeMap<Manufacturer, String>,
        Vec<SkippedSource>,
    ) {
        let total = request.vendors.len();
        let mut records = Vec::new();
        let mut catalog_urls = BTreeMap::new();
        let mut skipped_sources = Vec::new();

        self.progress_reporter
            .report(&format!("📥 Fetching {} vendor catalog(s)...", total));

        for (index, vendor) in request.vendors.iter().copied().enumerate() {
            self.progress_reporter
                .report_progress(index, total, Some(vendor.as_str()));
            catalog_urls.insert(vendor, self.repository.catalog_url(vendor));

            match self.repository.fetch_catalog(vendor).await {
                Ok(raw) => {
                    let normalized = raw.normalize();
                    self.progress_reporter.report(&format!(
                        "   - {}: {} raw row(s), {} record(s)",
                        vendor,
                        raw.raw_len(),
                        normalized.len()
                    ));
                    records.extend(normalized);
                }
                Err(e) => {
                    let reason = skip_reason(&e);
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Warning: Skipping {}: {}",
                        vendor, reason
                    ));
                    skipped_sources.push(SkippedSource::new(vendor.as_str(), reason));
                }
            }
        }
        self.progress_reporter
            .report_progress(total, total, Some("done"));

        (records, catalog_urls, skipped_sources)
    }
}

/// One-line reason for a skipped source, without the hint block
pub(crate) fn skip_reason(error: &anyhow::Error) -> String {
    match error.downcast_ref::<CatalogError>() {
        Some(CatalogError::SourceUnavailable { details, .. })
        | Some(CatalogError::MalformedInput { details, .. }) => details.clone(),
        Some(CatalogError::ExtractionFailed { details, .. }) => {
            format!("archive extraction failed: {}", details)
        }
        _ => error
            .to_string()
            .lines()
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}
