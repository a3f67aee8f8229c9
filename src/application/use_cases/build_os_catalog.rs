use super::build_driver_catalog::skip_reason;
use crate::application::dto::{OsCatalogRequest, OsCatalogResponse, SkippedSource};
use crate::application::read_models::OS_CATEGORY;
use crate::catalog_generation::domain::{CatalogSource, Manufacturer};
use crate::catalog_generation::policies::ThresholdPolicy;
use crate::catalog_generation::services::{CatalogUnifier, Deduplicator};
use crate::catalog_generation::vendors::normalize_esd;
use crate::ports::outbound::{OsCatalogRepository, ProgressReporter};
use crate::shared::Result;
use chrono::Utc;
use std::time::Instant;

/// BuildOsCatalogUseCase - builds the Windows ESD image catalog
///
/// Reads every Media Creation Tool product feed the repository exposes,
/// normalizes the `File` entries, dedupes them by content and orders them
/// newest build first.
pub struct BuildOsCatalogUseCase<REPO, PR> {
    repository: REPO,
    progress_reporter: PR,
}

impl<REPO, PR> BuildOsCatalogUseCase<REPO, PR>
where
    REPO: OsCatalogRepository,
    PR: ProgressReporter,
{
    pub fn new(repository: REPO, progress_reporter: PR) -> Self {
        Self {
            repository,
            progress_reporter,
        }
    }

    pub async fn execute(&self, request: OsCatalogRequest) -> Result<OsCatalogResponse> {
        let started = Instant::now();
        let generated_at = Utc::now();
        let feeds = self.repository.product_feeds();

        let mut images = Vec::new();
        let mut sources = Vec::new();
        let mut skipped_sources = Vec::new();

        self.progress_reporter
            .report(&format!("📥 Reading {} product feed(s)...", feeds.len()));

        for (index, feed) in feeds.iter().enumerate() {
            self.progress_reporter
                .report_progress(index, feeds.len(), Some(feed.name.as_str()));
            match self.repository.fetch_products(feed).await {
                Ok(products) => {
                    let normalized = Deduplicator::dedupe_os_images(normalize_esd(&products));
                    self.progress_reporter.report(&format!(
                        "   - {}: {} file(s), {} image(s)",
                        feed.name,
                        products.files.len(),
                        normalized.len()
                    ));
                    sources.push(CatalogSource::new(
                        Manufacturer::Microsoft,
                        feed.url.clone(),
                        generated_at,
                        normalized.len(),
                    ));
                    images.extend(normalized);
                }
                Err(e) => {
                    let reason = skip_reason(&e);
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Warning: Skipping {}: {}",
                        feed.name, reason
                    ));
                    skipped_sources.push(SkippedSource::new(feed.name.clone(), reason));
                }
            }
        }
        self.progress_reporter
            .report_progress(feeds.len(), feeds.len(), Some("done"));

        let images = CatalogUnifier::order_os_images(images);
        self.progress_reporter.report(&format!(
            "💿 {} catalog: {} image(s)",
            OS_CATEGORY,
            images.len()
        ));

        ThresholdPolicy::new(request.min_items).check(OS_CATEGORY, images.len())?;

        Ok(OsCatalogResponse {
            generated_at,
            images,
            sources,
            skipped_sources,
            duration: started.elapsed(),
        })
    }
}
