use crate::catalog_generation::domain::{CatalogSource, OsImage, UnifiedCatalog};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;

/// A source that contributed nothing to this run, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    pub source_name: String,
    pub reason: String,
}

impl SkippedSource {
    pub fn new(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

/// CatalogResponse - Internal response DTO of the driver pack catalog use case
///
/// The unified catalog is already deduplicated, sorted and threshold-checked.
#[derive(Debug, Clone)]
pub struct CatalogResponse {
    pub catalog: UnifiedCatalog,
    pub skipped_sources: Vec<SkippedSource>,
    pub duration: Duration,
}

/// OsCatalogResponse - Internal response DTO of the Windows image use case
#[derive(Debug, Clone)]
pub struct OsCatalogResponse {
    pub generated_at: DateTime<Utc>,
    pub images: Vec<OsImage>,
    /// One source per product feed that was read
    pub sources: Vec<CatalogSource>,
    pub skipped_sources: Vec<SkippedSource>,
    pub duration: Duration,
}

/// PublishResponse - paths written by the publish use case, report last
#[derive(Debug, Clone, Default)]
pub struct PublishResponse {
    pub written: Vec<PathBuf>,
}
