//! Catalog read models
//!
//! Denormalized documents handed to the formatters. Everything a formatter
//! needs is already computed here; formatters carry no business logic.

use super::driver_pack_view::{DriverPackView, OsImageView, SourceView};

/// Version of the emitted document layout
pub const SCHEMA_VERSION: &str = "1.0";

/// Root attributes shared by every catalog document
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogMetadataView {
    pub schema_version: String,
    /// RFC 3339, UTC
    pub generated_at_utc: String,
    pub total_items: usize,
    /// `Win`, `WinPE` or `OS`
    pub category: String,
}

/// Driver pack catalog of one category
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogReadModel {
    pub metadata: CatalogMetadataView,
    /// One entry per manufacturer with at least one item
    pub sources: Vec<SourceView>,
    pub items: Vec<DriverPackView>,
}

/// Windows ESD image catalog
#[derive(Debug, Clone, PartialEq)]
pub struct OsCatalogReadModel {
    pub metadata: CatalogMetadataView,
    pub sources: Vec<SourceView>,
    pub images: Vec<OsImageView>,
}
