//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of domain data for the formatters.

pub mod catalog_read_model;
pub mod catalog_read_model_builder;
pub mod driver_pack_view;
pub mod run_report_view;

pub use catalog_read_model::{
    CatalogMetadataView, CatalogReadModel, OsCatalogReadModel, SCHEMA_VERSION,
};
pub use catalog_read_model_builder::{CatalogReadModelBuilder, OS_CATEGORY};
pub use driver_pack_view::{
    DriverPackView, HashesView, ModelView, OsImageView, OsInfoView, SourceView,
};
pub use run_report_view::{
    CategorySummaryView, OutputFileView, RunReportView, SkippedSourceView, STATUS_PARTIAL,
    STATUS_SUCCESS,
};
