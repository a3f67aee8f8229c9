//! driverpack-catalog - unified driver pack and Windows image catalogs
//!
//! This library downloads the driver pack manifests of Dell, HP, Lenovo and
//! Microsoft Surface, normalizes every vendor's records into one canonical
//! shape and writes deterministic, deduplicated catalogs split into Win and
//! WinPE categories. A second pipeline turns the Media Creation Tool
//! `products.xml` feeds into a catalog of Windows ESD images.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`catalog_generation`): Canonical records, normalizers,
//!   release-id policies, vendor adapters and unification services
//! - **Application Layer** (`application`): Use cases, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): HTTP, archive, parser, file system, formatter
//!   and console implementations of the ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use driverpack_catalog::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! // Create adapters
//! let repository = HttpCatalogRepository::new(
//!     HttpFetcher::new(HttpSettings::default())?,
//!     CabExtractor::new(),
//!     CatalogEndpoints::default(),
//! );
//!
//! // Build the catalogs
//! let use_case = BuildDriverCatalogUseCase::new(repository, StderrProgressReporter::new());
//! let request = CatalogRequest::new(Manufacturer::ALL.to_vec(), 0, 0);
//! let response = use_case.execute(request).await?;
//!
//! // Write them out
//! let publisher = PublishCatalogUseCase::new(
//!     FileSystemWriter::new(PathBuf::from("catalogs")),
//!     StderrProgressReporter::new(),
//!     OutputFormat::All,
//! );
//! publisher.publish_drivers(&response)?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod catalog_generation;
pub mod cli;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::archive::CabExtractor;
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, LocalCatalogRepository,
    };
    pub use crate::adapters::outbound::formatters::{
        JsonFormatter, MarkdownReportFormatter, XmlFormatter,
    };
    pub use crate::adapters::outbound::network::{
        CatalogEndpoints, HttpCatalogRepository, HttpFetcher, HttpSettings,
    };
    pub use crate::application::dto::{
        CatalogRequest, CatalogResponse, OsCatalogRequest, OsCatalogResponse, OutputFormat,
        PublishResponse, SkippedSource,
    };
    pub use crate::application::use_cases::{
        BuildDriverCatalogUseCase, BuildOsCatalogUseCase, PublishCatalogUseCase,
    };
    pub use crate::catalog_generation::domain::{
        Architecture, CatalogSource, CategoryCatalog, DriverPack, Manufacturer, OsImage,
        PackType, UnifiedCatalog,
    };
    pub use crate::catalog_generation::services::{CatalogUnifier, Deduplicator};
    pub use crate::ports::outbound::{
        CatalogFormatter, OsCatalogRepository, OutputWriter, ProductFeed, ProgressReporter,
        ReportFormatter, VendorCatalogRepository,
    };
    pub use crate::shared::Result;
}
