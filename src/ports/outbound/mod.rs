/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console, etc.).
pub mod formatter;
pub mod os_catalog_repository;
pub mod output_writer;
pub mod progress_reporter;
pub mod report_formatter;
pub mod vendor_catalog_repository;

pub use formatter::CatalogFormatter;
pub use os_catalog_repository::{OsCatalogRepository, ProductFeed};
pub use output_writer::OutputWriter;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;
pub use vendor_catalog_repository::VendorCatalogRepository;
