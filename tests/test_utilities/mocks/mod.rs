/// Mock implementations for testing
mod mock_catalog_repository;
mod mock_output_writer;
mod mock_progress_reporter;

pub use mock_catalog_repository::{MockOsRepository, MockVendorRepository};
pub use mock_output_writer::MockOutputWriter;
pub use mock_progress_reporter::MockProgressReporter;
