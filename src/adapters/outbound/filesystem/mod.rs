/// Filesystem adapters for file I/O operations
mod file_reader;
mod file_writer;
mod local_catalog_repository;

pub use file_reader::FileSystemReader;
pub use file_writer::FileSystemWriter;
pub use local_catalog_repository::LocalCatalogRepository;
