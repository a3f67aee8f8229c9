/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod catalog_request;
mod catalog_response;
mod output_format;

pub use catalog_request::{CatalogRequest, OsCatalogRequest};
pub use catalog_response::{
    CatalogResponse, OsCatalogResponse, PublishResponse, SkippedSource,
};
pub use output_format::OutputFormat;
