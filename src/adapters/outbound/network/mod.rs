/// Network adapters for vendor feeds
mod catalog_endpoints;
mod http_catalog_repository;
mod http_fetcher;

pub use catalog_endpoints::{
    CatalogEndpoints, DELL_CATALOG_URL, HP_CATALOG_URL, HP_PLATFORM_LIST_URL, LENOVO_CATALOG_URL,
    SURFACE_CATALOG_URL, WINDOWS_10_PRODUCTS_URL, WINDOWS_11_PRODUCTS_URL,
};
pub use http_catalog_repository::HttpCatalogRepository;
pub use http_fetcher::{HttpFetcher, HttpSettings};
