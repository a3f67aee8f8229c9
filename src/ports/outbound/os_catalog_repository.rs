use crate::catalog_generation::vendors::EsdCatalog;
use crate::shared::Result;
use async_trait::async_trait;

/// A Media Creation Tool product feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFeed {
    /// Short label, e.g. "Windows 11"
    pub name: String,
    pub url: String,
}

impl ProductFeed {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// OsCatalogRepository port for obtaining Windows ESD file entries
#[async_trait]
pub trait OsCatalogRepository: Send + Sync {
    /// Feeds to read, in processing order
    fn product_feeds(&self) -> Vec<ProductFeed>;

    /// Fetches and parses one `products.xml` feed
    ///
    /// # Errors
    /// Same taxonomy as [`super::VendorCatalogRepository::fetch_catalog`].
    async fn fetch_products(&self, feed: &ProductFeed) -> Result<EsdCatalog>;
}
