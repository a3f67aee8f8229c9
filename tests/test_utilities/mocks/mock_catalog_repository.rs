use async_trait::async_trait;
use driverpack_catalog::catalog_generation::vendors::{EsdCatalog, RawVendorCatalog};
use driverpack_catalog::prelude::*;
use driverpack_catalog::shared::error::CatalogError;
use std::collections::BTreeMap;

fn unavailable(source_name: &str) -> anyhow::Error {
    CatalogError::SourceUnavailable {
        source_name: source_name.to_string(),
        details: "HTTP 503 Service Unavailable".to_string(),
    }
    .into()
}

/// Mock VendorCatalogRepository serving preloaded raw catalogs
///
/// Vendors without a catalog fail as unavailable; vendors marked malformed
/// fail the way a parser does on a wrong root element.
#[derive(Default)]
pub struct MockVendorRepository {
    catalogs: BTreeMap<Manufacturer, RawVendorCatalog>,
    malformed: Vec<Manufacturer>,
}

impl MockVendorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, catalog: RawVendorCatalog) -> Self {
        self.catalogs.insert(catalog.manufacturer(), catalog);
        self
    }

    pub fn with_malformed(mut self, manufacturer: Manufacturer) -> Self {
        self.malformed.push(manufacturer);
        self
    }
}

#[async_trait]
impl VendorCatalogRepository for MockVendorRepository {
    async fn fetch_catalog(&self, manufacturer: Manufacturer) -> Result<RawVendorCatalog> {
        if self.malformed.contains(&manufacturer) {
            return Err(CatalogError::MalformedInput {
                source_name: manufacturer.to_string(),
                details: "expected root element 'X', found 'html'".to_string(),
            }
            .into());
        }
        self.catalogs
            .get(&manufacturer)
            .cloned()
            .ok_or_else(|| unavailable(manufacturer.as_str()))
    }

    fn catalog_url(&self, manufacturer: Manufacturer) -> String {
        format!("https://catalogs.test/{}", manufacturer.as_str().to_lowercase())
    }
}

/// Mock OsCatalogRepository keyed by feed name
#[derive(Default)]
pub struct MockOsRepository {
    feeds: Vec<(ProductFeed, Option<EsdCatalog>)>,
}

impl MockOsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(mut self, name: &str, catalog: EsdCatalog) -> Self {
        let url = format!("https://products.test/{}.cab", name.replace(' ', ""));
        self.feeds.push((ProductFeed::new(name, url), Some(catalog)));
        self
    }

    pub fn with_failing_feed(mut self, name: &str) -> Self {
        let url = format!("https://products.test/{}.cab", name.replace(' ', ""));
        self.feeds.push((ProductFeed::new(name, url), None));
        self
    }
}

#[async_trait]
impl OsCatalogRepository for MockOsRepository {
    fn product_feeds(&self) -> Vec<ProductFeed> {
        self.feeds.iter().map(|(feed, _)| feed.clone()).collect()
    }

    async fn fetch_products(&self, feed: &ProductFeed) -> Result<EsdCatalog> {
        self.feeds
            .iter()
            .find(|(candidate, _)| candidate == feed)
            .and_then(|(_, catalog)| catalog.clone())
            .ok_or_else(|| unavailable(&feed.name))
    }
}
