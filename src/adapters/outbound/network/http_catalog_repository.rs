use super::{CatalogEndpoints, HttpFetcher};
use crate::adapters::outbound::archive::{extraction_unavailable, CabExtractor};
use crate::adapters::outbound::parsers::{
    parse_dell_catalog, parse_hp_catalog, parse_hp_platforms, parse_lenovo_catalog,
    parse_products, parse_surface_page,
};
use crate::catalog_generation::domain::Manufacturer;
use crate::catalog_generation::vendors::{EsdCatalog, RawVendorCatalog, SurfaceCatalog};
use crate::ports::outbound::{OsCatalogRepository, ProductFeed, VendorCatalogRepository};
use crate::shared::error::CatalogError;
use crate::shared::Result;
use async_trait::async_trait;

/// HttpCatalogRepository adapter fetching vendor feeds over HTTP
///
/// This adapter implements both the VendorCatalogRepository and the
/// OsCatalogRepository ports: it downloads each feed, unpacks CAB payloads
/// and hands the manifest to the matching parser.
pub struct HttpCatalogRepository {
    fetcher: HttpFetcher,
    extractor: CabExtractor,
    endpoints: CatalogEndpoints,
}

impl HttpCatalogRepository {
    pub fn new(fetcher: HttpFetcher, extractor: CabExtractor, endpoints: CatalogEndpoints) -> Self {
        Self {
            fetcher,
            extractor,
            endpoints,
        }
    }

    /// Downloads `url` and unpacks it when it is a cabinet
    async fn fetch_manifest(&self, source_name: &str, url: &str) -> Result<Vec<u8>> {
        let payload = self.fetcher.fetch_bytes(source_name, url).await?;
        self.extractor
            .unpack(payload)
            .await
            .map_err(|e| extraction_unavailable(source_name, e))
    }

    async fn fetch_hp(&self) -> Result<RawVendorCatalog> {
        let manifest = self.fetch_manifest("HP", &self.endpoints.hp).await?;
        let mut catalog = parse_hp_catalog(&manifest)?;

        // The platform list only backfills release ids; the catalog stands without it
        match self
            .fetch_manifest("HP platform list", &self.endpoints.hp_platform_list)
            .await
            .and_then(|payload| parse_hp_platforms(&payload))
        {
            Ok(platforms) => catalog.platforms = platforms,
            Err(e) => eprintln!(
                "⚠️  Warning: HP platform list unavailable, release ids are not backfilled: {}",
                e.to_string().lines().next().unwrap_or_default()
            ),
        }

        Ok(RawVendorCatalog::HP(catalog))
    }

    async fn fetch_surface(&self) -> Result<RawVendorCatalog> {
        let mut catalog = SurfaceCatalog::default();
        let mut failures = Vec::new();

        for page_id in &self.endpoints.surface_page_ids {
            let url = CatalogEndpoints::surface_page_url(page_id);
            let page = self
                .fetcher
                .fetch_bytes("Microsoft", &url)
                .await
                .and_then(|payload| parse_surface_page(&payload));
            match page {
                Ok(downloads) => catalog.downloads.extend(downloads),
                Err(e) => failures.push(format!(
                    "page {}: {}",
                    page_id,
                    e.to_string().lines().next().unwrap_or_default()
                )),
            }
        }

        let total = self.endpoints.surface_page_ids.len();
        if total > 0 && failures.len() == total {
            return Err(CatalogError::SourceUnavailable {
                source_name: "Microsoft".to_string(),
                details: failures.join("; "),
            }
            .into());
        }
        for failure in &failures {
            eprintln!("⚠️  Warning: Skipping Surface {}", failure);
        }

        Ok(RawVendorCatalog::Microsoft(catalog))
    }
}

#[async_trait]
impl VendorCatalogRepository for HttpCatalogRepository {
    async fn fetch_catalog(&self, manufacturer: Manufacturer) -> Result<RawVendorCatalog> {
        match manufacturer {
            Manufacturer::Dell => {
                let manifest = self.fetch_manifest("Dell", &self.endpoints.dell).await?;
                Ok(RawVendorCatalog::Dell(parse_dell_catalog(&manifest)?))
            }
            Manufacturer::HP => self.fetch_hp().await,
            Manufacturer::Lenovo => {
                let manifest = self.fetch_manifest("Lenovo", &self.endpoints.lenovo).await?;
                Ok(RawVendorCatalog::Lenovo(parse_lenovo_catalog(&manifest)?))
            }
            Manufacturer::Microsoft => self.fetch_surface().await,
        }
    }

    fn catalog_url(&self, manufacturer: Manufacturer) -> String {
        self.endpoints.catalog_url(manufacturer).to_string()
    }
}

#[async_trait]
impl OsCatalogRepository for HttpCatalogRepository {
    fn product_feeds(&self) -> Vec<ProductFeed> {
        self.endpoints.windows_products.clone()
    }

    async fn fetch_products(&self, feed: &ProductFeed) -> Result<EsdCatalog> {
        let manifest = self.fetch_manifest(&feed.name, &feed.url).await?;
        parse_products(&feed.name, &manifest)
    }
}
