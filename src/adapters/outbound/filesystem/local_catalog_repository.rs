use super::FileSystemReader;
use crate::adapters::outbound::archive::{extraction_unavailable, CabExtractor};
use crate::adapters::outbound::network::CatalogEndpoints;
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
use std::path::{Path, PathBuf};

pub const DELL_FILES: [&str; 2] = ["DriverPackCatalog.xml", "DriverPackCatalog.cab"];
pub const HP_FILES: [&str; 2] = [
    "HPClientDriverPackCatalog.xml",
    "HPClientDriverPackCatalog.cab",
];
pub const HP_PLATFORM_FILES: [&str; 2] = ["platformList.xml", "platformList.cab"];
pub const LENOVO_FILES: [&str; 1] = ["catalogv2.xml"];
const SURFACE_PREFIX: &str = "surface-";
const SURFACE_SUFFIX: &str = ".html";

/// LocalCatalogRepository adapter reading previously downloaded feeds
///
/// Offline counterpart of the HTTP repository: every feed is looked up by a
/// fixed file name in the input directory, CAB payloads are unpacked the
/// same way, and the reported catalog URLs stay those of the live feeds so
/// offline and online runs produce identical documents.
pub struct LocalCatalogRepository {
    input_dir: PathBuf,
    reader: FileSystemReader,
    extractor: CabExtractor,
    endpoints: CatalogEndpoints,
}

impl LocalCatalogRepository {
    pub fn new(input_dir: PathBuf, extractor: CabExtractor, endpoints: CatalogEndpoints) -> Self {
        Self {
            input_dir,
            reader: FileSystemReader::new(),
            extractor,
            endpoints,
        }
    }

    /// File name of a products feed, e.g. "Windows 11" -> `products-windows-11`
    pub fn products_stem(feed_name: &str) -> String {
        let slug: String = feed_name
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        format!("products-{}", slug)
    }

    fn locate(&self, source_name: &str, candidates: &[&str]) -> Result<PathBuf> {
        self.reader
            .find_first(&self.input_dir, candidates)
            .ok_or_else(|| {
                CatalogError::SourceUnavailable {
                    source_name: source_name.to_string(),
                    details: format!(
                        "none of {} found in {}",
                        candidates.join(", "),
                        self.input_dir.display()
                    ),
                }
                .into()
            })
    }

    async fn read_manifest(&self, source_name: &str, path: &Path) -> Result<Vec<u8>> {
        let payload = self.reader.read_payload(path).map_err(|e| {
            anyhow::Error::from(CatalogError::SourceUnavailable {
                source_name: source_name.to_string(),
                details: e.to_string().lines().next().unwrap_or_default().to_string(),
            })
        })?;
        self.extractor
            .unpack(payload)
            .await
            .map_err(|e| extraction_unavailable(source_name, e))
    }

    async fn load(&self, source_name: &str, candidates: &[&str]) -> Result<Vec<u8>> {
        let path = self.locate(source_name, candidates)?;
        self.read_manifest(source_name, &path).await
    }

    async fn load_hp(&self) -> Result<RawVendorCatalog> {
        let mut catalog = parse_hp_catalog(&self.load("HP", &HP_FILES).await?)?;

        if let Some(path) = self.reader.find_first(&self.input_dir, &HP_PLATFORM_FILES) {
            match self
                .read_manifest("HP platform list", &path)
                .await
                .and_then(|payload| parse_hp_platforms(&payload))
            {
                Ok(platforms) => catalog.platforms = platforms,
                Err(e) => eprintln!(
                    "⚠️  Warning: HP platform list unreadable, release ids are not backfilled: {}",
                    e.to_string().lines().next().unwrap_or_default()
                ),
            }
        }

        Ok(RawVendorCatalog::HP(catalog))
    }

    /// Configured page ids map to `surface-{id}.html`; without ids every
    /// `surface-*.html` in the directory is read
    fn surface_pages(&self) -> Result<Vec<PathBuf>> {
        if self.endpoints.surface_page_ids.is_empty() {
            return self
                .reader
                .list_matching(&self.input_dir, SURFACE_PREFIX, SURFACE_SUFFIX);
        }
        Ok(self
            .endpoints
            .surface_page_ids
            .iter()
            .map(|id| {
                self.input_dir
                    .join(format!("{}{}{}", SURFACE_PREFIX, id.trim(), SURFACE_SUFFIX))
            })
            .collect())
    }

    fn load_surface(&self) -> Result<RawVendorCatalog> {
        let pages = self.surface_pages()?;
        let mut catalog = SurfaceCatalog::default();
        let mut failures = Vec::new();

        for page in &pages {
            match self
                .reader
                .read_payload(page)
                .and_then(|payload| parse_surface_page(&payload))
            {
                Ok(downloads) => catalog.downloads.extend(downloads),
                Err(e) => failures.push(format!(
                    "{}: {}",
                    page.display(),
                    e.to_string().lines().next().unwrap_or_default()
                )),
            }
        }

        if !pages.is_empty() && failures.len() == pages.len() {
            return Err(CatalogError::SourceUnavailable {
                source_name: "Microsoft".to_string(),
                details: failures.join("; "),
            }
            .into());
        }
        for failure in &failures {
            eprintln!("⚠️  Warning: Skipping Surface page {}", failure);
        }

        Ok(RawVendorCatalog::Microsoft(catalog))
    }
}

#[async_trait]
impl VendorCatalogRepository for LocalCatalogRepository {
    async fn fetch_catalog(&self, manufacturer: Manufacturer) -> Result<RawVendorCatalog> {
        match manufacturer {
            Manufacturer::Dell => {
                let manifest = self.load("Dell", &DELL_FILES).await?;
                Ok(RawVendorCatalog::Dell(parse_dell_catalog(&manifest)?))
            }
            Manufacturer::HP => self.load_hp().await,
            Manufacturer::Lenovo => {
                let manifest = self.load("Lenovo", &LENOVO_FILES).await?;
                Ok(RawVendorCatalog::Lenovo(parse_lenovo_catalog(&manifest)?))
            }
            Manufacturer::Microsoft => self.load_surface(),
        }
    }

    fn catalog_url(&self, manufacturer: Manufacturer) -> String {
        self.endpoints.catalog_url(manufacturer).to_string()
    }
}

#[async_trait]
impl OsCatalogRepository for LocalCatalogRepository {
    fn product_feeds(&self) -> Vec<ProductFeed> {
        self.endpoints.windows_products.clone()
    }

    async fn fetch_products(&self, feed: &ProductFeed) -> Result<EsdCatalog> {
        let stem = Self::products_stem(&feed.name);
        let xml = format!("{}.xml", stem);
        let cab = format!("{}.cab", stem);
        let manifest = self.load(&feed.name, &[xml.as_str(), cab.as_str()]).await?;
        parse_products(&feed.name, &manifest)
    }
}
