use crate::catalog_generation::domain::Manufacturer;
use crate::catalog_generation::vendors::RawVendorCatalog;
use crate::shared::Result;
use async_trait::async_trait;

/// VendorCatalogRepository port for obtaining raw vendor record sets
///
/// This port abstracts where a vendor's manifest comes from (the vendor's
/// HTTP endpoint, a local directory for offline runs) and how it is
/// unpacked and parsed. Implementations return raw records only; all
/// normalization happens in the catalog core.
#[async_trait]
pub trait VendorCatalogRepository: Send + Sync {
    /// Fetches and parses the manifest of one vendor
    ///
    /// # Errors
    /// - `CatalogError::SourceUnavailable` when retrieval or extraction failed
    /// - `CatalogError::MalformedInput` when the payload lacks its expected root
    async fn fetch_catalog(&self, manufacturer: Manufacturer) -> Result<RawVendorCatalog>;

    /// Catalog URL reported in the source metadata of `manufacturer`
    fn catalog_url(&self, manufacturer: Manufacturer) -> String;
}
