use crate::catalog_generation::domain::{Manufacturer, PackType};

/// CatalogRequest - Internal request DTO for the driver pack catalog use case
#[derive(Debug, Clone)]
pub struct CatalogRequest {
    /// Vendors to fetch, in processing order
    pub vendors: Vec<Manufacturer>,
    /// Minimum item count required in the Win category
    pub min_items: usize,
    /// Minimum item count required in the WinPE category
    pub min_winpe_items: usize,
}

impl CatalogRequest {
    pub fn new(vendors: Vec<Manufacturer>, min_items: usize, min_winpe_items: usize) -> Self {
        Self {
            vendors,
            min_items,
            min_winpe_items,
        }
    }

    /// Minimum required for `category`
    pub fn minimum_for(&self, category: PackType) -> usize {
        match category {
            PackType::Win => self.min_items,
            PackType::WinPE => self.min_winpe_items,
        }
    }
}

/// OsCatalogRequest - Internal request DTO for the Windows image use case
#[derive(Debug, Clone)]
pub struct OsCatalogRequest {
    /// Minimum image count required
    pub min_items: usize,
}

impl OsCatalogRequest {
    pub fn new(min_items: usize) -> Self {
        Self { min_items }
    }
}
