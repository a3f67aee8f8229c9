use super::driver_pack::{DriverPack, Manufacturer, PackType};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Per-manufacturer metadata for one catalog category
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSource {
    manufacturer: Manufacturer,
    catalog_url: String,
    last_updated: DateTime<Utc>,
    item_count: usize,
}

impl CatalogSource {
    pub fn new(
        manufacturer: Manufacturer,
        catalog_url: String,
        last_updated: DateTime<Utc>,
        item_count: usize,
    ) -> Self {
        Self {
            manufacturer,
            catalog_url,
            last_updated,
            item_count,
        }
    }

    pub fn manufacturer(&self) -> Manufacturer {
        self.manufacturer
    }

    pub fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }
}

/// Sorted, deduplicated records of a single category plus their sources
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    pub category: PackType,
    pub items: Vec<DriverPack>,
    pub sources: BTreeMap<Manufacturer, CatalogSource>,
}

impl CategoryCatalog {
    pub fn total_items(&self) -> usize {
        self.items.len()
    }
}

/// Result of one unification run
#[derive(Debug, Clone)]
pub struct UnifiedCatalog {
    pub generated_at: DateTime<Utc>,
    pub win: CategoryCatalog,
    pub winpe: CategoryCatalog,
}

impl UnifiedCatalog {
    pub fn category(&self, category: PackType) -> &CategoryCatalog {
        match category {
            PackType::Win => &self.win,
            PackType::WinPE => &self.winpe,
        }
    }

    pub fn categories(&self) -> [&CategoryCatalog; 2] {
        [&self.win, &self.winpe]
    }
}
