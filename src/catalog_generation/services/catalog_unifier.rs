use super::Deduplicator;
use crate::catalog_generation::domain::{
    CatalogSource, CategoryCatalog, DriverPack, Manufacturer, OsImage, PackType, UnifiedCatalog,
};
use crate::catalog_generation::normalizers::parse_iso_date;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// CatalogUnifier - merges per-vendor records into the cross-vendor catalogs
///
/// Records are partitioned by category (Win / WinPE), deduplicated by
/// (manufacturer, id) with the first record winning, and sorted by
/// manufacturer, name and id. Per-manufacturer source metadata is computed
/// for every manufacturer that kept at least one record.
pub struct CatalogUnifier;

impl CatalogUnifier {
    /// # Arguments
    /// * `records` - Canonical records of every vendor, in adapter order
    /// * `catalog_urls` - Feed URL reported for each manufacturer's source
    /// * `generated_at` - Run timestamp, used as last-updated fallback
    pub fn unify(
        records: Vec<DriverPack>,
        catalog_urls: &BTreeMap<Manufacturer, String>,
        generated_at: DateTime<Utc>,
    ) -> UnifiedCatalog {
        let (win, winpe): (Vec<DriverPack>, Vec<DriverPack>) = records
            .into_iter()
            .partition(|record| record.pack_type() == PackType::Win);

        UnifiedCatalog {
            generated_at,
            win: Self::build_category(PackType::Win, win, catalog_urls, generated_at),
            winpe: Self::build_category(PackType::WinPE, winpe, catalog_urls, generated_at),
        }
    }

    fn build_category(
        category: PackType,
        records: Vec<DriverPack>,
        catalog_urls: &BTreeMap<Manufacturer, String>,
        generated_at: DateTime<Utc>,
    ) -> CategoryCatalog {
        let mut items = Deduplicator::dedupe_by(records, |record| {
            (record.manufacturer(), record.id().to_string())
        });
        items.sort_by(Self::compare);

        let sources = Self::compute_sources(&items, catalog_urls, generated_at);

        CategoryCatalog {
            category,
            items,
            sources,
        }
    }

    /// Manufacturer, then name (case-insensitive, ordinal on ties), then id
    fn compare(a: &DriverPack, b: &DriverPack) -> Ordering {
        let name_a = a.name().unwrap_or_default();
        let name_b = b.name().unwrap_or_default();
        a.manufacturer()
            .cmp(&b.manufacturer())
            .then_with(|| name_a.to_lowercase().cmp(&name_b.to_lowercase()))
            .then_with(|| name_a.cmp(name_b))
            .then_with(|| a.id().cmp(b.id()))
    }

    fn compute_sources(
        items: &[DriverPack],
        catalog_urls: &BTreeMap<Manufacturer, String>,
        generated_at: DateTime<Utc>,
    ) -> BTreeMap<Manufacturer, CatalogSource> {
        let mut counts: BTreeMap<Manufacturer, (usize, Option<DateTime<Utc>>)> = BTreeMap::new();
        for item in items {
            let entry = counts.entry(item.manufacturer()).or_insert((0, None));
            entry.0 += 1;
            let released = item
                .release_date()
                .and_then(parse_iso_date)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc());
            entry.1 = entry.1.max(released);
        }

        counts
            .into_iter()
            .map(|(manufacturer, (item_count, latest))| {
                let source = CatalogSource::new(
                    manufacturer,
                    catalog_urls.get(&manufacturer).cloned().unwrap_or_default(),
                    latest.unwrap_or(generated_at),
                    item_count,
                );
                (manufacturer, source)
            })
            .collect()
    }

    /// Dedupes OS images by content key and orders them newest build first,
    /// then by architecture, language and edition.
    pub fn order_os_images(images: Vec<OsImage>) -> Vec<OsImage> {
        let mut images = Deduplicator::dedupe_os_images(images);
        images.sort_by(|a, b| {
            build_major(b)
                .cmp(&build_major(a))
                .then_with(|| a.os_name.cmp(&b.os_name))
                .then_with(|| a.architecture.cmp(&b.architecture))
                .then_with(|| a.language_code.cmp(&b.language_code))
                .then_with(|| a.edition.cmp(&b.edition))
                .then_with(|| a.id.cmp(&b.id))
        });
        images
    }
}

fn build_major(image: &OsImage) -> u32 {
    image
        .build
        .as_deref()
        .and_then(|b| b.split('.').next())
        .and_then(|major| major.parse().ok())
        .unwrap_or(0)
}
