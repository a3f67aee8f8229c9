//! Builder for constructing catalog read models from domain objects

use super::catalog_read_model::{
    CatalogMetadataView, CatalogReadModel, OsCatalogReadModel, SCHEMA_VERSION,
};
use super::driver_pack_view::{
    DriverPackView, HashesView, ModelView, OsImageView, OsInfoView, SourceView,
};
use crate::catalog_generation::domain::{CatalogSource, CategoryCatalog, DriverPack, OsImage};
use chrono::{DateTime, SecondsFormat, Utc};

/// Category label of the OS image document
pub const OS_CATEGORY: &str = "OS";

/// CatalogReadModelBuilder transforms unified domain catalogs into the
/// document-shaped read models the formatters consume.
pub struct CatalogReadModelBuilder;

impl CatalogReadModelBuilder {
    /// Builds the document of one driver pack category
    pub fn build(catalog: &CategoryCatalog, generated_at: DateTime<Utc>) -> CatalogReadModel {
        CatalogReadModel {
            metadata: Self::metadata(
                catalog.category.as_str(),
                catalog.total_items(),
                generated_at,
            ),
            sources: catalog
                .sources
                .values()
                .filter(|source| source.item_count() > 0)
                .map(Self::source_view)
                .collect(),
            items: catalog.items.iter().map(Self::driver_pack_view).collect(),
        }
    }

    /// Builds the Windows ESD image document
    pub fn build_os(
        images: &[OsImage],
        sources: &[CatalogSource],
        generated_at: DateTime<Utc>,
    ) -> OsCatalogReadModel {
        OsCatalogReadModel {
            metadata: Self::metadata(OS_CATEGORY, images.len(), generated_at),
            sources: sources
                .iter()
                .filter(|source| source.item_count() > 0)
                .map(Self::source_view)
                .collect(),
            images: images.iter().map(Self::os_image_view).collect(),
        }
    }

    fn metadata(category: &str, total_items: usize, generated_at: DateTime<Utc>) -> CatalogMetadataView {
        CatalogMetadataView {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at_utc: timestamp(generated_at),
            total_items,
            category: category.to_string(),
        }
    }

    fn source_view(source: &CatalogSource) -> SourceView {
        SourceView {
            manufacturer: source.manufacturer().to_string(),
            catalog_url: source.catalog_url().to_string(),
            last_updated: timestamp(source.last_updated()),
            item_count: source.item_count(),
        }
    }

    fn driver_pack_view(pack: &DriverPack) -> DriverPackView {
        let hashes = pack.hashes();
        DriverPackView {
            id: pack.id().to_string(),
            package_id: pack.package_id().to_string(),
            manufacturer: pack.manufacturer().to_string(),
            name: pack.name().map(str::to_string),
            version: pack.version().map(str::to_string),
            file_name: pack.file_name().map(str::to_string),
            download_url: pack.download_url().to_string(),
            size_bytes: pack.size_bytes(),
            format: pack.format().to_string(),
            pack_type: pack.pack_type().to_string(),
            release_date: pack.release_date().map(str::to_string),
            models: pack
                .models()
                .iter()
                .map(|model| ModelView {
                    name: model.name.clone(),
                    system_id: model.system_id.clone(),
                })
                .collect(),
            hashes: (!hashes.is_empty()).then(|| HashesView {
                md5: hashes.md5.clone(),
                sha256: hashes.sha256.clone(),
                crc: hashes.crc.clone(),
            }),
            os: OsInfoView {
                name: pack.os().name.clone(),
                release_id: pack.os().release_id.clone(),
                build: pack.os().build.clone(),
                architecture: pack.os().architecture.to_string(),
            },
        }
    }

    fn os_image_view(image: &OsImage) -> OsImageView {
        OsImageView {
            id: image.id.clone(),
            os_name: image.os_name.clone(),
            release_id: image.release_id.clone(),
            build: image.build.clone(),
            architecture: image.architecture.to_string(),
            language_code: image.language_code.clone(),
            language: image.language.clone(),
            edition: image.edition.clone(),
            file_name: image.file_name.clone(),
            download_url: image.download_url.clone(),
            size_bytes: image.size_bytes,
            sha1: image.sha1.clone(),
            sha256: image.sha256.clone(),
        }
    }
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}
