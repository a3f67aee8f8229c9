use crate::application::read_models::{
    CatalogMetadataView, CatalogReadModel, DriverPackView, OsCatalogReadModel, OsImageView,
    SourceView,
};
use crate::ports::outbound::CatalogFormatter;
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument<'a, T: Serialize> {
    schema_version: &'a str,
    generated_at_utc: &'a str,
    total_items: usize,
    category: &'a str,
    sources: Vec<Source<'a>>,
    #[serde(flatten)]
    entries: T,
}

#[derive(Debug, Serialize)]
struct DriverPacks<'a> {
    items: Vec<DriverPack<'a>>,
}

#[derive(Debug, Serialize)]
struct Images<'a> {
    images: Vec<OsImage<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Source<'a> {
    manufacturer: &'a str,
    catalog_url: &'a str,
    last_updated: &'a str,
    item_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DriverPack<'a> {
    id: &'a str,
    package_id: &'a str,
    manufacturer: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_name: Option<&'a str>,
    download_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_bytes: Option<u64>,
    format: &'a str,
    #[serde(rename = "type")]
    pack_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    models: Vec<Model<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hashes: Option<Hashes<'a>>,
    os: OsInfo<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Model<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Hashes<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    md5: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha256: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    crc: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OsInfo<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    build: Option<&'a str>,
    architecture: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OsImage<'a> {
    id: &'a str,
    os_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    build: Option<&'a str>,
    architecture: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    language_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    edition: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_name: Option<&'a str>,
    download_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha1: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha256: Option<&'a str>,
}

/// JsonFormatter adapter for the pretty-printed JSON catalog documents
///
/// Field names are camelCase; absent optional fields are omitted.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn document<'a, T: Serialize>(
        metadata: &'a CatalogMetadataView,
        sources: &'a [SourceView],
        entries: T,
    ) -> CatalogDocument<'a, T> {
        CatalogDocument {
            schema_version: &metadata.schema_version,
            generated_at_utc: &metadata.generated_at_utc,
            total_items: metadata.total_items,
            category: &metadata.category,
            sources: sources.iter().map(build_source).collect(),
            entries,
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogFormatter for JsonFormatter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn format_catalog(&self, model: &CatalogReadModel) -> Result<String> {
        let entries = DriverPacks {
            items: model.items.iter().map(build_driver_pack).collect(),
        };
        let document = Self::document(&model.metadata, &model.sources, entries);
        serde_json::to_string_pretty(&document).map_err(Into::into)
    }

    fn format_os_catalog(&self, model: &OsCatalogReadModel) -> Result<String> {
        let entries = Images {
            images: model.images.iter().map(build_os_image).collect(),
        };
        let document = Self::document(&model.metadata, &model.sources, entries);
        serde_json::to_string_pretty(&document).map_err(Into::into)
    }
}

fn build_source(source: &SourceView) -> Source<'_> {
    Source {
        manufacturer: &source.manufacturer,
        catalog_url: &source.catalog_url,
        last_updated: &source.last_updated,
        item_count: source.item_count,
    }
}

fn build_driver_pack(pack: &DriverPackView) -> DriverPack<'_> {
    DriverPack {
        id: &pack.id,
        package_id: &pack.package_id,
        manufacturer: &pack.manufacturer,
        name: pack.name.as_deref(),
        version: pack.version.as_deref(),
        file_name: pack.file_name.as_deref(),
        download_url: &pack.download_url,
        size_bytes: pack.size_bytes,
        format: &pack.format,
        pack_type: &pack.pack_type,
        release_date: pack.release_date.as_deref(),
        models: pack
            .models
            .iter()
            .map(|model| Model {
                name: &model.name,
                system_id: model.system_id.as_deref(),
            })
            .collect(),
        hashes: pack.hashes.as_ref().map(|hashes| Hashes {
            md5: hashes.md5.as_deref(),
            sha256: hashes.sha256.as_deref(),
            crc: hashes.crc.as_deref(),
        }),
        os: OsInfo {
            name: &pack.os.name,
            release_id: pack.os.release_id.as_deref(),
            build: pack.os.build.as_deref(),
            architecture: &pack.os.architecture,
        },
    }
}

fn build_os_image(image: &OsImageView) -> OsImage<'_> {
    OsImage {
        id: &image.id,
        os_name: &image.os_name,
        release_id: image.release_id.as_deref(),
        build: image.build.as_deref(),
        architecture: &image.architecture,
        language_code: image.language_code.as_deref(),
        language: image.language.as_deref(),
        edition: image.edition.as_deref(),
        file_name: image.file_name.as_deref(),
        download_url: &image.download_url,
        size_bytes: image.size_bytes,
        sha1: image.sha1.as_deref(),
        sha256: image.sha256.as_deref(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::{HashesView, ModelView, OsInfoView};

    fn metadata(category: &str, total_items: usize) -> CatalogMetadataView {
        CatalogMetadataView {
            schema_version: "1.0".to_string(),
            generated_at_utc: "2025-01-02T03:04:05Z".to_string(),
            total_items,
            category: category.to_string(),
        }
    }

    fn pack() -> DriverPackView {
        DriverPackView {
            id: "R123|x64".to_string(),
            package_id: "R123".to_string(),
            manufacturer: "Dell".to_string(),
            name: Some("Latitude 7440".to_string()),
            version: None,
            file_name: Some("Latitude-7440.cab".to_string()),
            download_url: "https://downloads.dell.com/Latitude-7440.cab".to_string(),
            size_bytes: Some(42),
            format: "cab".to_string(),
            pack_type: "Win".to_string(),
            release_date: Some("2024-05-01".to_string()),
            models: vec![ModelView {
                name: "Latitude 7440".to_string(),
                system_id: Some("0C0C".to_string()),
            }],
            hashes: Some(HashesView {
                md5: Some("abc".to_string()),
                sha256: None,
                crc: None,
            }),
            os: OsInfoView {
                name: "Windows 11".to_string(),
                release_id: None,
                build: None,
                architecture: "x64".to_string(),
            },
        }
    }

    #[test]
    fn test_format_catalog() {
        let model = CatalogReadModel {
            metadata: metadata("Win", 1),
            sources: vec![SourceView {
                manufacturer: "Dell".to_string(),
                catalog_url: "https://downloads.dell.com/catalog/DriverPackCatalog.cab".to_string(),
                last_updated: "2024-05-01T00:00:00Z".to_string(),
                item_count: 1,
            }],
            items: vec![pack()],
        };
        let json = JsonFormatter::new().format_catalog(&model).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["schemaVersion"], "1.0");
        assert_eq!(value["generatedAtUtc"], "2025-01-02T03:04:05Z");
        assert_eq!(value["totalItems"], 1);
        assert_eq!(value["category"], "Win");
        assert_eq!(value["sources"][0]["itemCount"], 1);

        let item = &value["items"][0];
        assert_eq!(item["packageId"], "R123");
        assert_eq!(item["type"], "Win");
        assert_eq!(item["models"][0]["systemId"], "0C0C");
        assert_eq!(item["hashes"]["md5"], "abc");
        assert!(item["hashes"].get("sha256").is_none());
        assert!(item.get("version").is_none());
        assert_eq!(item["os"]["architecture"], "x64");
        assert!(item["os"].get("releaseId").is_none());
    }

    #[test]
    fn test_format_os_catalog() {
        let model = OsCatalogReadModel {
            metadata: metadata("OS", 1),
            sources: Vec::new(),
            images: vec![OsImageView {
                id: "abc".to_string(),
                os_name: "Windows 11".to_string(),
                release_id: Some("24H2".to_string()),
                build: Some("26100.1742".to_string()),
                architecture: "arm64".to_string(),
                language_code: Some("en-us".to_string()),
                language: None,
                edition: Some("Professional".to_string()),
                file_name: None,
                download_url: "https://dl.test/a.esd".to_string(),
                size_bytes: None,
                sha1: Some("aa".to_string()),
                sha256: None,
            }],
        };
        let json = JsonFormatter::new().format_os_catalog(&model).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["category"], "OS");
        assert_eq!(value["sources"].as_array().unwrap().len(), 0);
        assert_eq!(value["images"][0]["osName"], "Windows 11");
        assert_eq!(value["images"][0]["languageCode"], "en-us");
        assert!(value.get("items").is_none());
    }
}
