use super::{parse_document, parse_size};
use crate::catalog_generation::vendors::{HpCatalog, HpPlatform, HpProductOsMapping, HpSoftPaq};
use crate::shared::Result;
use serde::Deserialize;

const CATALOG_ROOT: &str = "NewDataSet";
const PLATFORM_ROOT: &str = "ImagePal";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NewDataSet {
    #[serde(rename = "HPClientDriverPackCatalog")]
    catalog: Option<DriverPackCatalog>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DriverPackCatalog {
    #[serde(rename = "SoftPaqList")]
    softpaqs: Option<SoftPaqList>,
    #[serde(rename = "ProductOSDriverPackList")]
    mappings: Option<MappingList>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SoftPaqList {
    #[serde(rename = "SoftPaq")]
    items: Vec<SoftPaq>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct SoftPaq {
    id: Option<String>,
    name: Option<String>,
    version: Option<String>,
    category: Option<String>,
    date_released: Option<String>,
    url: Option<String>,
    size: Option<String>,
    #[serde(rename = "MD5")]
    md5: Option<String>,
    #[serde(rename = "SHA256")]
    sha256: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MappingList {
    #[serde(rename = "ProductOSDriverPack")]
    items: Vec<Mapping>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Mapping {
    #[serde(rename = "SystemId")]
    system_id: Option<String>,
    #[serde(rename = "SystemName")]
    system_name: Option<String>,
    #[serde(rename = "OSName")]
    os_name: Option<String>,
    #[serde(rename = "SoftPaqId")]
    softpaq_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImagePal {
    #[serde(rename = "Platform")]
    platforms: Vec<Platform>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Platform {
    #[serde(rename = "SystemID")]
    system_id: Option<String>,
    #[serde(rename = "OS")]
    os: Vec<PlatformOs>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PlatformOs {
    #[serde(rename = "OSDescription")]
    description: Option<String>,
    #[serde(rename = "OSReleaseIdFileName")]
    release_id_file_name: Option<String>,
    #[serde(rename = "OSReleaseId")]
    release_id: Option<String>,
}

/// Parses `HPClientDriverPackCatalog.xml`. The platform list is fetched
/// separately, see [`parse_hp_platforms`].
pub fn parse_hp_catalog(payload: &[u8]) -> Result<HpCatalog> {
    let document: NewDataSet = parse_document("HP", payload, CATALOG_ROOT)?;
    let catalog = document.catalog.unwrap_or_default();

    let softpaqs = catalog
        .softpaqs
        .map(|list| list.items)
        .unwrap_or_default()
        .into_iter()
        .map(|sp| HpSoftPaq {
            id: sp.id,
            name: sp.name,
            category: sp.category,
            version: sp.version,
            size: parse_size(sp.size.as_deref()),
            date_released: sp.date_released,
            url: sp.url,
            md5: sp.md5,
            sha256: sp.sha256,
        })
        .collect();

    let mappings = catalog
        .mappings
        .map(|list| list.items)
        .unwrap_or_default()
        .into_iter()
        .map(|m| HpProductOsMapping {
            softpaq_id: m.softpaq_id,
            system_id: m.system_id,
            system_name: m.system_name,
            os_name: m.os_name,
        })
        .collect();

    Ok(HpCatalog {
        softpaqs,
        mappings,
        platforms: Vec::new(),
    })
}

/// Parses `platformList.xml` into per-platform release candidate lists
pub fn parse_hp_platforms(payload: &[u8]) -> Result<Vec<HpPlatform>> {
    let document: ImagePal = parse_document("HP platform list", payload, PLATFORM_ROOT)?;
    Ok(document
        .platforms
        .into_iter()
        .map(|platform| {
            let system_ids = platform
                .system_id
                .as_deref()
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect();
            HpPlatform {
                system_ids,
                windows_11_releases: releases_for(&platform.os, "11"),
                windows_10_releases: releases_for(&platform.os, "10"),
            }
        })
        .collect())
}

/// Comma-joined release ids of the OS entries describing `Windows {major}`
fn releases_for(entries: &[PlatformOs], major: &str) -> Option<String> {
    let family = format!("windows {}", major);
    let releases: Vec<&str> = entries
        .iter()
        .filter(|os| {
            os.description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&family))
        })
        .filter_map(|os| {
            os.release_id_file_name
                .as_deref()
                .or(os.release_id.as_deref())
                .map(str::trim)
                .filter(|r| !r.is_empty())
        })
        .collect();
    (!releases.is_empty()).then(|| releases.join(","))
}
