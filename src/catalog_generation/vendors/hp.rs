use crate::catalog_generation::domain::{
    Architecture, DriverPack, Manufacturer, ModelRef, OsInfo, PackHashes, PackType,
};
use crate::catalog_generation::normalizers::os_name::WINPE_OS_NAME;
use crate::catalog_generation::normalizers::{
    architecture_from_os_text, clean, file_name_from_url, hp_os_name, infer_format, is_winpe,
    normalize_date, resolve_download_url, windows_family,
};
use crate::catalog_generation::policies::ReleaseIdPolicy;
use std::collections::{HashMap, HashSet};

/// Parsed HP client driver pack catalog plus the optional platform list
#[derive(Debug, Clone, Default)]
pub struct HpCatalog {
    pub softpaqs: Vec<HpSoftPaq>,
    pub mappings: Vec<HpProductOsMapping>,
    pub platforms: Vec<HpPlatform>,
}

/// One row of the SoftPaq table
#[derive(Debug, Clone, Default)]
pub struct HpSoftPaq {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub version: Option<String>,
    pub size: Option<u64>,
    pub date_released: Option<String>,
    pub url: Option<String>,
    pub md5: Option<String>,
    pub sha256: Option<String>,
}

/// One row of the product/OS/system table
#[derive(Debug, Clone, Default)]
pub struct HpProductOsMapping {
    pub softpaq_id: Option<String>,
    pub system_id: Option<String>,
    pub system_name: Option<String>,
    pub os_name: Option<String>,
}

/// Supported releases of one platform, as comma-separated candidate lists
#[derive(Debug, Clone, Default)]
pub struct HpPlatform {
    pub system_ids: Vec<String>,
    pub windows_11_releases: Option<String>,
    pub windows_10_releases: Option<String>,
}

/// Joins SoftPaqs with their mapping rows, one record per SoftPaq.
///
/// Mapping rows are matched case-insensitively by SoftPaq id; rows naming a
/// SoftPaq that is not in the table are ignored.
pub fn normalize_hp(catalog: &HpCatalog) -> Vec<DriverPack> {
    let mut mappings_by_softpaq: HashMap<String, Vec<&HpProductOsMapping>> = HashMap::new();
    for mapping in &catalog.mappings {
        if let Some(key) = clean(mapping.softpaq_id.as_deref()) {
            mappings_by_softpaq
                .entry(key.to_lowercase())
                .or_default()
                .push(mapping);
        }
    }

    let mut seen_softpaqs = HashSet::new();
    catalog
        .softpaqs
        .iter()
        .filter_map(|softpaq| {
            let id = clean(softpaq.id.as_deref())?;
            let key = id.to_lowercase();
            if !seen_softpaqs.insert(key.clone()) {
                return None;
            }
            let mappings = mappings_by_softpaq
                .get(&key)
                .map(Vec::as_slice)
                .unwrap_or_default();
            normalize_softpaq(id, softpaq, mappings, &catalog.platforms)
        })
        .collect()
}

fn normalize_softpaq(
    id: String,
    softpaq: &HpSoftPaq,
    mappings: &[&HpProductOsMapping],
    platforms: &[HpPlatform],
) -> Option<DriverPack> {
    let url = resolve_download_url(softpaq.url.as_deref(), None)?;
    let file_name = file_name_from_url(&url);
    let name = clean(softpaq.name.as_deref());
    let os_text = mappings
        .iter()
        .find_map(|mapping| clean(mapping.os_name.as_deref()));

    let winpe = [name.as_deref(), os_text.as_deref(), softpaq.category.as_deref()]
        .into_iter()
        .flatten()
        .any(is_winpe);

    let architecture = os_text
        .as_deref()
        .map(|text| architecture_from_os_text(text, Architecture::X64))
        .unwrap_or(Architecture::X64);

    let os = if winpe {
        OsInfo {
            name: WINPE_OS_NAME.to_string(),
            release_id: [name.as_deref(), os_text.as_deref()]
                .into_iter()
                .flatten()
                .find_map(ReleaseIdPolicy::winpe_release),
            build: None,
            architecture,
        }
    } else {
        let system_ids: Vec<String> = mappings
            .iter()
            .filter_map(|mapping| clean(mapping.system_id.as_deref()))
            .collect();
        OsInfo {
            name: hp_os_name(os_text.as_deref()),
            release_id: os_text
                .as_deref()
                .and_then(ReleaseIdPolicy::from_text)
                .or_else(|| platform_release(os_text.as_deref(), &system_ids, platforms)),
            build: None,
            architecture,
        }
    };

    DriverPack::builder(Manufacturer::HP)
        .id(id)
        .name(name)
        .version(clean(softpaq.version.as_deref()))
        .file_name(file_name.clone())
        .download_url(url.clone())
        .size_bytes(softpaq.size)
        .format(infer_format(None, file_name.as_deref(), &url))
        .pack_type(if winpe { PackType::WinPE } else { PackType::Win })
        .release_date(normalize_date(softpaq.date_released.as_deref()))
        .models(hp_models(mappings))
        .os(os)
        .hashes(PackHashes {
            md5: clean(softpaq.md5.as_deref()),
            sha256: clean(softpaq.sha256.as_deref()),
            crc: None,
        })
        .build()
        .ok()
}

/// Falls back to the platform list's supported releases for the mapped
/// systems: the list matching the detected major first, else Windows 11,
/// else Windows 10.
fn platform_release(
    os_text: Option<&str>,
    system_ids: &[String],
    platforms: &[HpPlatform],
) -> Option<String> {
    let matching: Vec<&HpPlatform> = platforms
        .iter()
        .filter(|platform| {
            platform.system_ids.iter().any(|platform_id| {
                system_ids
                    .iter()
                    .any(|id| id.eq_ignore_ascii_case(platform_id.trim()))
            })
        })
        .collect();
    if matching.is_empty() {
        return None;
    }

    let win11 = join_candidates(matching.iter().map(|p| p.windows_11_releases.as_deref()));
    let win10 = join_candidates(matching.iter().map(|p| p.windows_10_releases.as_deref()));
    let resolve = |csv: &Option<String>| csv.as_deref().and_then(ReleaseIdPolicy::preferred);

    let detected = match os_text.and_then(windows_family) {
        Some("Windows 11") => resolve(&win11),
        Some("Windows 10") => resolve(&win10),
        _ => None,
    };
    detected.or_else(|| resolve(&win11)).or_else(|| resolve(&win10))
}

fn join_candidates<'a>(lists: impl Iterator<Item = Option<&'a str>>) -> Option<String> {
    let joined: Vec<&str> = lists
        .flatten()
        .flat_map(|csv| csv.split(','))
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .collect();
    if joined.is_empty() {
        None
    } else {
        Some(joined.join(","))
    }
}

fn hp_models(mappings: &[&HpProductOsMapping]) -> Vec<ModelRef> {
    let mut seen = HashSet::new();
    mappings
        .iter()
        .filter_map(|mapping| {
            let system_id = clean(mapping.system_id.as_deref());
            let name = clean(mapping.system_name.as_deref()).or_else(|| system_id.clone())?;
            Some(ModelRef::new(name, system_id))
        })
        .filter(|model| seen.insert(model.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn softpaq(id: &str, name: &str, url: Option<&str>) -> HpSoftPaq {
        HpSoftPaq {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            category: Some("Manageability - Driver Pack".to_string()),
            version: Some("1.00 A 1".to_string()),
            size: Some(900_000_000),
            date_released: Some("2024-05-20".to_string()),
            url: url.map(str::to_string),
            md5: Some("md5hash".to_string()),
            sha256: Some("sha256hash".to_string()),
        }
    }

    fn mapping(softpaq_id: &str, system_id: &str, system_name: &str, os: &str) -> HpProductOsMapping {
        HpProductOsMapping {
            softpaq_id: Some(softpaq_id.to_string()),
            system_id: Some(system_id.to_string()),
            system_name: Some(system_name.to_string()),
            os_name: Some(os.to_string()),
        }
    }

    #[test]
    fn test_softpaq_joined_with_mappings() {
        let catalog = HpCatalog {
            softpaqs: vec![softpaq(
                "sp999",
                "HP EliteBook 840 G8 Driver Pack",
                Some("http://ftp.hp.com/pub/softpaq/sp999.exe"),
            )],
            mappings: vec![
                mapping("SP999", "880D", "HP EliteBook 840 G8", "Windows 11 64-bit, 24H2"),
                mapping("sp999", "880E", "HP EliteBook 850 G8", "Windows 11 64-bit, 24H2"),
                mapping("sp999", "880D", "HP EliteBook 840 G8", "Windows 11 64-bit, 24H2"),
            ],
            platforms: vec![],
        };

        let records = normalize_hp(&catalog);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id(), "sp999");
        assert_eq!(record.download_url(), "https://ftp.hp.com/pub/softpaq/sp999.exe");
        assert_eq!(record.os().name, "Windows 11");
        assert_eq!(record.os().release_id.as_deref(), Some("24H2"));
        assert_eq!(record.os().architecture, Architecture::X64);
        assert_eq!(record.format().as_str(), "exe");
        let models: Vec<&str> = record.models().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(models, vec!["HP EliteBook 840 G8", "HP EliteBook 850 G8"]);
    }

    #[test]
    fn test_mapping_for_unknown_softpaq_is_ignored() {
        let catalog = HpCatalog {
            softpaqs: vec![softpaq("sp1", "Pack", Some("https://ftp.hp.com/sp1.exe"))],
            mappings: vec![mapping("sp2", "1111", "Ghost", "Windows 10 64-bit, 22H2")],
            platforms: vec![],
        };
        let records = normalize_hp(&catalog);
        assert_eq!(records.len(), 1);
        assert!(records[0].models().is_empty());
    }

    #[test]
    fn test_softpaq_without_url_is_dropped() {
        let catalog = HpCatalog {
            softpaqs: vec![softpaq("sp1", "Pack", None)],
            mappings: vec![mapping("sp1", "1111", "Model", "Windows 11 64-bit, 23H2")],
            platforms: vec![],
        };
        assert!(normalize_hp(&catalog).is_empty());
    }

    #[test]
    fn test_platform_list_fallback_prefers_detected_major() {
        let catalog = HpCatalog {
            softpaqs: vec![softpaq("sp2", "Pack", Some("https://ftp.hp.com/sp2.exe"))],
            mappings: vec![mapping("sp2", "8723", "HP ProBook", "Windows 10 64-bit")],
            platforms: vec![HpPlatform {
                system_ids: vec!["8723".to_string()],
                windows_11_releases: Some("23H2,22H2".to_string()),
                windows_10_releases: Some("21H2, 22H2".to_string()),
            }],
        };
        let records = normalize_hp(&catalog);
        assert_eq!(records[0].os().name, "Windows 10");
        assert_eq!(records[0].os().release_id.as_deref(), Some("22H2"));
    }

    #[test]
    fn test_platform_list_half_year_beats_calendar_release() {
        let catalog = HpCatalog {
            softpaqs: vec![softpaq("sp5", "Pack", Some("https://ftp.hp.com/sp5.exe"))],
            mappings: vec![mapping("sp5", "8723", "HP ProBook", "Windows 10 64-bit")],
            platforms: vec![HpPlatform {
                system_ids: vec!["8723".to_string()],
                windows_11_releases: None,
                windows_10_releases: Some("1909,21H2,2004".to_string()),
            }],
        };
        let records = normalize_hp(&catalog);
        assert_eq!(records[0].os().release_id.as_deref(), Some("21H2"));
    }

    #[test]
    fn test_platform_list_fallback_prefers_windows_11_without_major() {
        let catalog = HpCatalog {
            softpaqs: vec![softpaq("sp3", "Pack", Some("https://ftp.hp.com/sp3.exe"))],
            mappings: vec![mapping("sp3", "8723", "HP ProBook", "64-bit")],
            platforms: vec![HpPlatform {
                system_ids: vec!["8723".to_string()],
                windows_11_releases: Some("22H2,23H2".to_string()),
                windows_10_releases: Some("22H2".to_string()),
            }],
        };
        let records = normalize_hp(&catalog);
        assert_eq!(records[0].os().release_id.as_deref(), Some("23H2"));
    }

    #[test]
    fn test_no_platform_for_system_leaves_release_empty() {
        let catalog = HpCatalog {
            softpaqs: vec![softpaq("sp4", "Pack", Some("https://ftp.hp.com/sp4.exe"))],
            mappings: vec![mapping("sp4", "0000", "HP Thing", "Windows 11 64-bit")],
            platforms: vec![HpPlatform {
                system_ids: vec!["8723".to_string()],
                windows_11_releases: Some("23H2".to_string()),
                windows_10_releases: None,
            }],
        };
        assert_eq!(normalize_hp(&catalog)[0].os().release_id, None);
    }

    #[test]
    fn test_winpe_softpaq() {
        let mut pack = softpaq(
            "sp5",
            "HP WinPE 10 Driver Pack",
            Some("https://ftp.hp.com/sp5.exe"),
        );
        pack.category = Some("Manageability - WinPE Driver Pack".to_string());
        let catalog = HpCatalog {
            softpaqs: vec![pack],
            mappings: vec![],
            platforms: vec![],
        };
        let record = &normalize_hp(&catalog)[0];
        assert_eq!(record.pack_type(), PackType::WinPE);
        assert_eq!(record.os().name, "WinPE");
        assert_eq!(record.os().release_id.as_deref(), Some("10"));
    }

    #[test]
    fn test_architecture_from_os_text() {
        let catalog = HpCatalog {
            softpaqs: vec![softpaq("sp6", "Pack", Some("https://ftp.hp.com/sp6.exe"))],
            mappings: vec![mapping("sp6", "1", "HP Arm", "Windows 11 ARM64, 24H2")],
            platforms: vec![],
        };
        assert_eq!(
            normalize_hp(&catalog)[0].os().architecture,
            Architecture::Arm64
        );
    }
}
