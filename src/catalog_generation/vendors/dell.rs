use crate::catalog_generation::domain::{
    Architecture, DriverPack, Manufacturer, ModelRef, OsInfo, PackHashes, PackType,
};
use crate::catalog_generation::normalizers::os_name::WINPE_OS_NAME;
use crate::catalog_generation::normalizers::{
    clean, content_id, dell_os_name, file_name_from_url, infer_format, is_winpe,
    normalize_architecture, normalize_date, resolve_download_url,
};
use crate::catalog_generation::policies::ReleaseIdPolicy;
use std::collections::HashSet;

/// Parsed `DriverPackManifest`
#[derive(Debug, Clone, Default)]
pub struct DellCatalog {
    /// Host or URL that relative package paths are joined onto
    pub base_location: Option<String>,
    pub packages: Vec<DellDriverPackage>,
}

/// One `DriverPackage` element
#[derive(Debug, Clone, Default)]
pub struct DellDriverPackage {
    pub release_id: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub path: Option<String>,
    pub size: Option<u64>,
    pub pack_type: Option<String>,
    pub format: Option<String>,
    pub date_time: Option<String>,
    pub hash_md5: Option<String>,
    pub hash_sha256: Option<String>,
    pub models: Vec<DellModel>,
    pub operating_systems: Vec<DellOperatingSystem>,
}

#[derive(Debug, Clone, Default)]
pub struct DellModel {
    pub brand: Option<String>,
    pub name: Option<String>,
    pub system_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DellOperatingSystem {
    pub os_code: Option<String>,
    pub os_arch: Option<String>,
}

/// Maps the Dell manifest to canonical records, one per supported OS entry.
///
/// Ids of multi-OS packages become `{id}|{arch}`, and `{id}|{arch}|{n}`
/// (n from 2) when that is already taken by a record emitted earlier.
pub fn normalize_dell(catalog: &DellCatalog) -> Vec<DriverPack> {
    let mut emitted: HashSet<String> = HashSet::new();
    let mut records = Vec::new();

    for package in &catalog.packages {
        let Some(url) =
            resolve_download_url(package.path.as_deref(), catalog.base_location.as_deref())
        else {
            continue;
        };
        let file_name = file_name_from_url(&url);
        let base_id = clean(package.release_id.as_deref()).unwrap_or_else(|| {
            content_id(&[url.as_str(), file_name.as_deref().unwrap_or_default()])
        });
        let models = dell_models(&package.models);
        let name = clean(package.name.as_deref()).or_else(|| joined_model_names(&models));

        let fallback_os = [DellOperatingSystem::default()];
        let operating_systems = if package.operating_systems.is_empty() {
            &fallback_os[..]
        } else {
            &package.operating_systems[..]
        };
        let fan_out = operating_systems.len() > 1;

        for os_entry in operating_systems {
            let os_code = clean(os_entry.os_code.as_deref());
            let architecture = normalize_architecture(os_entry.os_arch.as_deref(), Architecture::X64);
            let winpe = package.pack_type.as_deref().is_some_and(is_winpe)
                || os_code.as_deref().is_some_and(is_winpe);

            let id = if fan_out {
                disambiguate(&base_id, architecture, &emitted)
            } else {
                base_id.clone()
            };

            let os = if winpe {
                OsInfo {
                    name: WINPE_OS_NAME.to_string(),
                    release_id: os_code
                        .as_deref()
                        .and_then(ReleaseIdPolicy::winpe_release)
                        .or_else(|| name.as_deref().and_then(ReleaseIdPolicy::winpe_release)),
                    build: None,
                    architecture,
                }
            } else {
                OsInfo {
                    name: dell_os_name(os_code.as_deref()),
                    release_id: os_code.as_deref().and_then(ReleaseIdPolicy::from_text),
                    build: None,
                    architecture,
                }
            };

            let built = DriverPack::builder(Manufacturer::Dell)
                .id(id.clone())
                .package_id(base_id.clone())
                .name(name.clone())
                .version(clean(package.version.as_deref()))
                .file_name(file_name.clone())
                .download_url(url.clone())
                .size_bytes(package.size)
                .format(infer_format(
                    package.format.as_deref(),
                    file_name.as_deref(),
                    &url,
                ))
                .pack_type(if winpe { PackType::WinPE } else { PackType::Win })
                .release_date(normalize_date(package.date_time.as_deref()))
                .models(models.clone())
                .os(os)
                .hashes(PackHashes {
                    md5: clean(package.hash_md5.as_deref()),
                    sha256: clean(package.hash_sha256.as_deref()),
                    crc: None,
                })
                .build();

            if let Ok(record) = built {
                emitted.insert(id);
                records.push(record);
            }
        }
    }

    records
}

fn disambiguate(base_id: &str, architecture: Architecture, emitted: &HashSet<String>) -> String {
    let candidate = format!("{}|{}", base_id, architecture);
    if !emitted.contains(&candidate) {
        return candidate;
    }
    let mut n = 2;
    loop {
        let sequenced = format!("{}|{}", candidate, n);
        if !emitted.contains(&sequenced) {
            return sequenced;
        }
        n += 1;
    }
}

fn dell_models(models: &[DellModel]) -> Vec<ModelRef> {
    let mut seen = HashSet::new();
    models
        .iter()
        .filter_map(|model| {
            let name = match (clean(model.brand.as_deref()), clean(model.name.as_deref())) {
                (Some(brand), Some(name)) => format!("{} {}", brand, name),
                (None, Some(name)) => name,
                (Some(brand), None) => brand,
                (None, None) => return None,
            };
            Some(ModelRef::new(name, clean(model.system_id.as_deref())))
        })
        .filter(|model| seen.insert(model.clone()))
        .collect()
}

fn joined_model_names(models: &[ModelRef]) -> Option<String> {
    if models.is_empty() {
        return None;
    }
    Some(
        models
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(code: &str, arch: &str) -> DellOperatingSystem {
        DellOperatingSystem {
            os_code: Some(code.to_string()),
            os_arch: Some(arch.to_string()),
        }
    }

    fn latitude_package(operating_systems: Vec<DellOperatingSystem>) -> DellDriverPackage {
        DellDriverPackage {
            release_id: Some("R123".to_string()),
            name: Some("Latitude 5420 Driver Pack".to_string()),
            version: Some("A10".to_string()),
            path: Some("FOLDER0123/1/Latitude-5420-A10.CAB".to_string()),
            size: Some(1_048_576),
            pack_type: Some("win".to_string()),
            format: None,
            date_time: Some("2024-03-01T10:00:00-05:00".to_string()),
            hash_md5: Some("abc".to_string()),
            hash_sha256: None,
            models: vec![DellModel {
                brand: Some("Latitude".to_string()),
                name: Some("5420".to_string()),
                system_id: Some("0A1F".to_string()),
            }],
            operating_systems,
        }
    }

    fn catalog(packages: Vec<DellDriverPackage>) -> DellCatalog {
        DellCatalog {
            base_location: Some("downloads.dell.com".to_string()),
            packages,
        }
    }

    #[test]
    fn test_two_os_entries_fan_out() {
        let records = normalize_dell(&catalog(vec![latitude_package(vec![
            os("Windows10", "x64"),
            os("Windows11", "x64"),
        ])]));

        assert_eq!(records.len(), 2);
        assert_ne!(records[0].id(), records[1].id());
        assert_eq!(records[0].id(), "R123|x64");
        assert_eq!(records[1].id(), "R123|x64|2");
        assert!(records.iter().all(|r| r.package_id() == "R123"));
        assert_eq!(records[0].os().name, "Windows 10");
        assert_eq!(records[1].os().name, "Windows 11");
    }

    #[test]
    fn test_single_os_keeps_release_id() {
        let records = normalize_dell(&catalog(vec![latitude_package(vec![os(
            "Windows11", "x64",
        )])]));

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id(), "R123");
        assert_eq!(
            record.download_url(),
            "https://downloads.dell.com/FOLDER0123/1/Latitude-5420-A10.CAB"
        );
        assert_eq!(record.file_name(), Some("Latitude-5420-A10.CAB"));
        assert_eq!(record.format().as_str(), "cab");
        assert_eq!(record.release_date(), Some("2024-03-01"));
        assert_eq!(record.models()[0].name, "Latitude 5420");
        assert_eq!(record.models()[0].system_id.as_deref(), Some("0A1F"));
        assert_eq!(record.hashes().md5.as_deref(), Some("abc"));
    }

    #[test]
    fn test_distinct_architectures_do_not_need_sequence() {
        let records = normalize_dell(&catalog(vec![latitude_package(vec![
            os("Windows10", "x86"),
            os("Windows10", "x64"),
        ])]));

        let ids: Vec<&str> = records.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["R123|x86", "R123|x64"]);
        assert_eq!(records[0].os().architecture, Architecture::X86);
    }

    #[test]
    fn test_collision_with_earlier_package_gets_next_sequence() {
        let records = normalize_dell(&catalog(vec![
            latitude_package(vec![os("Windows10", "x64"), os("Windows11", "x64")]),
            latitude_package(vec![os("Windows10", "x64"), os("Windows11", "x64")]),
        ]));

        let ids: Vec<&str> = records.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["R123|x64", "R123|x64|2", "R123|x64|3", "R123|x64|4"]);
    }

    #[test]
    fn test_release_id_from_os_code() {
        let records = normalize_dell(&catalog(vec![latitude_package(vec![os(
            "Windows10-22H2",
            "x64",
        )])]));
        assert_eq!(records[0].os().release_id.as_deref(), Some("22H2"));
    }

    #[test]
    fn test_package_without_path_is_dropped() {
        let mut package = latitude_package(vec![os("Windows11", "x64")]);
        package.path = None;
        assert!(normalize_dell(&catalog(vec![package])).is_empty());
    }

    #[test]
    fn test_relative_path_without_base_is_dropped() {
        let records = normalize_dell(&DellCatalog {
            base_location: None,
            packages: vec![latitude_package(vec![os("Windows11", "x64")])],
        });
        assert!(records.is_empty());
    }

    #[test]
    fn test_winpe_package() {
        let mut package = latitude_package(vec![os("WinPE10.0", "x64")]);
        package.pack_type = Some("winpe".to_string());
        package.name = Some("WinPE 10 Driver Pack".to_string());

        let records = normalize_dell(&catalog(vec![package]));
        let record = &records[0];
        assert_eq!(record.pack_type(), PackType::WinPE);
        assert_eq!(record.os().name, "WinPE");
        assert_eq!(record.os().release_id.as_deref(), Some("10"));
    }

    #[test]
    fn test_no_os_entries_emits_default_os() {
        let records = normalize_dell(&catalog(vec![latitude_package(vec![])]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), "R123");
        assert_eq!(records[0].os().name, "Windows");
        assert_eq!(records[0].os().architecture, Architecture::X64);
    }

    #[test]
    fn test_missing_release_id_falls_back_to_content_hash() {
        let mut package = latitude_package(vec![os("Windows11", "x64")]);
        package.release_id = None;
        let records = normalize_dell(&catalog(vec![package]));
        assert_eq!(records[0].id().len(), 16);
        assert_eq!(records[0].id(), records[0].package_id());
    }

    #[test]
    fn test_name_falls_back_to_models() {
        let mut package = latitude_package(vec![os("Windows11", "x64")]);
        package.name = None;
        let records = normalize_dell(&catalog(vec![package]));
        assert_eq!(records[0].name(), Some("Latitude 5420"));
    }
}
