use super::{parse_document, parse_size};
use crate::catalog_generation::vendors::{
    DellCatalog, DellDriverPackage, DellModel, DellOperatingSystem,
};
use crate::shared::Result;
use serde::Deserialize;

const ROOT: &str = "DriverPackManifest";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Manifest {
    #[serde(rename = "@baseLocation")]
    base_location: Option<String>,
    #[serde(rename = "DriverPackage")]
    packages: Vec<Package>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Package {
    #[serde(rename = "@releaseID")]
    release_id: Option<String>,
    #[serde(rename = "@version")]
    version: Option<String>,
    #[serde(rename = "@path")]
    path: Option<String>,
    #[serde(rename = "@size")]
    size: Option<String>,
    #[serde(rename = "@type")]
    pack_type: Option<String>,
    #[serde(rename = "@format")]
    format: Option<String>,
    #[serde(rename = "@dateTime")]
    date_time: Option<String>,
    #[serde(rename = "@hashMD5")]
    hash_md5: Option<String>,
    #[serde(rename = "Name")]
    name: Option<Localized>,
    #[serde(rename = "SupportedSystems")]
    systems: Option<SupportedSystems>,
    #[serde(rename = "SupportedOperatingSystems")]
    operating_systems: Option<SupportedOperatingSystems>,
    #[serde(rename = "Cryptography")]
    cryptography: Option<Cryptography>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Localized {
    #[serde(rename = "Display")]
    display: Vec<Display>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Display {
    #[serde(rename = "@lang")]
    lang: Option<String>,
    #[serde(rename = "$text")]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SupportedSystems {
    #[serde(rename = "Brand")]
    brands: Vec<Brand>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Brand {
    #[serde(rename = "Display")]
    display: Vec<Display>,
    #[serde(rename = "Model")]
    models: Vec<Model>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Model {
    #[serde(rename = "@systemID")]
    system_id: Option<String>,
    #[serde(rename = "@name")]
    name: Option<String>,
    #[serde(rename = "Display")]
    display: Vec<Display>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SupportedOperatingSystems {
    #[serde(rename = "OperatingSystem")]
    entries: Vec<OperatingSystem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OperatingSystem {
    #[serde(rename = "@osCode")]
    os_code: Option<String>,
    #[serde(rename = "@osArch")]
    os_arch: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Cryptography {
    #[serde(rename = "Hash")]
    hashes: Vec<Hash>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Hash {
    #[serde(rename = "@algorithm")]
    algorithm: Option<String>,
    #[serde(rename = "$text")]
    value: Option<String>,
}

/// Parses Dell's `DriverPackCatalog.xml`
pub fn parse_dell_catalog(payload: &[u8]) -> Result<DellCatalog> {
    let manifest: Manifest = parse_document("Dell", payload, ROOT)?;
    Ok(DellCatalog {
        base_location: manifest.base_location,
        packages: manifest.packages.into_iter().map(into_raw).collect(),
    })
}

fn into_raw(package: Package) -> DellDriverPackage {
    let hash_sha256 = package.cryptography.as_ref().and_then(|crypto| {
        crypto
            .hashes
            .iter()
            .find(|hash| {
                hash.algorithm
                    .as_deref()
                    .is_some_and(|a| a.eq_ignore_ascii_case("SHA256"))
            })
            .and_then(|hash| hash.value.clone())
    });

    let models = package
        .systems
        .map(|systems| {
            systems
                .brands
                .into_iter()
                .flat_map(|brand| {
                    let brand_name = display_text(&brand.display);
                    brand.models.into_iter().map(move |model| DellModel {
                        brand: brand_name.clone(),
                        name: model.name.clone().or_else(|| display_text(&model.display)),
                        system_id: model.system_id,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    let operating_systems = package
        .operating_systems
        .map(|os| {
            os.entries
                .into_iter()
                .map(|entry| DellOperatingSystem {
                    os_code: entry.os_code,
                    os_arch: entry.os_arch,
                })
                .collect()
        })
        .unwrap_or_default();

    DellDriverPackage {
        release_id: package.release_id,
        name: package.name.as_ref().and_then(|name| display_text(&name.display)),
        version: package.version,
        path: package.path,
        size: parse_size(package.size.as_deref()),
        pack_type: package.pack_type,
        format: package.format,
        date_time: package.date_time,
        hash_md5: package.hash_md5,
        hash_sha256,
        models,
        operating_systems,
    }
}

/// English display text when tagged, else the first one
fn display_text(displays: &[Display]) -> Option<String> {
    displays
        .iter()
        .find(|d| d.lang.as_deref().is_some_and(|l| l.eq_ignore_ascii_case("en")))
        .or_else(|| displays.first())
        .and_then(|d| d.text.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
