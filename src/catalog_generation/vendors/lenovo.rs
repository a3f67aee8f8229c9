use crate::catalog_generation::domain::{
    DriverPack, Manufacturer, ModelRef, OsInfo, PackHashes, PackType,
};
use crate::catalog_generation::normalizers::os_name::WINPE_OS_NAME;
use crate::catalog_generation::normalizers::{
    architecture_from_file_name, clean, content_id, file_name_from_url, infer_format,
    lenovo_os_name, normalize_date, resolve_download_url,
};
use crate::catalog_generation::policies::ReleaseIdPolicy;
use std::collections::HashMap;

/// Parsed Lenovo `ModelList`, flattened to one row per driver pack element
#[derive(Debug, Clone, Default)]
pub struct LenovoCatalog {
    pub packs: Vec<LenovoDriverPack>,
}

#[derive(Debug, Clone, Default)]
pub struct LenovoDriverPack {
    pub model_name: Option<String>,
    pub machine_types: Vec<String>,
    pub os: Option<String>,
    pub os_version: Option<String>,
    pub url: Option<String>,
    pub crc: Option<String>,
    pub date: Option<String>,
    /// Element the row came from: `SCCM` or `WinPE`
    pub kind: Option<String>,
}

impl LenovoDriverPack {
    fn is_winpe(&self) -> bool {
        self.kind
            .as_deref()
            .is_some_and(|kind| kind.trim().eq_ignore_ascii_case("winpe"))
    }
}

/// Collapses rows sharing a download URL into one record whose models list
/// every model and machine type that points at it.
pub fn normalize_lenovo(catalog: &LenovoCatalog) -> Vec<DriverPack> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<&LenovoDriverPack>> = HashMap::new();

    for pack in &catalog.packs {
        let Some(url) = resolve_download_url(pack.url.as_deref(), None) else {
            continue;
        };
        groups
            .entry(url.clone())
            .or_insert_with(|| {
                order.push(url);
                Vec::new()
            })
            .push(pack);
    }

    order
        .into_iter()
        .filter_map(|url| {
            let rows = groups.remove(&url)?;
            normalize_group(url, &rows)
        })
        .collect()
}

fn normalize_group(url: String, rows: &[&LenovoDriverPack]) -> Option<DriverPack> {
    let first = rows.first()?;
    let file_name = file_name_from_url(&url);
    let id = file_name
        .as_deref()
        .map(file_stem)
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| content_id(&[url.as_str()]));
    let winpe = first.is_winpe();
    let os_version = clean(first.os_version.as_deref());
    let architecture = architecture_from_file_name(file_name.as_deref().unwrap_or_default());

    let os = if winpe {
        OsInfo {
            name: WINPE_OS_NAME.to_string(),
            release_id: [os_version.as_deref(), first.os.as_deref()]
                .into_iter()
                .flatten()
                .find_map(ReleaseIdPolicy::winpe_release),
            build: None,
            architecture,
        }
    } else {
        OsInfo {
            name: lenovo_os_name(first.os.as_deref()),
            release_id: os_version
                .as_deref()
                .and_then(ReleaseIdPolicy::from_text)
                .or_else(|| file_name.as_deref().and_then(ReleaseIdPolicy::from_text)),
            build: None,
            architecture,
        }
    };

    DriverPack::builder(Manufacturer::Lenovo)
        .id(id)
        .name(clean(first.model_name.as_deref()))
        .file_name(file_name.clone())
        .download_url(url.clone())
        .format(infer_format(None, file_name.as_deref(), &url))
        .pack_type(if winpe { PackType::WinPE } else { PackType::Win })
        .release_date(normalize_date(first.date.as_deref()))
        .models(lenovo_models(rows))
        .os(os)
        .hashes(PackHashes {
            md5: None,
            sha256: None,
            crc: clean(first.crc.as_deref()),
        })
        .build()
        .ok()
}

fn file_stem(file_name: &str) -> &str {
    file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name)
}

fn lenovo_models(rows: &[&LenovoDriverPack]) -> Vec<ModelRef> {
    let mut models: Vec<ModelRef> = Vec::new();
    for row in rows {
        let Some(name) = clean(row.model_name.as_deref()) else {
            continue;
        };
        let types: Vec<String> = row
            .machine_types
            .iter()
            .filter_map(|t| clean(Some(t.as_str())))
            .collect();
        let candidates = if types.is_empty() {
            vec![ModelRef::new(name, None)]
        } else {
            types
                .into_iter()
                .map(|machine_type| ModelRef::new(name.clone(), Some(machine_type)))
                .collect()
        };
        for candidate in candidates {
            if !models.contains(&candidate) {
                models.push(candidate);
            }
        }
    }
    models
}
