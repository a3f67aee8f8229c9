use crate::catalog_generation::domain::{DriverPack, Manufacturer, ModelRef, OsInfo, PackType};
use crate::catalog_generation::normalizers::os_name::DEFAULT_OS_NAME;
use crate::catalog_generation::normalizers::{
    architecture_from_file_name, clean, content_id, file_name_from_url, infer_format,
    normalize_date, resolve_download_url, windows_family,
};
use crate::catalog_generation::policies::ReleaseIdPolicy;
use regex::Regex;
use std::sync::LazyLock;

static DRIVERS_AND_FIRMWARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+drivers\s+and\s+firmware").expect("Invalid Surface title regex")
});

/// Downloads scraped from Surface driver and firmware pages
#[derive(Debug, Clone, Default)]
pub struct SurfaceCatalog {
    pub downloads: Vec<SurfaceDownload>,
}

/// One downloadable file of a Surface download page
#[derive(Debug, Clone, Default)]
pub struct SurfaceDownload {
    /// Page title, e.g. "Surface Pro 9 Drivers and Firmware"
    pub title: Option<String>,
    pub file_name: Option<String>,
    pub url: Option<String>,
    pub size: Option<u64>,
    pub date_published: Option<String>,
    pub version: Option<String>,
    /// Free-text "supported operating systems" field of the page
    pub supported_os: Option<String>,
}

/// Maps scraped Surface downloads to canonical records.
pub fn normalize_surface(catalog: &SurfaceCatalog) -> Vec<DriverPack> {
    catalog
        .downloads
        .iter()
        .filter_map(normalize_download)
        .collect()
}

fn normalize_download(download: &SurfaceDownload) -> Option<DriverPack> {
    let url = resolve_download_url(download.url.as_deref(), None)?;
    let file_name = clean(download.file_name.as_deref()).or_else(|| file_name_from_url(&url));
    let file_text = file_name.as_deref().unwrap_or_default();
    let id = file_name
        .as_deref()
        .and_then(|name| name.rsplit_once('.').map(|(stem, _)| stem).or(Some(name)))
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| content_id(&[url.as_str()]));
    let title = clean(download.title.as_deref());

    let os = infer_os(file_text, download.supported_os.as_deref());
    let models = title
        .as_deref()
        .map(|t| vec![ModelRef::new(model_name(t), None)])
        .unwrap_or_default();

    DriverPack::builder(Manufacturer::Microsoft)
        .id(id)
        .name(title)
        .version(clean(download.version.as_deref()))
        .file_name(file_name.clone())
        .download_url(url.clone())
        .size_bytes(download.size)
        .format(infer_format(None, file_name.as_deref(), &url))
        .pack_type(PackType::Win)
        .release_date(normalize_date(download.date_published.as_deref()))
        .models(models)
        .os(os)
        .build()
        .ok()
}

/// OS inference cascade for files that carry no structured OS metadata:
///
/// 1. family token in the file name
/// 2. family in the page's supported-OS text
/// 3. five-digit build in the file name, looked up in the build table
/// 4. literal release token in the file name
/// 5. family implied by the build when nothing named one
fn infer_os(file_name: &str, supported_os: Option<&str>) -> OsInfo {
    let mut family = windows_family(file_name);
    if family.is_none() {
        family = supported_os.and_then(windows_family);
    }

    let build = ReleaseIdPolicy::build_token(file_name);
    let mut release_id = ReleaseIdPolicy::from_build(build).map(str::to_string);
    if release_id.is_none() {
        release_id = ReleaseIdPolicy::from_text(file_name);
    }

    if family.is_none() {
        family = build.map(ReleaseIdPolicy::family_from_build);
    }

    OsInfo {
        name: family.unwrap_or(DEFAULT_OS_NAME).to_string(),
        release_id,
        build: build.map(|b| b.to_string()),
        architecture: architecture_from_file_name(file_name),
    }
}

fn model_name(title: &str) -> String {
    match DRIVERS_AND_FIRMWARE.find(title) {
        Some(m) => title[..m.start()].trim().to_string(),
        None => title.to_string(),
    }
}
