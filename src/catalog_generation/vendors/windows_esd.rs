use crate::catalog_generation::domain::OsImage;
use crate::catalog_generation::normalizers::{
    architecture_from_file_name, clean, content_id, file_name_from_url, normalize_architecture,
    resolve_download_url,
};
use crate::catalog_generation::policies::ReleaseIdPolicy;
use regex::Regex;
use std::sync::LazyLock;

static ESD_BUILD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{5})\.(\d+)").expect("Invalid ESD build regex"));

/// `File` entries of a Media Creation Tool `products.xml`
#[derive(Debug, Clone, Default)]
pub struct EsdCatalog {
    pub files: Vec<EsdFile>,
}

#[derive(Debug, Clone, Default)]
pub struct EsdFile {
    pub file_name: Option<String>,
    pub language_code: Option<String>,
    pub language: Option<String>,
    pub edition: Option<String>,
    pub architecture: Option<String>,
    pub size: Option<u64>,
    pub sha1: Option<String>,
    pub sha256: Option<String>,
    pub file_path: Option<String>,
}

/// Maps ESD file entries to canonical OS images. Entries without a
/// resolvable download URL are skipped.
pub fn normalize_esd(catalog: &EsdCatalog) -> Vec<OsImage> {
    catalog.files.iter().filter_map(normalize_file).collect()
}

fn normalize_file(file: &EsdFile) -> Option<OsImage> {
    let download_url = resolve_download_url(file.file_path.as_deref(), None)?;
    let file_name = clean(file.file_name.as_deref()).or_else(|| file_name_from_url(&download_url));
    let file_text = file_name.as_deref().unwrap_or_default();

    let build = ESD_BUILD.captures(file_text).map(|caps| {
        let major: u32 = caps[1].parse().unwrap_or(0);
        (major, format!("{}.{}", &caps[1], &caps[2]))
    });
    let build_major = build.as_ref().map(|(major, _)| *major);

    let release_id = ReleaseIdPolicy::from_build(build_major)
        .map(str::to_string)
        .or_else(|| ReleaseIdPolicy::from_text(file_text));
    let os_name = ReleaseIdPolicy::family_from_build(build_major.unwrap_or(0)).to_string();
    let architecture = match clean(file.architecture.as_deref()) {
        Some(raw) => normalize_architecture(Some(&raw), architecture_from_file_name(file_text)),
        None => architecture_from_file_name(file_text),
    };

    let language_code = clean(file.language_code.as_deref());
    let edition = clean(file.edition.as_deref());
    let id = content_id(&[
        file_text,
        edition.as_deref().unwrap_or_default(),
        language_code.as_deref().unwrap_or_default(),
        architecture.as_str(),
    ]);

    Some(OsImage {
        id,
        os_name,
        release_id,
        build: build.map(|(_, full)| full),
        architecture,
        language_code,
        language: clean(file.language.as_deref()),
        edition,
        file_name,
        download_url,
        size_bytes: file.size,
        sha1: clean(file.sha1.as_deref()).map(|h| h.to_lowercase()),
        sha256: clean(file.sha256.as_deref()).map(|h| h.to_lowercase()),
    })
}
