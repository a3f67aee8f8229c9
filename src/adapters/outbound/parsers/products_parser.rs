use super::{parse_document, parse_size};
use crate::catalog_generation::vendors::{EsdCatalog, EsdFile};
use crate::shared::Result;
use serde::Deserialize;

const ROOT: &str = "MCT";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Mct {
    #[serde(rename = "Catalogs")]
    catalogs: Option<Catalogs>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Catalogs {
    #[serde(rename = "Catalog")]
    items: Vec<Catalog>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Catalog {
    #[serde(rename = "PublishedMedia")]
    media: Vec<PublishedMedia>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PublishedMedia {
    #[serde(rename = "Files")]
    files: Option<Files>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Files {
    #[serde(rename = "File")]
    items: Vec<File>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct File {
    file_name: Option<String>,
    language_code: Option<String>,
    language: Option<String>,
    edition: Option<String>,
    architecture: Option<String>,
    size: Option<String>,
    sha1: Option<String>,
    sha256: Option<String>,
    file_path: Option<String>,
}

/// Parses a Media Creation Tool `products.xml`
pub fn parse_products(source_name: &str, payload: &[u8]) -> Result<EsdCatalog> {
    let document: Mct = parse_document(source_name, payload, ROOT)?;
    let files = document
        .catalogs
        .map(|catalogs| catalogs.items)
        .unwrap_or_default()
        .into_iter()
        .flat_map(|catalog| catalog.media)
        .filter_map(|media| media.files)
        .flat_map(|files| files.items)
        .map(|file| EsdFile {
            file_name: file.file_name,
            language_code: file.language_code,
            language: file.language,
            edition: file.edition,
            architecture: file.architecture,
            size: parse_size(file.size.as_deref()),
            sha1: file.sha1,
            sha256: file.sha256,
            file_path: file.file_path,
        })
        .collect();

    Ok(EsdCatalog { files })
}
