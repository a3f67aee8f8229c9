//! Flattened views of canonical records, ready for serialization.

/// View representation of one driver pack
#[derive(Debug, Clone, PartialEq)]
pub struct DriverPackView {
    pub id: String,
    pub package_id: String,
    pub manufacturer: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub file_name: Option<String>,
    pub download_url: String,
    pub size_bytes: Option<u64>,
    pub format: String,
    pub pack_type: String,
    /// `yyyy-MM-dd`
    pub release_date: Option<String>,
    pub models: Vec<ModelView>,
    /// Present only when the vendor published at least one hash
    pub hashes: Option<HashesView>,
    pub os: OsInfoView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelView {
    pub name: String,
    pub system_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HashesView {
    pub md5: Option<String>,
    pub sha256: Option<String>,
    pub crc: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OsInfoView {
    pub name: String,
    pub release_id: Option<String>,
    pub build: Option<String>,
    pub architecture: String,
}

/// View representation of one manufacturer's source metadata
#[derive(Debug, Clone, PartialEq)]
pub struct SourceView {
    pub manufacturer: String,
    pub catalog_url: String,
    /// RFC 3339, UTC
    pub last_updated: String,
    pub item_count: usize,
}

/// View representation of one Windows ESD image
#[derive(Debug, Clone, PartialEq)]
pub struct OsImageView {
    pub id: String,
    pub os_name: String,
    pub release_id: Option<String>,
    pub build: Option<String>,
    pub architecture: String,
    pub language_code: Option<String>,
    pub language: Option<String>,
    pub edition: Option<String>,
    pub file_name: Option<String>,
    pub download_url: String,
    pub size_bytes: Option<u64>,
    pub sha1: Option<String>,
    pub sha256: Option<String>,
}
