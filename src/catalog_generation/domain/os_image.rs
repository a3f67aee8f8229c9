use super::driver_pack::Architecture;

/// Canonical Windows ESD image record from the Media Creation Tool feed
#[derive(Debug, Clone, PartialEq)]
pub struct OsImage {
    pub id: String,
    pub os_name: String,
    pub release_id: Option<String>,
    pub build: Option<String>,
    pub architecture: Architecture,
    pub language_code: Option<String>,
    pub language: Option<String>,
    pub edition: Option<String>,
    pub file_name: Option<String>,
    pub download_url: String,
    pub size_bytes: Option<u64>,
    pub sha1: Option<String>,
    pub sha256: Option<String>,
}
