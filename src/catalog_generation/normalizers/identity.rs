use sha2::{Digest, Sha256};

/// Hex characters kept from the digest
const CONTENT_ID_LENGTH: usize = 16;

/// Stable identifier for records whose vendor supplies none: the first 16
/// hex characters of SHA-256 over the parts joined with `|`.
pub fn content_id(parts: &[&str]) -> String {
    let digest = Sha256::digest(parts.join("|").as_bytes());
    let mut id = hex::encode(digest);
    id.truncate(CONTENT_ID_LENGTH);
    id
}

/// Trims a vendor string and maps blanks to `None`
pub fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
