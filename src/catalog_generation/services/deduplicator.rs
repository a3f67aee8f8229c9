use crate::catalog_generation::domain::OsImage;
use std::collections::HashSet;
use std::hash::Hash;

/// Deduplicator - first-wins removal of records sharing a key
///
/// Later records with an already-claimed key are discarded silently.
pub struct Deduplicator;

impl Deduplicator {
    /// Keeps the first item for every key, preserving input order
    pub fn dedupe_by<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
    where
        K: Eq + Hash,
        F: Fn(&T) -> K,
    {
        let mut claimed = HashSet::new();
        items
            .into_iter()
            .filter(|item| claimed.insert(key(item)))
            .collect()
    }

    /// Identity of an OS image: the strongest content hash available,
    /// sha256 before sha1, else the URL and file name together.
    pub fn os_image_key(image: &OsImage) -> String {
        if let Some(sha256) = image.sha256.as_deref().filter(|h| !h.is_empty()) {
            return format!("sha256:{}", sha256.to_lowercase());
        }
        if let Some(sha1) = image.sha1.as_deref().filter(|h| !h.is_empty()) {
            return format!("sha1:{}", sha1.to_lowercase());
        }
        format!(
            "url:{}|{}",
            image.download_url,
            image.file_name.as_deref().unwrap_or_default()
        )
    }

    pub fn dedupe_os_images(images: Vec<OsImage>) -> Vec<OsImage> {
        Self::dedupe_by(images, Self::os_image_key)
    }
}
