use crate::shared::error::CatalogError;
use crate::shared::security::validate_regular_file;
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// FileSystemReader adapter for reading local payloads
///
/// Every read rejects symbolic links, non-regular files and files above the
/// payload size limit before touching the content.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Reads a payload file with the security checks applied
    pub fn read_payload(&self, path: &Path) -> Result<Vec<u8>> {
        validate_regular_file(path, "input file").map_err(|e| CatalogError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        fs::read(path).map_err(|e| {
            CatalogError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    /// First of `candidates` (file names) that exists in `dir`
    pub fn find_first(&self, dir: &Path, candidates: &[&str]) -> Option<PathBuf> {
        candidates
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Files in `dir` whose name starts with `prefix` and ends with
    /// `suffix` (case-insensitive), sorted by name
    pub fn list_matching(&self, dir: &Path, prefix: &str, suffix: &str) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let prefix = prefix.to_lowercase();
        let suffix = suffix.to_lowercase();
        let mut matches: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .map(str::to_lowercase)
                    .is_some_and(|name| name.starts_with(&prefix) && name.ends_with(&suffix))
            })
            .collect();
        matches.sort();
        Ok(matches)
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_payload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalogv2.xml");
        fs::write(&path, "<ModelList/>").unwrap();

        let payload = FileSystemReader::new().read_payload(&path).unwrap();
        assert_eq!(payload, b"<ModelList/>");
    }

    #[test]
    fn test_read_payload_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = FileSystemReader::new()
            .read_payload(&temp_dir.path().join("missing.xml"))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::FileReadError { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_payload_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.xml");
        let link = temp_dir.path().join("link.xml");
        fs::write(&target, "<a/>").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = FileSystemReader::new().read_payload(&link).unwrap_err();
        assert!(err.to_string().contains("symbolic link"));
    }

    #[test]
    fn test_find_first() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("DriverPackCatalog.cab"), "MSCF").unwrap();

        let reader = FileSystemReader::new();
        let found = reader
            .find_first(temp_dir.path(), &["DriverPackCatalog.xml", "DriverPackCatalog.cab"])
            .unwrap();
        assert!(found.ends_with("DriverPackCatalog.cab"));
        assert!(reader.find_first(temp_dir.path(), &["none.xml"]).is_none());
    }

    #[test]
    fn test_list_matching_sorted() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("surface-2.html"), "").unwrap();
        fs::write(temp_dir.path().join("Surface-1.HTML"), "").unwrap();
        fs::write(temp_dir.path().join("other.html"), "").unwrap();

        let matches = FileSystemReader::new()
            .list_matching(temp_dir.path(), "surface-", ".html")
            .unwrap();
        assert_eq!(matches.len(), 2);
        assert!(matches[0].ends_with("Surface-1.HTML"));
    }
}
