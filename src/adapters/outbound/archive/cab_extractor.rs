use crate::shared::error::CatalogError;
use crate::shared::security::validate_regular_file;
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Leading bytes of every Microsoft cabinet file
pub const CAB_SIGNATURE: &[u8] = b"MSCF";

/// External program used to unpack cabinets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractTool {
    /// `expand.exe`, shipped with Windows
    Expand,
    /// `cabextract`, packaged for Linux and macOS
    Cabextract,
}

impl ExtractTool {
    /// Tool available on the current platform
    pub fn for_platform() -> Self {
        if cfg!(windows) {
            ExtractTool::Expand
        } else {
            ExtractTool::Cabextract
        }
    }

    fn program(self) -> &'static str {
        match self {
            ExtractTool::Expand => "expand",
            ExtractTool::Cabextract => "cabextract",
        }
    }

    fn args(self, archive: &Path, output_dir: &Path) -> Vec<String> {
        let archive = archive.display().to_string();
        let output_dir = output_dir.display().to_string();
        match self {
            ExtractTool::Expand => vec![archive, "-F:*".to_string(), output_dir],
            ExtractTool::Cabextract => vec!["-q".to_string(), "-d".to_string(), output_dir, archive],
        }
    }
}

/// CabExtractor unpacks CAB payloads into the XML manifest they carry
///
/// Payloads without the `MSCF` signature are passed through untouched, so
/// callers can hand it anything a vendor endpoint returns. Extraction runs
/// in a temporary directory that is removed afterwards.
pub struct CabExtractor {
    tool: ExtractTool,
}

impl CabExtractor {
    pub fn new() -> Self {
        Self::with_tool(ExtractTool::for_platform())
    }

    pub fn with_tool(tool: ExtractTool) -> Self {
        Self { tool }
    }

    pub fn is_cab(payload: &[u8]) -> bool {
        payload.starts_with(CAB_SIGNATURE)
    }

    /// Returns the first XML file inside `payload`, or `payload` itself
    /// when it is not a cabinet.
    ///
    /// # Errors
    /// `CatalogError::ExtractionFailed` when the tool is missing, fails, or
    /// the cabinet holds no XML file.
    pub async fn unpack(&self, payload: Vec<u8>) -> Result<Vec<u8>> {
        if !Self::is_cab(&payload) {
            return Ok(payload);
        }

        let work_dir = tempfile::TempDir::new()?;
        let archive = work_dir.path().join("payload.cab");
        let output_dir = work_dir.path().join("extracted");
        fs::write(&archive, &payload)?;
        fs::create_dir(&output_dir)?;

        let output = Command::new(self.tool.program())
            .args(self.tool.args(&archive, &output_dir))
            .output()
            .await
            .map_err(|e| extraction_failed(&archive, format!("{}: {}", self.tool.program(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(extraction_failed(
                &archive,
                format!("{} exited with {}: {}", self.tool.program(), output.status, stderr.trim()),
            ));
        }

        let manifest = first_xml_file(&output_dir)?
            .ok_or_else(|| extraction_failed(&archive, "archive contains no XML file".to_string()))?;
        validate_regular_file(&manifest, "extracted manifest")?;
        Ok(fs::read(&manifest)?)
    }
}

impl Default for CabExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-labels an extraction failure as the source being unavailable, which
/// is how repositories report it.
pub fn extraction_unavailable(source_name: &str, error: anyhow::Error) -> anyhow::Error {
    match error.downcast::<CatalogError>() {
        Ok(CatalogError::ExtractionFailed { details, .. }) => CatalogError::SourceUnavailable {
            source_name: source_name.to_string(),
            details: format!("archive extraction failed: {}", details),
        }
        .into(),
        Ok(other) => other.into(),
        Err(other) => other,
    }
}

fn first_xml_file(dir: &Path) -> Result<Option<PathBuf>> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
        })
        .collect();
    candidates.sort();
    Ok(candidates.into_iter().next())
}

fn extraction_failed(path: &Path, details: String) -> anyhow::Error {
    CatalogError::ExtractionFailed {
        path: path.to_path_buf(),
        details,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_cab() {
        assert!(CabExtractor::is_cab(b"MSCF\0\0\0\0rest"));
        assert!(!CabExtractor::is_cab(b"<?xml version=\"1.0\"?>"));
        assert!(!CabExtractor::is_cab(b""));
    }

    #[test]
    fn test_tool_arguments() {
        let archive = Path::new("/tmp/a.cab");
        let out = Path::new("/tmp/out");
        assert_eq!(
            ExtractTool::Cabextract.args(archive, out),
            vec!["-q", "-d", "/tmp/out", "/tmp/a.cab"]
        );
        assert_eq!(
            ExtractTool::Expand.args(archive, out),
            vec!["/tmp/a.cab", "-F:*", "/tmp/out"]
        );
    }

    #[tokio::test]
    async fn test_plain_payload_passes_through() {
        let payload = b"<ModelList/>".to_vec();
        let unpacked = CabExtractor::new().unpack(payload.clone()).await.unwrap();
        assert_eq!(unpacked, payload);
    }

    #[tokio::test]
    async fn test_corrupt_cab_fails_extraction() {
        let err = CabExtractor::new()
            .unpack(b"MSCF not really a cabinet".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::ExtractionFailed { .. })
        ));
    }

    #[test]
    fn test_first_xml_file_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.xml"), "<b/>").unwrap();
        fs::write(dir.path().join("a.XML"), "<a/>").unwrap();
        fs::write(dir.path().join("readme.txt"), "x").unwrap();
        let first = first_xml_file(dir.path()).unwrap().unwrap();
        assert_eq!(first.file_name().unwrap(), "a.XML");
    }

    #[test]
    fn test_extraction_unavailable() {
        let error = extraction_failed(Path::new("/tmp/a.cab"), "cabextract: not found".to_string());
        let mapped = extraction_unavailable("Dell", error);
        match mapped.downcast_ref::<CatalogError>() {
            Some(CatalogError::SourceUnavailable {
                source_name,
                details,
            }) => {
                assert_eq!(source_name, "Dell");
                assert_eq!(details, "archive extraction failed: cabextract: not found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_first_xml_file_none() {
        let dir = TempDir::new().unwrap();
        assert!(first_xml_file(dir.path()).unwrap().is_none());
    }
}
