use crate::ports::outbound::OutputWriter;
use crate::shared::error::CatalogError;
use crate::shared::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// FileSystemWriter adapter for writing documents into an output directory
///
/// Content goes to a temporary file in the same directory first and is then
/// renamed over the target, so a reader never observes a half-written
/// document.
pub struct FileSystemWriter {
    output_dir: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn write_error(path: &Path, details: impl Into<String>) -> CatalogError {
        CatalogError::FileWriteError {
            path: path.to_path_buf(),
            details: details.into(),
        }
    }

    /// The output directory must already exist
    fn validate_output_dir(&self) -> Result<()> {
        let metadata = fs::metadata(&self.output_dir).map_err(|_| {
            Self::write_error(
                &self.output_dir,
                format!("Output directory does not exist: {}", self.output_dir.display()),
            )
        })?;

        if !metadata.is_dir() {
            return Err(Self::write_error(
                &self.output_dir,
                format!("Output path is not a directory: {}", self.output_dir.display()),
            )
            .into());
        }
        Ok(())
    }

    /// Rejects targets that escape the directory or are symbolic links
    fn validate_target(&self, file_name: &str, target: &Path) -> Result<()> {
        if file_name.is_empty()
            || file_name.contains(['/', '\\'])
            || file_name == "."
            || file_name == ".."
        {
            return Err(Self::write_error(
                target,
                format!("Invalid output file name: '{}'", file_name),
            )
            .into());
        }

        if let Ok(metadata) = fs::symlink_metadata(target) {
            if metadata.is_symlink() {
                return Err(Self::write_error(
                    target,
                    "Security: Output path is a symbolic link. For security reasons, writing to symbolic links is not allowed.",
                )
                .into());
            }
        }
        Ok(())
    }
}

impl OutputWriter for FileSystemWriter {
    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        let target = self.output_dir.join(file_name);
        self.validate_output_dir()?;
        self.validate_target(file_name, &target)?;

        let mut temp = NamedTempFile::new_in(&self.output_dir)
            .map_err(|e| Self::write_error(&target, e.to_string()))?;
        temp.write_all(content.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| Self::write_error(&target, e.to_string()))?;
        temp.persist(&target)
            .map_err(|e| Self::write_error(&target, e.error.to_string()))?;

        Ok(target)
    }
}
