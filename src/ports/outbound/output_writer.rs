use crate::shared::Result;
use std::path::PathBuf;

/// OutputWriter port for persisting generated documents
///
/// Implementations must replace a document atomically: readers see either
/// the previous content or the new one, never a partial write.
pub trait OutputWriter {
    /// Writes `content` under `file_name` and returns the final path
    ///
    /// # Errors
    /// Returns an error if:
    /// - The output directory does not exist or is not writable
    /// - The target is a symbolic link
    /// - Disk space is insufficient
    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf>;
}
