use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a catalog payload or input file (256 MB)
/// Vendor manifests are tens of MB at most; anything larger is rejected
pub const MAX_PAYLOAD_SIZE: u64 = 256 * 1024 * 1024;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file (e.g., "Dell catalog")
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_payload_size(metadata.len(), &path.display().to_string(), MAX_PAYLOAD_SIZE)
}

/// Validates payload size is within acceptable limits
///
/// # Arguments
/// * `size` - The size of the payload in bytes
/// * `origin` - Where the payload came from (path or URL, for error messages)
/// * `max_size` - Maximum allowed size in bytes
///
/// # Errors
/// Returns an error if the size exceeds the maximum
pub fn validate_payload_size(size: u64, origin: &str, max_size: u64) -> Result<()> {
    if size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            origin,
            size,
            max_size
        );
    }
    Ok(())
}
