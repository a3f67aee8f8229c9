use super::url::strip_query;
use crate::catalog_generation::domain::PackFormat;

/// Infers the pack format: explicit token first, then the file name's
/// extension, then the URL's path suffix. Defaults to `exe`.
pub fn infer_format(explicit: Option<&str>, file_name: Option<&str>, url: &str) -> PackFormat {
    explicit
        .and_then(format_from_token)
        .or_else(|| file_name.and_then(format_from_path))
        .or_else(|| format_from_path(strip_query(url)))
        .unwrap_or(PackFormat::Exe)
}

fn format_from_token(token: &str) -> Option<PackFormat> {
    match token.trim().trim_start_matches('.').to_lowercase().as_str() {
        "cab" => Some(PackFormat::Cab),
        "exe" => Some(PackFormat::Exe),
        "msi" => Some(PackFormat::Msi),
        "zip" => Some(PackFormat::Zip),
        _ => None,
    }
}

fn format_from_path(path: &str) -> Option<PackFormat> {
    let last_segment = path.rsplit(['/', '\\']).next()?;
    let (_, extension) = last_segment.rsplit_once('.')?;
    format_from_token(extension)
}
