use super::{decode_text, malformed, parse_size};
use crate::catalog_generation::vendors::SurfaceDownload;
use crate::shared::Result;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

/// Download details are embedded as a JSON literal assigned in a script tag
static DLC_DETAILS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)window\.__DLCDetails__\s*=\s*(\{.*?\})\s*;?\s*</script>")
        .expect("Invalid download details regex")
});

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DlcDetails {
    dlc_details_view: Option<DlcDetailsView>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DlcDetailsView {
    download_title: Option<String>,
    download_file: Vec<DownloadFile>,
    supported_operating_systems: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DownloadFile {
    name: Option<String>,
    url: Option<String>,
    size: Option<Value>,
    version: Option<String>,
    date_published: Option<String>,
}

/// Extracts the downloadable files of one Surface download page
pub fn parse_surface_page(payload: &[u8]) -> Result<Vec<SurfaceDownload>> {
    let html = decode_text(payload);
    let json = DLC_DETAILS
        .captures(&html)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| malformed("Surface", "download details not found in page".to_string()))?;

    let details: DlcDetails = serde_json::from_str(json.as_str())
        .map_err(|e| malformed("Surface", format!("download details: {}", e)))?;
    let view = details.dlc_details_view.unwrap_or_default();
    let supported_os = view.supported_operating_systems.as_ref().and_then(flatten_text);

    Ok(view
        .download_file
        .into_iter()
        .map(|file| SurfaceDownload {
            title: view.download_title.clone(),
            file_name: file.name,
            url: file.url,
            size: file.size.as_ref().and_then(size_value),
            date_published: file.date_published,
            version: file.version,
            supported_os: supported_os.clone(),
        })
        .collect())
}

/// Sizes appear both as JSON numbers and as quoted strings
fn size_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => parse_size(Some(s)),
        _ => None,
    }
}

fn flatten_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(flatten_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}
