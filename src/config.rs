//! Configuration file support for driverpack-catalog.
//!
//! Provides YAML-based configuration through `driverpack-catalog.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::adapters::outbound::network::CatalogEndpoints;
use crate::application::dto::OutputFormat;
use crate::catalog_generation::domain::Manufacturer;
use crate::ports::outbound::ProductFeed;
use crate::shared::error::CatalogError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "driverpack-catalog.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub output_dir: Option<PathBuf>,
    pub format: Option<String>,
    pub vendors: Option<Vec<String>>,
    pub min_items: Option<usize>,
    pub min_winpe_items: Option<usize>,
    pub min_os_items: Option<usize>,
    pub http: Option<HttpConfig>,
    pub catalog_urls: Option<CatalogUrls>,
    pub surface_page_ids: Option<Vec<String>>,
    pub windows_products: Option<Vec<WindowsProduct>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// HTTP client settings.
#[derive(Debug, Deserialize, Default)]
pub struct HttpConfig {
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub retry_delay_secs: Option<u64>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Overrides of the vendor feed URLs, e.g. for an internal mirror.
#[derive(Debug, Deserialize, Default)]
pub struct CatalogUrls {
    pub dell: Option<String>,
    pub hp: Option<String>,
    pub hp_platform_list: Option<String>,
    pub lenovo: Option<String>,
    pub surface: Option<String>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// A Media Creation Tool products feed.
#[derive(Debug, Deserialize)]
pub struct WindowsProduct {
    pub name: String,
    pub url: String,
}

impl ConfigFile {
    /// Vendors in configured order. Only valid after validation.
    pub fn manufacturers(&self) -> Option<Vec<Manufacturer>> {
        self.vendors.as_ref().map(|vendors| {
            vendors
                .iter()
                .filter_map(|v| Manufacturer::from_str(v).ok())
                .collect()
        })
    }

    /// Output format. Only valid after validation.
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.format
            .as_deref()
            .and_then(|f| OutputFormat::from_str(f).ok())
    }

    /// Applies URL, Surface page and products overrides onto `endpoints`
    pub fn apply_endpoints(&self, endpoints: &mut CatalogEndpoints) {
        if let Some(urls) = &self.catalog_urls {
            let overrides = [
                (&urls.dell, &mut endpoints.dell),
                (&urls.hp, &mut endpoints.hp),
                (&urls.hp_platform_list, &mut endpoints.hp_platform_list),
                (&urls.lenovo, &mut endpoints.lenovo),
                (&urls.surface, &mut endpoints.surface),
            ];
            for (value, target) in overrides {
                if let Some(url) = value {
                    *target = url.trim().to_string();
                }
            }
        }
        if let Some(ids) = &self.surface_page_ids {
            endpoints.surface_page_ids = ids.iter().map(|id| id.trim().to_string()).collect();
        }
        if let Some(products) = &self.windows_products {
            endpoints.windows_products = products
                .iter()
                .map(|p| ProductFeed::new(p.name.trim(), p.url.trim()))
                .collect();
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn invalid(message: String, hint: &str) -> anyhow::Error {
    CatalogError::InvalidConfig {
        message,
        hint: hint.to_string(),
    }
    .into()
}

fn is_http_url(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(format) = &config.format {
        OutputFormat::from_str(format)
            .map_err(|e| invalid(e, "Use one of: json, xml, all."))?;
    }

    if let Some(vendors) = &config.vendors {
        if vendors.is_empty() {
            return Err(invalid(
                "vendors must not be empty".to_string(),
                "Remove the 'vendors' key to fetch every vendor.",
            ));
        }
        for vendor in vendors {
            Manufacturer::from_str(vendor)
                .map_err(|e| invalid(e, "Valid vendors are: dell, hp, lenovo, microsoft."))?;
        }
    }

    if let Some(http) = &config.http {
        if http.timeout_secs == Some(0) {
            return Err(invalid(
                "http.timeout_secs must be greater than 0".to_string(),
                "Use a timeout in seconds, e.g. 60.",
            ));
        }
        if http.max_retries == Some(0) {
            return Err(invalid(
                "http.max_retries must be at least 1".to_string(),
                "max_retries counts attempts, including the first one.",
            ));
        }
    }

    if let Some(urls) = &config.catalog_urls {
        let entries = [
            ("dell", &urls.dell),
            ("hp", &urls.hp),
            ("hp_platform_list", &urls.hp_platform_list),
            ("lenovo", &urls.lenovo),
            ("surface", &urls.surface),
        ];
        for (key, value) in entries {
            if let Some(url) = value {
                if !is_http_url(url) {
                    return Err(invalid(
                        format!("catalog_urls.{} is not an http(s) URL: '{}'", key, url),
                        "Catalog URLs must start with https:// or http://.",
                    ));
                }
            }
        }
    }

    if let Some(ids) = &config.surface_page_ids {
        for (i, id) in ids.iter().enumerate() {
            if id.trim().is_empty() || !id.trim().chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid(
                    format!("surface_page_ids[{}] must be a numeric page id, got '{}'", i, id),
                    "Use the 'id' query value of the Microsoft download page, e.g. \"105389\".",
                ));
            }
        }
    }

    if let Some(products) = &config.windows_products {
        for (i, product) in products.iter().enumerate() {
            if product.name.trim().is_empty() {
                return Err(invalid(
                    format!("windows_products[{}].name must not be empty", i),
                    "Each product needs a label such as \"Windows 11\".",
                ));
            }
            if !is_http_url(&product.url) {
                return Err(invalid(
                    format!("windows_products[{}].url is not an http(s) URL", i),
                    "Use the products.xml or products.cab download URL.",
                ));
            }
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let nested = [
        ("http.", config.http.as_ref().map(|h| &h.unknown_fields)),
        (
            "catalog_urls.",
            config.catalog_urls.as_ref().map(|u| &u.unknown_fields),
        ),
    ];
    let keys = config.unknown_fields.keys().map(|key| key.to_string()).chain(
        nested.into_iter().flat_map(|(prefix, fields)| {
            fields
                .into_iter()
                .flat_map(|fields| fields.keys())
                .map(move |key| format!("{}{}", prefix, key))
        }),
    );

    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.yml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
output_dir: ./catalogs
format: xml
vendors: [dell, HP]
min_items: 500
min_winpe_items: 20
min_os_items: 10
http:
  timeout_secs: 30
  max_retries: 5
  retry_delay_secs: 1
catalog_urls:
  lenovo: https://mirror.example.com/catalogv2.xml
surface_page_ids: ["105389", "102924"]
windows_products:
  - name: Windows 11
    url: https://mirror.example.com/products11.cab
"#,
        );

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.output_dir, Some(PathBuf::from("./catalogs")));
        assert_eq!(config.output_format(), Some(OutputFormat::Xml));
        assert_eq!(
            config.manufacturers(),
            Some(vec![Manufacturer::Dell, Manufacturer::HP])
        );
        assert_eq!(config.min_items, Some(500));
        assert_eq!(config.min_winpe_items, Some(20));
        assert_eq!(config.min_os_items, Some(10));
        let http = config.http.as_ref().unwrap();
        assert_eq!(http.timeout_secs, Some(30));
        assert_eq!(http.max_retries, Some(5));
        assert_eq!(http.retry_delay_secs, Some(1));
    }

    #[test]
    fn test_apply_endpoints() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
catalog_urls:
  lenovo: https://mirror.example.com/catalogv2.xml
surface_page_ids: [" 105389 "]
windows_products:
  - name: Windows 11
    url: https://mirror.example.com/products11.cab
"#,
        );
        let config = load_config_from_path(&path).unwrap();
        let mut endpoints = CatalogEndpoints::default();
        config.apply_endpoints(&mut endpoints);

        assert_eq!(endpoints.lenovo, "https://mirror.example.com/catalogv2.xml");
        assert_eq!(endpoints.dell, CatalogEndpoints::default().dell);
        assert_eq!(endpoints.surface_page_ids, vec!["105389".to_string()]);
        assert_eq!(endpoints.windows_products.len(), 1);
        assert_eq!(
            endpoints.windows_products[0].url,
            "https://mirror.example.com/products11.cab"
        );
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "min_items: 3\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.min_items, Some(3));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "invalid: yaml: [[[broken");

        let err = format!("{}", load_config_from_path(&path).unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_invalid_vendor() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "vendors: [dell, acer]\n");

        let err = load_config_from_path(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::InvalidConfig { .. })
        ));
        assert!(err.to_string().contains("acer"));
    }

    #[test]
    fn test_empty_vendor_list() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "vendors: []\n");
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("vendors must not be empty"));
    }

    #[test]
    fn test_invalid_format() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "format: csv\n");
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid format"));
    }

    #[test]
    fn test_zero_retries_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "http:\n  max_retries: 0\n");
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("max_retries must be at least 1"));
    }

    #[test]
    fn test_non_http_url_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "catalog_urls:\n  dell: ftp://downloads.dell.com/x.cab\n");
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("catalog_urls.dell"));
    }

    #[test]
    fn test_non_numeric_surface_page_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "surface_page_ids: [\"abc\"]\n");
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("surface_page_ids[0]"));
    }

    #[test]
    fn test_unknown_fields_collected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
min_items: 1
unknown_field: true
http:
  proxy: http://proxy
"#,
        );

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.unknown_fields.len(), 1);
        assert!(config.unknown_fields.contains_key("unknown_field"));
        assert!(config
            .http
            .as_ref()
            .unwrap()
            .unknown_fields
            .contains_key("proxy"));
    }

    #[test]
    fn test_empty_file_is_default() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{}\n");
        let config = load_config_from_path(&path).unwrap();
        assert!(config.vendors.is_none());
        assert!(config.manufacturers().is_none());
    }
}
