/// Upgrades an `http://` URL to `https://`, leaving everything after the
/// scheme untouched. Other URLs, including protocol-relative ones, are
/// returned unchanged.
pub fn normalize_download_url(url: &str) -> String {
    match url.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("http://") => {
            format!("https://{}", &url[7..])
        }
        _ => url.to_string(),
    }
}

/// Resolves a raw vendor location into an absolute https download URL.
///
/// * absolute `http(s)://` URLs are normalized
/// * protocol-relative `//host/path` gets an `https:` scheme
/// * relative paths are joined onto `base` (a host or URL) when one is given
///
/// Anything else has no resolvable location and yields `None`.
pub fn resolve_download_url(raw: Option<&str>, base: Option<&str>) -> Option<String> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;

    if has_http_scheme(raw) {
        return Some(normalize_download_url(raw)).filter(|u| has_host(u));
    }
    if let Some(rest) = raw.strip_prefix("//") {
        return Some(format!("https://{}", rest)).filter(|u| has_host(u));
    }
    if raw.contains("://") {
        return None;
    }

    let base = base.map(str::trim).filter(|s| !s.is_empty())?;
    let base = if has_http_scheme(base) {
        normalize_download_url(base)
    } else {
        format!("https://{}", base.trim_start_matches('/'))
    };
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        raw.replace('\\', "/").trim_start_matches('/')
    );
    Some(joined).filter(|u| has_host(u))
}

/// Last path segment of a URL, without query or fragment
pub fn file_name_from_url(url: &str) -> Option<String> {
    let path = strip_query(url);
    path.rsplit('/')
        .next()
        .map(str::trim)
        .filter(|segment| !segment.is_empty() && !segment.contains("://"))
        .map(str::to_string)
}

/// Drops `?query` and `#fragment` from a URL
pub fn strip_query(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

fn has_http_scheme(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn has_host(url: &str) -> bool {
    url.split_once("://")
        .map(|(_, rest)| rest.split('/').next().is_some_and(|host| !host.is_empty()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_is_upgraded() {
        assert_eq!(normalize_download_url("http://a/b"), "https://a/b");
        assert_eq!(
            normalize_download_url("HTTP://ftp.hp.com/pub/sp1.exe"),
            "https://ftp.hp.com/pub/sp1.exe"
        );
    }

    #[test]
    fn test_https_and_protocol_relative_unchanged() {
        assert_eq!(normalize_download_url("https://a/b"), "https://a/b");
        assert_eq!(normalize_download_url("//a/b"), "//a/b");
        assert_eq!(normalize_download_url(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for url in ["http://a/b", "https://a/b", "//a/b", "ftp://x", "http://", "h"] {
            let once = normalize_download_url(url);
            assert_eq!(normalize_download_url(&once), once, "input {}", url);
        }
    }

    #[test]
    fn test_rest_of_url_preserved_byte_for_byte() {
        assert_eq!(
            normalize_download_url("http://Host/Path%20With?Query=1#Frag"),
            "https://Host/Path%20With?Query=1#Frag"
        );
    }

    #[test]
    fn test_resolve_absolute() {
        assert_eq!(
            resolve_download_url(Some(" http://ftp.hp.com/sp1.exe "), None),
            Some("https://ftp.hp.com/sp1.exe".to_string())
        );
    }

    #[test]
    fn test_resolve_relative_against_base_host() {
        assert_eq!(
            resolve_download_url(
                Some("FOLDER123/1/Latitude-5420.exe"),
                Some("downloads.dell.com")
            ),
            Some("https://downloads.dell.com/FOLDER123/1/Latitude-5420.exe".to_string())
        );
        assert_eq!(
            resolve_download_url(Some("/a/b.cab"), Some("http://downloads.dell.com/")),
            Some("https://downloads.dell.com/a/b.cab".to_string())
        );
    }

    #[test]
    fn test_resolve_protocol_relative() {
        assert_eq!(
            resolve_download_url(Some("//download.lenovo.com/a.exe"), None),
            Some("https://download.lenovo.com/a.exe".to_string())
        );
    }

    #[test]
    fn test_unresolvable() {
        assert_eq!(resolve_download_url(None, Some("downloads.dell.com")), None);
        assert_eq!(resolve_download_url(Some("  "), None), None);
        assert_eq!(resolve_download_url(Some("relative/path.exe"), None), None);
        assert_eq!(resolve_download_url(Some("ftp://host/a.exe"), None), None);
        assert_eq!(resolve_download_url(Some("http://"), None), None);
    }

    #[test]
    fn test_file_name_from_url() {
        assert_eq!(
            file_name_from_url("https://a/b/sp999.exe?x=1"),
            Some("sp999.exe".to_string())
        );
        assert_eq!(file_name_from_url("https://a/b/"), None);
    }
}
