use regex::Regex;
use std::sync::LazyLock;

/// Display name used when nothing better is known
pub const DEFAULT_OS_NAME: &str = "Windows";

/// Display name of the preinstallation environment family
pub const WINPE_OS_NAME: &str = "WinPE";

static WINDOWS_FAMILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)win(?:dows)?[\s_\-]?(11|10|8\.1|81|8|7)(?:[^0-9]|$)")
        .expect("Invalid Windows family regex")
});

static WINPE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)win\s*pe").expect("Invalid WinPE regex"));

/// Finds a Windows family token ("Win10", "Windows 11", "Win8.1", ...) and
/// returns its display name.
pub fn windows_family(text: &str) -> Option<&'static str> {
    let caps = WINDOWS_FAMILY.captures(text)?;
    match caps.get(1)?.as_str() {
        "11" => Some("Windows 11"),
        "10" => Some("Windows 10"),
        "8.1" | "81" => Some("Windows 8.1"),
        "8" => Some("Windows 8"),
        "7" => Some("Windows 7"),
        _ => None,
    }
}

/// True when the text names the preinstallation environment
pub fn is_winpe(text: &str) -> bool {
    WINPE_MARKER.is_match(text)
}

/// Dell `osCode` values ("Windows10", "Windows11", "WinPE10.0", ...)
pub fn dell_os_name(os_code: Option<&str>) -> String {
    family_or_prefixed(os_code)
}

/// HP `OSName` values ("Windows 11 64-bit, 23H2", ...)
pub fn hp_os_name(os_name: Option<&str>) -> String {
    family_or_prefixed(os_name)
}

/// Lenovo `os` attribute: bare "10"/"11" or "win10"/"win11"; anything else
/// is prefixed with "Windows ".
pub fn lenovo_os_name(os: Option<&str>) -> String {
    let Some(raw) = os.map(str::trim).filter(|s| !s.is_empty()) else {
        return DEFAULT_OS_NAME.to_string();
    };
    match raw.to_lowercase().as_str() {
        "10" | "win10" => "Windows 10".to_string(),
        "11" | "win11" => "Windows 11".to_string(),
        _ => prefixed(raw),
    }
}

fn family_or_prefixed(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return DEFAULT_OS_NAME.to_string();
    };
    if is_winpe(raw) {
        return WINPE_OS_NAME.to_string();
    }
    match windows_family(raw) {
        Some(family) => family.to_string(),
        None => prefixed(raw),
    }
}

fn prefixed(raw: &str) -> String {
    if raw.to_lowercase().starts_with("windows") {
        raw.to_string()
    } else {
        format!("Windows {}", raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_family_tokens() {
        assert_eq!(windows_family("SurfacePro7_Win10_19041.msi"), Some("Windows 10"));
        assert_eq!(windows_family("Windows 11 64-bit, 23H2"), Some("Windows 11"));
        assert_eq!(windows_family("Surface3_Win8.1_x86.zip"), Some("Windows 8.1"));
        assert_eq!(windows_family("SurfacePro2_Win81x64.zip"), Some("Windows 8.1"));
        assert_eq!(windows_family("Win8_x64.zip"), Some("Windows 8"));
        assert_eq!(windows_family("Windows 7"), Some("Windows 7"));
        assert_eq!(windows_family("Windows10"), Some("Windows 10"));
        assert_eq!(windows_family("SurfaceHub2S_2004.msi"), None);
    }

    #[test]
    fn test_family_requires_token_boundary() {
        assert_eq!(windows_family("Win1064"), None);
    }

    #[test]
    fn test_dell_os_name() {
        assert_eq!(dell_os_name(Some("Windows10")), "Windows 10");
        assert_eq!(dell_os_name(Some("Windows11")), "Windows 11");
        assert_eq!(dell_os_name(Some("WinPE10.0")), "WinPE");
        assert_eq!(dell_os_name(Some("Server2022")), "Windows Server2022");
        assert_eq!(dell_os_name(None), "Windows");
        assert_eq!(dell_os_name(Some("  ")), "Windows");
    }

    #[test]
    fn test_hp_os_name() {
        assert_eq!(hp_os_name(Some("Windows 11 64-bit, 24H2")), "Windows 11");
        assert_eq!(hp_os_name(Some("Windows 10 64-bit, 22H2")), "Windows 10");
        assert_eq!(
            hp_os_name(Some("Windows IoT Enterprise LTSC")),
            "Windows IoT Enterprise LTSC"
        );
    }

    #[test]
    fn test_lenovo_os_name() {
        assert_eq!(lenovo_os_name(Some("win10")), "Windows 10");
        assert_eq!(lenovo_os_name(Some("WIN11")), "Windows 11");
        assert_eq!(lenovo_os_name(Some("10")), "Windows 10");
        assert_eq!(lenovo_os_name(Some("11")), "Windows 11");
        assert_eq!(lenovo_os_name(Some("win7")), "Windows win7");
        assert_eq!(lenovo_os_name(None), "Windows");
    }

    #[test]
    fn test_is_winpe() {
        assert!(is_winpe("HP WinPE 10 Driver Pack"));
        assert!(is_winpe("winpe10x"));
        assert!(is_winpe("Win PE 11"));
        assert!(!is_winpe("Windows 11"));
    }
}
