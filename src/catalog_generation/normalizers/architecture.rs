use crate::catalog_generation::domain::Architecture;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Vendor spellings of each canonical architecture, matched case-insensitively
static ARCHITECTURE_SYNONYMS: LazyLock<HashMap<&'static str, Architecture>> =
    LazyLock::new(|| {
        let table: &[(&[&str], Architecture)] = &[
            (
                &["x64", "amd64", "64-bit", "64bit", "64", "x86_64", "x86-64", "win64"],
                Architecture::X64,
            ),
            (
                &["x86", "86", "32-bit", "32bit", "32", "ia32", "i386", "i686", "win32"],
                Architecture::X86,
            ),
            (&["arm64", "aarch64", "arm"], Architecture::Arm64),
        ];
        table
            .iter()
            .flat_map(|(names, arch)| names.iter().map(move |name| (*name, *arch)))
            .collect()
    });

static ARM64_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)arm64|aarch64").expect("Invalid arm64 regex"));

static X86_64_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)x86[_\-]64").expect("Invalid x86_64 regex"));

static X86_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z0-9])x86(?:[^a-z0-9]|$)").expect("Invalid x86 regex")
});

/// Maps a free-form architecture string onto the canonical set.
///
/// Empty, absent or unrecognized input returns `default`.
pub fn normalize_architecture(raw: Option<&str>, default: Architecture) -> Architecture {
    let Some(raw) = raw else {
        return default;
    };
    let key = raw.trim().to_lowercase();
    ARCHITECTURE_SYNONYMS
        .get(key.as_str())
        .copied()
        .unwrap_or(default)
}

/// Infers the architecture from tokens embedded in a file name.
pub fn architecture_from_file_name(file_name: &str) -> Architecture {
    if ARM64_TOKEN.is_match(file_name) {
        Architecture::Arm64
    } else if X86_64_TOKEN.is_match(file_name) {
        Architecture::X64
    } else if X86_TOKEN.is_match(file_name) {
        Architecture::X86
    } else {
        Architecture::X64
    }
}

/// Picks the architecture out of an OS description such as
/// "Windows 11 64-bit, 23H2".
pub fn architecture_from_os_text(text: &str, default: Architecture) -> Architecture {
    let lower = text.to_lowercase();
    if ARM64_TOKEN.is_match(&lower) {
        Architecture::Arm64
    } else if lower.contains("64-bit") || lower.contains("x64") || X86_64_TOKEN.is_match(&lower) {
        Architecture::X64
    } else if lower.contains("32-bit") || X86_TOKEN.is_match(&lower) {
        Architecture::X86
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization_is_total_and_closed() {
        let cases: &[(Option<&str>, Architecture)] = &[
            (Some("x64"), Architecture::X64),
            (Some("amd64"), Architecture::X64),
            (Some("64-bit"), Architecture::X64),
            (Some("64"), Architecture::X64),
            (Some("x86"), Architecture::X86),
            (Some("86"), Architecture::X86),
            (Some("32-bit"), Architecture::X86),
            (Some("32"), Architecture::X86),
            (Some("ia32"), Architecture::X86),
            (Some("arm64"), Architecture::Arm64),
            (Some("aarch64"), Architecture::Arm64),
            (Some(""), Architecture::X64),
            (None, Architecture::X64),
            (Some("bogus"), Architecture::X64),
        ];
        for (input, expected) in cases {
            assert_eq!(
                normalize_architecture(*input, Architecture::X64),
                *expected,
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_unrecognized_returns_supplied_default() {
        assert_eq!(
            normalize_architecture(Some("mips"), Architecture::X86),
            Architecture::X86
        );
        assert_eq!(normalize_architecture(None, Architecture::Arm64), Architecture::Arm64);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(
            normalize_architecture(Some("  AMD64 "), Architecture::X86),
            Architecture::X64
        );
        assert_eq!(
            normalize_architecture(Some("AArch64"), Architecture::X64),
            Architecture::Arm64
        );
    }

    #[test]
    fn test_architecture_from_file_name() {
        assert_eq!(
            architecture_from_file_name("SurfaceProX_Win11_22621_arm64.msi"),
            Architecture::Arm64
        );
        assert_eq!(
            architecture_from_file_name("Surface3_Win10_x86_1.0.msi"),
            Architecture::X86
        );
        assert_eq!(
            architecture_from_file_name("Surface_x86_64_driver.msi"),
            Architecture::X64
        );
        assert_eq!(
            architecture_from_file_name("SurfacePro9_Win11_22621.msi"),
            Architecture::X64
        );
    }

    #[test]
    fn test_architecture_from_os_text() {
        assert_eq!(
            architecture_from_os_text("Windows 11 64-bit, 23H2", Architecture::X86),
            Architecture::X64
        );
        assert_eq!(
            architecture_from_os_text("Windows 10 32-bit", Architecture::X64),
            Architecture::X86
        );
        assert_eq!(
            architecture_from_os_text("Windows 11 ARM64", Architecture::X64),
            Architecture::Arm64
        );
        assert_eq!(
            architecture_from_os_text("Windows 11", Architecture::X64),
            Architecture::X64
        );
    }
}
