use crate::shared::error::CatalogError;
use crate::shared::Result;
use std::fmt;

/// Hardware vendor publishing a driver pack feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Manufacturer {
    Dell,
    HP,
    Lenovo,
    Microsoft,
}

impl Manufacturer {
    pub const ALL: [Manufacturer; 4] = [
        Manufacturer::Dell,
        Manufacturer::HP,
        Manufacturer::Lenovo,
        Manufacturer::Microsoft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Manufacturer::Dell => "Dell",
            Manufacturer::HP => "HP",
            Manufacturer::Lenovo => "Lenovo",
            Manufacturer::Microsoft => "Microsoft",
        }
    }
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Manufacturer {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dell" => Ok(Manufacturer::Dell),
            "hp" => Ok(Manufacturer::HP),
            "lenovo" => Ok(Manufacturer::Lenovo),
            "microsoft" | "surface" => Ok(Manufacturer::Microsoft),
            _ => Err(format!(
                "Invalid vendor: {}. Please specify 'dell', 'hp', 'lenovo' or 'microsoft'",
                s
            )),
        }
    }
}

/// Canonical CPU architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Architecture {
    X86,
    X64,
    Arm64,
}

impl Architecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::X64 => "x64",
            Architecture::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Container format of a downloadable driver pack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackFormat {
    Cab,
    Exe,
    Msi,
    Zip,
}

impl PackFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackFormat::Cab => "cab",
            PackFormat::Exe => "exe",
            PackFormat::Msi => "msi",
            PackFormat::Zip => "zip",
        }
    }
}

impl fmt::Display for PackFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog category: installer for a running OS, or preinstallation environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PackType {
    Win,
    WinPE,
}

impl PackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackType::Win => "Win",
            PackType::WinPE => "WinPE",
        }
    }
}

impl fmt::Display for PackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hardware model targeted by a driver pack
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelRef {
    pub name: String,
    pub system_id: Option<String>,
}

impl ModelRef {
    pub fn new(name: impl Into<String>, system_id: Option<String>) -> Self {
        Self {
            name: name.into(),
            system_id,
        }
    }
}

/// Operating system a driver pack is meant for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsInfo {
    pub name: String,
    pub release_id: Option<String>,
    pub build: Option<String>,
    pub architecture: Architecture,
}

impl Default for OsInfo {
    fn default() -> Self {
        Self {
            name: "Windows".to_string(),
            release_id: None,
            build: None,
            architecture: Architecture::X64,
        }
    }
}

/// Content hashes published by the vendor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackHashes {
    pub md5: Option<String>,
    pub sha256: Option<String>,
    pub crc: Option<String>,
}

impl PackHashes {
    pub fn is_empty(&self) -> bool {
        self.md5.is_none() && self.sha256.is_none() && self.crc.is_none()
    }
}

/// Canonical, vendor-agnostic driver pack record
///
/// Built through [`DriverPackBuilder`], which refuses records without an id
/// or a download URL. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverPack {
    id: String,
    package_id: String,
    manufacturer: Manufacturer,
    name: Option<String>,
    version: Option<String>,
    file_name: Option<String>,
    download_url: String,
    size_bytes: Option<u64>,
    format: PackFormat,
    pack_type: PackType,
    release_date: Option<String>,
    models: Vec<ModelRef>,
    os: OsInfo,
    hashes: PackHashes,
}

impl DriverPack {
    pub fn builder(manufacturer: Manufacturer) -> DriverPackBuilder {
        DriverPackBuilder::new(manufacturer)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    pub fn manufacturer(&self) -> Manufacturer {
        self.manufacturer
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn download_url(&self) -> &str {
        &self.download_url
    }

    pub fn size_bytes(&self) -> Option<u64> {
        self.size_bytes
    }

    pub fn format(&self) -> PackFormat {
        self.format
    }

    pub fn pack_type(&self) -> PackType {
        self.pack_type
    }

    pub fn release_date(&self) -> Option<&str> {
        self.release_date.as_deref()
    }

    pub fn models(&self) -> &[ModelRef] {
        &self.models
    }

    pub fn os(&self) -> &OsInfo {
        &self.os
    }

    pub fn hashes(&self) -> &PackHashes {
        &self.hashes
    }
}

/// Builder for [`DriverPack`]
#[derive(Debug, Clone)]
pub struct DriverPackBuilder {
    id: Option<String>,
    package_id: Option<String>,
    manufacturer: Manufacturer,
    name: Option<String>,
    version: Option<String>,
    file_name: Option<String>,
    download_url: Option<String>,
    size_bytes: Option<u64>,
    format: PackFormat,
    pack_type: PackType,
    release_date: Option<String>,
    models: Vec<ModelRef>,
    os: OsInfo,
    hashes: PackHashes,
}

impl DriverPackBuilder {
    pub fn new(manufacturer: Manufacturer) -> Self {
        Self {
            id: None,
            package_id: None,
            manufacturer,
            name: None,
            version: None,
            file_name: None,
            download_url: None,
            size_bytes: None,
            format: PackFormat::Exe,
            pack_type: PackType::Win,
            release_date: None,
            models: Vec::new(),
            os: OsInfo::default(),
            hashes: PackHashes::default(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn package_id(mut self, package_id: impl Into<String>) -> Self {
        self.package_id = Some(package_id.into());
        self
    }

    pub fn name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    pub fn file_name(mut self, file_name: Option<String>) -> Self {
        self.file_name = file_name;
        self
    }

    pub fn download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = Some(url.into());
        self
    }

    pub fn size_bytes(mut self, size: Option<u64>) -> Self {
        self.size_bytes = size;
        self
    }

    pub fn format(mut self, format: PackFormat) -> Self {
        self.format = format;
        self
    }

    pub fn pack_type(mut self, pack_type: PackType) -> Self {
        self.pack_type = pack_type;
        self
    }

    pub fn release_date(mut self, date: Option<String>) -> Self {
        self.release_date = date;
        self
    }

    pub fn models(mut self, models: Vec<ModelRef>) -> Self {
        self.models = models;
        self
    }

    pub fn os(mut self, os: OsInfo) -> Self {
        self.os = os;
        self
    }

    pub fn hashes(mut self, hashes: PackHashes) -> Self {
        self.hashes = hashes;
        self
    }

    /// Finishes the record. `package_id` defaults to the id.
    ///
    /// # Errors
    /// Returns `CatalogError::Validation` when the id or download URL is
    /// missing or blank.
    pub fn build(self) -> Result<DriverPack> {
        let id = non_blank(self.id).ok_or_else(|| CatalogError::Validation {
            message: format!("{} driver pack is missing an id", self.manufacturer),
        })?;
        let download_url = non_blank(self.download_url).ok_or_else(|| CatalogError::Validation {
            message: format!("{} driver pack '{}' has no download URL", self.manufacturer, id),
        })?;
        let package_id = non_blank(self.package_id).unwrap_or_else(|| id.clone());

        Ok(DriverPack {
            id,
            package_id,
            manufacturer: self.manufacturer,
            name: non_blank(self.name),
            version: non_blank(self.version),
            file_name: non_blank(self.file_name),
            download_url,
            size_bytes: self.size_bytes,
            format: self.format,
            pack_type: self.pack_type,
            release_date: self.release_date,
            models: self.models,
            os: self.os,
            hashes: self.hashes,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
