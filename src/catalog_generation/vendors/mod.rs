//! Per-vendor adapters
//!
//! Each vendor module owns the raw record shapes its parser produces (every
//! field optional, absence is normal) and a pure function mapping them to
//! canonical records. Raw records without a resolvable absolute download
//! URL are dropped silently.

pub mod dell;
pub mod hp;
pub mod lenovo;
pub mod microsoft;
pub mod windows_esd;

pub use dell::{normalize_dell, DellCatalog, DellDriverPackage, DellModel, DellOperatingSystem};
pub use hp::{normalize_hp, HpCatalog, HpPlatform, HpProductOsMapping, HpSoftPaq};
pub use lenovo::{normalize_lenovo, LenovoCatalog, LenovoDriverPack};
pub use microsoft::{normalize_surface, SurfaceCatalog, SurfaceDownload};
pub use windows_esd::{normalize_esd, EsdCatalog, EsdFile};

use super::domain::{DriverPack, Manufacturer};

/// Raw record set of one driver pack vendor
#[derive(Debug, Clone)]
pub enum RawVendorCatalog {
    Dell(DellCatalog),
    HP(HpCatalog),
    Lenovo(LenovoCatalog),
    Microsoft(SurfaceCatalog),
}

impl RawVendorCatalog {
    pub fn manufacturer(&self) -> Manufacturer {
        match self {
            RawVendorCatalog::Dell(_) => Manufacturer::Dell,
            RawVendorCatalog::HP(_) => Manufacturer::HP,
            RawVendorCatalog::Lenovo(_) => Manufacturer::Lenovo,
            RawVendorCatalog::Microsoft(_) => Manufacturer::Microsoft,
        }
    }

    /// Number of raw rows before normalization
    pub fn raw_len(&self) -> usize {
        match self {
            RawVendorCatalog::Dell(c) => c.packages.len(),
            RawVendorCatalog::HP(c) => c.softpaqs.len(),
            RawVendorCatalog::Lenovo(c) => c.packs.len(),
            RawVendorCatalog::Microsoft(c) => c.downloads.len(),
        }
    }

    pub fn normalize(&self) -> Vec<DriverPack> {
        match self {
            RawVendorCatalog::Dell(c) => normalize_dell(c),
            RawVendorCatalog::HP(c) => normalize_hp(c),
            RawVendorCatalog::Lenovo(c) => normalize_lenovo(c),
            RawVendorCatalog::Microsoft(c) => normalize_surface(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manufacturer_dispatch() {
        assert_eq!(
            RawVendorCatalog::Dell(DellCatalog::default()).manufacturer(),
            Manufacturer::Dell
        );
        assert_eq!(
            RawVendorCatalog::Microsoft(SurfaceCatalog::default()).manufacturer(),
            Manufacturer::Microsoft
        );
    }

    #[test]
    fn test_empty_catalogs_normalize_to_nothing() {
        for raw in [
            RawVendorCatalog::Dell(DellCatalog::default()),
            RawVendorCatalog::HP(HpCatalog::default()),
            RawVendorCatalog::Lenovo(LenovoCatalog::default()),
            RawVendorCatalog::Microsoft(SurfaceCatalog::default()),
        ] {
            assert_eq!(raw.raw_len(), 0);
            assert!(raw.normalize().is_empty());
        }
    }
}
