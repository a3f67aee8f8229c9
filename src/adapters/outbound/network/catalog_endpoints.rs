use crate::catalog_generation::domain::Manufacturer;
use crate::ports::outbound::ProductFeed;

pub const DELL_CATALOG_URL: &str = "https://downloads.dell.com/catalog/DriverPackCatalog.cab";
pub const HP_CATALOG_URL: &str =
    "https://hpia.hpcloud.hp.com/downloads/driverpackcatalog/HPClientDriverPackCatalog.cab";
pub const HP_PLATFORM_LIST_URL: &str =
    "https://ftp.hp.com/pub/caps-softpaq/cmit/imagepal/ref/platformList.cab";
pub const LENOVO_CATALOG_URL: &str = "https://download.lenovo.com/cdrt/td/catalogv2.xml";
pub const SURFACE_CATALOG_URL: &str =
    "https://learn.microsoft.com/surface/manage-surface-driver-and-firmware-updates";
pub const WINDOWS_11_PRODUCTS_URL: &str = "https://go.microsoft.com/fwlink/?LinkId=2156292";
pub const WINDOWS_10_PRODUCTS_URL: &str = "https://go.microsoft.com/fwlink/?LinkId=841361";

const SURFACE_DOWNLOAD_PAGE: &str = "https://www.microsoft.com/en-us/download/details.aspx?id=";

/// Where every feed lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEndpoints {
    pub dell: String,
    pub hp: String,
    pub hp_platform_list: String,
    pub lenovo: String,
    /// Reported as the Microsoft catalog URL; the data comes from the pages
    pub surface: String,
    /// Microsoft download center ids of the Surface driver pages
    pub surface_page_ids: Vec<String>,
    pub windows_products: Vec<ProductFeed>,
}

impl Default for CatalogEndpoints {
    fn default() -> Self {
        Self {
            dell: DELL_CATALOG_URL.to_string(),
            hp: HP_CATALOG_URL.to_string(),
            hp_platform_list: HP_PLATFORM_LIST_URL.to_string(),
            lenovo: LENOVO_CATALOG_URL.to_string(),
            surface: SURFACE_CATALOG_URL.to_string(),
            surface_page_ids: Vec::new(),
            windows_products: vec![
                ProductFeed::new("Windows 11", WINDOWS_11_PRODUCTS_URL),
                ProductFeed::new("Windows 10", WINDOWS_10_PRODUCTS_URL),
            ],
        }
    }
}

impl CatalogEndpoints {
    pub fn catalog_url(&self, manufacturer: Manufacturer) -> &str {
        match manufacturer {
            Manufacturer::Dell => &self.dell,
            Manufacturer::HP => &self.hp,
            Manufacturer::Lenovo => &self.lenovo,
            Manufacturer::Microsoft => &self.surface,
        }
    }

    pub fn surface_page_url(page_id: &str) -> String {
        format!("{}{}", SURFACE_DOWNLOAD_PAGE, page_id.trim())
    }
}
