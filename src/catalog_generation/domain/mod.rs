pub mod catalog_source;
pub mod driver_pack;
pub mod os_image;

pub use catalog_source::{CatalogSource, CategoryCatalog, UnifiedCatalog};
pub use driver_pack::{
    Architecture, DriverPack, DriverPackBuilder, Manufacturer, ModelRef, OsInfo, PackFormat,
    PackHashes, PackType,
};
pub use os_image::OsImage;
