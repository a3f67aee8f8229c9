/// Use cases module containing application business logic orchestration
mod build_driver_catalog;
mod build_os_catalog;
mod publish_catalog;

pub use build_driver_catalog::BuildDriverCatalogUseCase;
pub use build_os_catalog::BuildOsCatalogUseCase;
pub use publish_catalog::{PublishCatalogUseCase, DRIVER_PACKS_STEM, WINDOWS_IMAGES_STEM};
