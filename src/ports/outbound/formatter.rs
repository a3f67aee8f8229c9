use crate::application::read_models::{CatalogReadModel, OsCatalogReadModel};
use crate::shared::Result;

/// CatalogFormatter port for serializing catalog documents
///
/// This port abstracts the document syntax (JSON, XML). Both documents
/// carry the same content; only the encoding differs.
pub trait CatalogFormatter {
    /// File extension of the produced documents, without the dot
    fn extension(&self) -> &'static str;

    /// Formats a driver pack catalog
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format_catalog(&self, model: &CatalogReadModel) -> Result<String>;

    /// Formats a Windows image catalog
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format_os_catalog(&self, model: &OsCatalogReadModel) -> Result<String>;
}
