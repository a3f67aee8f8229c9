use crate::shared::error::CatalogError;
use crate::shared::Result;

/// ThresholdPolicy guards against publishing a suspiciously small catalog
///
/// A vendor feed that silently shrinks (layout change, partial outage) would
/// otherwise overwrite a good catalog with a near-empty one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThresholdPolicy {
    minimum: usize,
}

impl ThresholdPolicy {
    pub fn new(minimum: usize) -> Self {
        Self { minimum }
    }

    pub fn minimum(&self) -> usize {
        self.minimum
    }

    /// # Errors
    /// Returns `CatalogError::ThresholdNotMet` when `actual` is below the minimum.
    pub fn check(&self, category: &str, actual: usize) -> Result<()> {
        if actual < self.minimum {
            return Err(CatalogError::ThresholdNotMet {
                category: category.to_string(),
                actual,
                minimum: self.minimum,
            }
            .into());
        }
        Ok(())
    }
}
