mod catalog_unifier;
mod deduplicator;

pub use catalog_unifier::CatalogUnifier;
pub use deduplicator::Deduplicator;
