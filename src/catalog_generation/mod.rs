//! Catalog core: canonical domain model, field normalizers, release-id
//! policies, per-vendor adapters and the unification services.

pub mod domain;
pub mod normalizers;
pub mod policies;
pub mod services;
pub mod vendors;
