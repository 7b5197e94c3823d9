//! Service layer for the seller backend.
//! - Repository traits with SeaORM and in-memory implementations.
//! - Services holding business rules (hashing, paging, ownership).
//! - Collaborators for image upload, the business registry and radius search.

pub mod errors;
pub mod pagination;
pub mod password;
pub mod upload;
pub mod geo;
pub mod seller;
pub mod store;
pub mod menu;
#[cfg(test)]
pub mod test_support;
