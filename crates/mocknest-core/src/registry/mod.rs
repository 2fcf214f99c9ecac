//! Record registries scoped to an owner.
//!
//! - [`groups::GroupRegistry`]: group records, per-owner slug uniqueness
//! - [`endpoints::EndpointRegistry`]: endpoint records, per-group
//!   `(path, method)` uniqueness, payload-linked cascade deletes

pub mod endpoints;
pub mod groups;

pub use endpoints::EndpointRegistry;
pub use groups::GroupRegistry;
