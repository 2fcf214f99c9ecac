//! Core library for the Mocknest mock API service.
//!
//! Mocknest lets a tenant register named groups of mock endpoints, attach an
//! arbitrary JSON document to each, and resolve
//! `owner/group-slug/endpoint-path` strings back to those documents at
//! runtime. This crate is the path-resolution and dual-store consistency
//! engine behind that:
//! - [`path`]: path grammar, normalization, and the typed three-part key
//! - [`registry`]: owner-scoped group and endpoint records with uniqueness
//! - [`payloads`]: opaque documents keyed by endpoint identity
//! - [`engine::Engine`]: the register/resolve orchestrator with draft-state
//!   compensation and orphan reconciliation
//!
//! Authentication, HTTP transport, and database drivers live outside; the
//! core consumes the [`store`] traits and trusts the `owner` strings it is
//! given.

pub mod config;
pub mod engine;
pub mod error;
pub mod path;
pub mod payloads;
pub mod registry;
pub mod store;
pub mod types;

pub use engine::{Engine, EngineConfig};
pub use error::Error;
pub use path::MockPath;
