//! Core domain records for groups, endpoints, and payloads.

pub mod endpoint;
pub mod group;
pub mod payload;
