//! Payload documents stored per owner namespace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An opaque JSON document attached to one endpoint.
///
/// Addressed only by `(namespace, endpoint_id)`; the `data` field is never
/// inspected or validated by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// Owner namespace (one document partition per tenant).
    pub namespace: String,
    /// Identity of the endpoint this document answers for.
    pub endpoint_id: i64,
    /// The configured mock response, returned verbatim.
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
