//! Endpoint registry: group-scoped endpoint records linked to payloads.

use crate::error::Error;
use crate::path;
use crate::payloads::PayloadStore;
use crate::store::IndexStore;
use crate::types::endpoint::{Endpoint, HttpMethod};
use std::sync::Arc;

/// Owns all endpoint mutations. Paths are validated and normalized here;
/// `(group_id, path, method)` uniqueness is enforced by the store, which
/// makes the insert the serialization point for racing registrations.
#[derive(Clone)]
pub struct EndpointRegistry {
    index: Arc<dyn IndexStore>,
    payloads: PayloadStore,
}

impl EndpointRegistry {
    pub fn new(index: Arc<dyn IndexStore>, payloads: PayloadStore) -> Self {
        Self { index, payloads }
    }

    /// Create an endpoint and allocate its identity. The caller must attach a
    /// payload next; until then the endpoint is draft and unresolvable.
    pub async fn create(
        &self,
        group_id: i64,
        endpoint_path: &str,
        method: HttpMethod,
    ) -> Result<Endpoint, Error> {
        path::validate(endpoint_path)?;
        let stored = path::normalize(endpoint_path);
        Ok(self.index.insert_endpoint(group_id, &stored, method).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Endpoint, Error> {
        Ok(self.index.endpoint_by_id(id).await?)
    }

    /// Exact `(group, path, method)` lookup after normalization.
    pub async fn get_by_group_and_path(
        &self,
        group_id: i64,
        endpoint_path: &str,
        method: HttpMethod,
    ) -> Result<Endpoint, Error> {
        let stored = path::normalize(endpoint_path);
        Ok(self.index.endpoint_by_key(group_id, &stored, method).await?)
    }

    /// Method-agnostic lookup used by resolution; the lowest id wins when
    /// several methods share a path.
    pub async fn find_for_resolution(
        &self,
        group_id: i64,
        endpoint_path: &str,
    ) -> Result<Endpoint, Error> {
        let stored = path::normalize(endpoint_path);
        Ok(self.index.endpoint_by_path(group_id, &stored).await?)
    }

    pub async fn list_for_group(&self, group_id: i64) -> Result<Vec<Endpoint>, Error> {
        Ok(self.index.endpoints_for_group(group_id).await?)
    }

    /// Remove an endpoint and its payload document.
    ///
    /// The payload goes first: if its removal fails, the endpoint row stays
    /// in place so the pair remains consistent and the delete can be retried,
    /// instead of silently orphaning the document.
    pub async fn delete_cascade(&self, owner: &str, id: i64) -> Result<(), Error> {
        self.payloads.delete(owner, id).await?;
        Ok(self.index.delete_endpoint(id).await?)
    }
}
