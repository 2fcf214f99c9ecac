//! Payload storage keyed by `(owner namespace, endpoint identity)`.

use crate::error::Error;
use crate::store::DocumentStore;
use crate::types::payload::Payload;
use serde_json::Value;
use std::sync::Arc;

/// Thin layer over the document collaborator that owns namespace
/// provisioning. Documents are opaque: nothing here inspects `data`.
#[derive(Clone)]
pub struct PayloadStore {
    documents: Arc<dyn DocumentStore>,
}

impl PayloadStore {
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }

    /// Upsert the document for `(namespace, endpoint_id)`.
    ///
    /// The per-owner partition is provisioned lazily on first write through
    /// the store's atomic create-if-absent primitive, so concurrent first
    /// writers cannot race each other into a failure.
    pub async fn put(&self, namespace: &str, endpoint_id: i64, data: Value) -> Result<Payload, Error> {
        if self.documents.ensure_namespace(namespace).await? {
            tracing::debug!(namespace, "provisioned payload namespace");
        }
        Ok(self.documents.put(namespace, endpoint_id, data).await?)
    }

    /// Fetch the document; `NotFound` signals a draft endpoint or an
    /// inconsistency, which the caller classifies.
    pub async fn get(&self, namespace: &str, endpoint_id: i64) -> Result<Payload, Error> {
        Ok(self.documents.get(namespace, endpoint_id).await?)
    }

    /// Idempotent delete.
    pub async fn delete(&self, namespace: &str, endpoint_id: i64) -> Result<(), Error> {
        Ok(self.documents.delete(namespace, endpoint_id).await?)
    }

    pub async fn namespace_exists(&self, namespace: &str) -> Result<bool, Error> {
        Ok(self.documents.namespace_exists(namespace).await?)
    }

    /// Endpoint ids currently holding a document in this namespace.
    pub async fn document_ids(&self, namespace: &str) -> Result<Vec<i64>, Error> {
        Ok(self.documents.document_ids(namespace).await?)
    }
}
