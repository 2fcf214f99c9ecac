//! Abstract store collaborators consumed by the core.
//!
//! The core never talks to a database driver directly. It requires two
//! interfaces: [`IndexStore`], a relational index of group and endpoint
//! records with uniqueness enforcement, and [`DocumentStore`], a per-namespace
//! store of opaque JSON documents. [`memory`] provides in-process
//! implementations used for tests, local development, and non-durable
//! deployments; durable backends implement the same traits behind the
//! process-bootstrap collaborator.
//!
//! Handles are constructed once per process, passed explicitly, and torn down
//! on shutdown, never reconstructed mid-request.

use crate::types::endpoint::{Endpoint, HttpMethod};
use crate::types::group::{Group, GroupDraft, GroupPatch};
use crate::types::payload::Payload;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod memory;

/// Failure surface of both store collaborators.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record matches the key (or the caller does not own it).
    #[error("not found: {0}")]
    NotFound(String),
    /// A uniqueness constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Transient connectivity or timeout failure; safe to retry.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Relational index of owners → groups → endpoints.
///
/// Implementations enforce the `(owner, slug)` and `(group_id, path, method)`
/// uniqueness constraints atomically with the insert or update, which makes
/// this trait the serialization point for concurrent registrations: of two
/// racing writers, exactly one wins and the other receives
/// [`StoreError::Conflict`].
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Insert a group, allocating its identity. `Conflict` if `(owner, slug)`
    /// is taken.
    async fn insert_group(&self, owner: &str, draft: GroupDraft) -> StoreResult<Group>;
    /// Exact `(owner, slug)` lookup, regardless of `active`.
    async fn group_by_slug(&self, owner: &str, slug: &str) -> StoreResult<Group>;
    /// Owner-checked lookup by identity.
    async fn group_by_id(&self, owner: &str, id: i64) -> StoreResult<Group>;
    /// All groups of an owner, in creation order.
    async fn groups_for_owner(&self, owner: &str) -> StoreResult<Vec<Group>>;
    /// Apply a partial update. Re-checks slug uniqueness when the slug
    /// changes; `NotFound` if the record is absent or owned by someone else.
    async fn update_group(&self, owner: &str, id: i64, patch: GroupPatch) -> StoreResult<Group>;
    /// Delete a group row. `Conflict` while child endpoints still reference it.
    async fn delete_group(&self, owner: &str, id: i64) -> StoreResult<()>;

    /// Insert an endpoint, allocating its identity. `NotFound` if the group
    /// does not exist, `Conflict` on a duplicate `(group_id, path, method)`.
    async fn insert_endpoint(
        &self,
        group_id: i64,
        path: &str,
        method: HttpMethod,
    ) -> StoreResult<Endpoint>;
    async fn endpoint_by_id(&self, id: i64) -> StoreResult<Endpoint>;
    /// Exact `(group_id, path, method)` lookup.
    async fn endpoint_by_key(
        &self,
        group_id: i64,
        path: &str,
        method: HttpMethod,
    ) -> StoreResult<Endpoint>;
    /// Method-agnostic `(group_id, path)` lookup; the lowest endpoint id wins
    /// so repeated lookups are deterministic.
    async fn endpoint_by_path(&self, group_id: i64, path: &str) -> StoreResult<Endpoint>;
    /// All endpoints of a group, in creation order.
    async fn endpoints_for_group(&self, group_id: i64) -> StoreResult<Vec<Endpoint>>;
    async fn delete_endpoint(&self, id: i64) -> StoreResult<()>;
}

/// Schemaless per-namespace document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Atomically create the namespace if absent. Idempotent and race-safe:
    /// concurrent first writers must all succeed. Returns `true` when the
    /// namespace was newly created.
    async fn ensure_namespace(&self, namespace: &str) -> StoreResult<bool>;
    async fn namespace_exists(&self, namespace: &str) -> StoreResult<bool>;
    /// Upsert the document for `(namespace, endpoint_id)`, stamping
    /// `updated_at` and, on first insert, `created_at`. Never fails on
    /// document shape.
    async fn put(&self, namespace: &str, endpoint_id: i64, data: Value) -> StoreResult<Payload>;
    /// `NotFound` if absent; the steady-state signal for a draft endpoint or
    /// an inconsistency.
    async fn get(&self, namespace: &str, endpoint_id: i64) -> StoreResult<Payload>;
    /// Idempotent delete; absence is not an error.
    async fn delete(&self, namespace: &str, endpoint_id: i64) -> StoreResult<()>;
    /// Snapshot of endpoint ids with a stored document, used by the
    /// reconciliation sweep.
    async fn document_ids(&self, namespace: &str) -> StoreResult<Vec<i64>>;
}
