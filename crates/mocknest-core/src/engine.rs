//! Resolution engine: the orchestrator joining the relational index and the
//! payload store.
//!
//! The engine owns the two-step write (endpoint row, then payload document)
//! and its compensation path, the read-side join from a raw path string down
//! to a stored document, and the reconciliation sweep that surfaces endpoints
//! whose payload write never landed.

use crate::error::Error;
use crate::path::{self, MockPath, PathError};
use crate::payloads::PayloadStore;
use crate::registry::{EndpointRegistry, GroupRegistry};
use crate::store::{DocumentStore, IndexStore};
use crate::types::endpoint::{Endpoint, HttpMethod};
use crate::types::group::{Group, GroupDraft, GroupPatch};
use serde_json::Value;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Uniform message for every missing link during resolution, so callers
/// cannot tell an unknown owner from an unknown group or endpoint.
const UNRESOLVED: &str = "no mock is registered under this path";

/// Engine tuning knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upper bound for a single store round trip. An elapsed timeout
    /// surfaces as the retryable [`Error::StoreUnavailable`].
    pub op_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            op_timeout: Duration::from_secs(5),
        }
    }
}

/// Orchestrates path resolution and the dual-store write path.
///
/// Constructed once per process from the two store handles; handles are
/// passed explicitly and never reconstructed mid-request.
#[derive(Clone)]
pub struct Engine {
    groups: GroupRegistry,
    endpoints: EndpointRegistry,
    payloads: PayloadStore,
    config: EngineConfig,
}

impl Engine {
    pub fn new(index: Arc<dyn IndexStore>, documents: Arc<dyn DocumentStore>) -> Self {
        Self::with_config(index, documents, EngineConfig::default())
    }

    pub fn with_config(
        index: Arc<dyn IndexStore>,
        documents: Arc<dyn DocumentStore>,
        config: EngineConfig,
    ) -> Self {
        let payloads = PayloadStore::new(documents);
        Self {
            groups: GroupRegistry::new(index.clone()),
            endpoints: EndpointRegistry::new(index, payloads.clone()),
            payloads,
            config,
        }
    }

    /// Bound a store round trip by the configured timeout.
    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, Error>>,
    ) -> Result<T, Error> {
        match timeout(self.config.op_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(Error::StoreUnavailable(format!(
                "store call exceeded {:?}",
                self.config.op_timeout
            ))),
        }
    }

    fn uniform_not_found(err: Error) -> Error {
        match err {
            Error::NotFound(_) => Error::NotFound(UNRESOLVED.to_owned()),
            other => other,
        }
    }

    /// Register a mock endpoint with its payload document.
    ///
    /// Validation runs before any store is touched. The group must already
    /// exist; registration never creates groups implicitly. On success the
    /// endpoint is fully resolvable; if the payload write fails after the
    /// endpoint row was created, the endpoint stays draft and the caller
    /// receives the retryable [`Error::PartialWrite`] (complete it later via
    /// [`Engine::attach_payload`] or find it via
    /// [`Engine::reconcile_orphans`]).
    pub async fn register(
        &self,
        owner: &str,
        group_slug: &str,
        endpoint_path: &str,
        method: HttpMethod,
        document: Value,
    ) -> Result<i64, Error> {
        if !path::is_valid_segment(group_slug) {
            return Err(PathError::Malformed(group_slug.to_owned()).into());
        }
        path::validate(endpoint_path)?;

        let group = self.bounded(self.groups.get_by_slug_any(owner, group_slug)).await?;
        let endpoint = self
            .bounded(self.endpoints.create(group.id, endpoint_path, method))
            .await?;

        match self
            .bounded(self.payloads.put(owner, endpoint.id, document))
            .await
        {
            Ok(_) => Ok(endpoint.id),
            Err(err) => {
                tracing::warn!(
                    owner,
                    endpoint_id = endpoint.id,
                    error = %err,
                    "payload write failed after endpoint insert; endpoint left in draft state"
                );
                Err(Error::PartialWrite {
                    endpoint_id: endpoint.id,
                    source: Box::new(err),
                })
            }
        }
    }

    /// Resolve a full `owner/group-slug/endpoint-path` string to its stored
    /// document, returned verbatim.
    pub async fn resolve(&self, full_path: &str) -> Result<Value, Error> {
        let key = MockPath::parse(full_path)?;

        let group = self
            .bounded(self.groups.get_by_slug(&key.owner, &key.group_slug))
            .await
            .map_err(Self::uniform_not_found)?;
        let endpoint = self
            .bounded(self.endpoints.find_for_resolution(group.id, &key.endpoint_path))
            .await
            .map_err(Self::uniform_not_found)?;

        match self.bounded(self.payloads.get(&key.owner, endpoint.id)).await {
            Ok(payload) => Ok(payload.data),
            Err(Error::NotFound(_)) => {
                // A resolvable endpoint without a document means the two
                // stores disagree; report it as a defect, not a miss.
                tracing::error!(
                    owner = %key.owner,
                    endpoint_id = endpoint.id,
                    "resolved endpoint has no payload document"
                );
                Err(Error::Consistency {
                    owner: key.owner,
                    endpoint_id: endpoint.id,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Endpoint ids across the owner's groups that lack a payload document:
    /// drafts and partial-write leftovers.
    pub async fn reconcile_orphans(&self, owner: &str) -> Result<Vec<i64>, Error> {
        let stored: HashSet<i64> = if self.bounded(self.payloads.namespace_exists(owner)).await? {
            self.bounded(self.payloads.document_ids(owner))
                .await?
                .into_iter()
                .collect()
        } else {
            HashSet::new()
        };

        let mut orphans = Vec::new();
        for group in self.bounded(self.groups.list(owner)).await? {
            for endpoint in self.bounded(self.endpoints.list_for_group(group.id)).await? {
                if !stored.contains(&endpoint.id) {
                    orphans.push(endpoint.id);
                }
            }
        }
        orphans.sort_unstable();
        Ok(orphans)
    }

    /// Attach (or replace) the payload document of an existing endpoint.
    ///
    /// This is the second registration step as a standalone operation: it
    /// completes a draft endpoint after a partial write, and reconfigures a
    /// live endpoint's response at runtime. The endpoint must belong to one
    /// of the owner's groups.
    pub async fn attach_payload(
        &self,
        owner: &str,
        endpoint_id: i64,
        document: Value,
    ) -> Result<(), Error> {
        let endpoint = self.bounded(self.endpoints.get(endpoint_id)).await?;
        // An endpoint under someone else's group reads as absent, not as
        // forbidden, to avoid confirming its existence.
        self.bounded(self.groups.get(owner, endpoint.group_id))
            .await
            .map_err(|err| match err {
                Error::NotFound(_) => Error::NotFound(format!("endpoint {endpoint_id}")),
                other => other,
            })?;
        self.bounded(self.payloads.put(owner, endpoint_id, document))
            .await?;
        Ok(())
    }

    /// Create a group for the owner.
    pub async fn create_group(&self, owner: &str, draft: GroupDraft) -> Result<Group, Error> {
        self.bounded(self.groups.create(owner, draft)).await
    }

    /// All groups of the owner, in creation order.
    pub async fn list_groups(&self, owner: &str) -> Result<Vec<Group>, Error> {
        self.bounded(self.groups.list(owner)).await
    }

    /// Management view of one group together with its endpoints.
    pub async fn group_detail(
        &self,
        owner: &str,
        group_id: i64,
    ) -> Result<(Group, Vec<Endpoint>), Error> {
        let group = self.bounded(self.groups.get(owner, group_id)).await?;
        let endpoints = self.bounded(self.endpoints.list_for_group(group.id)).await?;
        Ok((group, endpoints))
    }

    /// Partially update a group.
    pub async fn update_group(
        &self,
        owner: &str,
        group_id: i64,
        patch: GroupPatch,
    ) -> Result<Group, Error> {
        self.bounded(self.groups.update(owner, group_id, patch)).await
    }

    /// Delete a group and cascade to its endpoints and their payloads.
    ///
    /// Children go first, payload before row for each endpoint; a failure
    /// partway leaves the remainder intact and retryable, never an orphaned
    /// endpoint under a deleted group.
    pub async fn delete_group(&self, owner: &str, group_id: i64) -> Result<(), Error> {
        let group = self.bounded(self.groups.get(owner, group_id)).await?;
        for endpoint in self.bounded(self.endpoints.list_for_group(group.id)).await? {
            self.bounded(self.endpoints.delete_cascade(owner, endpoint.id))
                .await?;
        }
        self.bounded(self.groups.delete(owner, group.id)).await
    }

    /// Delete one endpoint (and its payload) addressed the way it was
    /// registered.
    pub async fn delete_endpoint(
        &self,
        owner: &str,
        group_slug: &str,
        endpoint_path: &str,
        method: HttpMethod,
    ) -> Result<(), Error> {
        if !path::is_valid_segment(group_slug) {
            return Err(PathError::Malformed(group_slug.to_owned()).into());
        }
        path::validate(endpoint_path)?;

        let group = self.bounded(self.groups.get_by_slug_any(owner, group_slug)).await?;
        let endpoint = self
            .bounded(
                self.endpoints
                    .get_by_group_and_path(group.id, endpoint_path, method),
            )
            .await?;
        self.bounded(self.endpoints.delete_cascade(owner, endpoint.id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::{MemoryDocumentStore, MemoryIndexStore};
    use crate::store::{StoreError, StoreResult};
    use crate::types::payload::Payload;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn engine() -> Engine {
        Engine::new(
            Arc::new(MemoryIndexStore::new()),
            Arc::new(MemoryDocumentStore::new()),
        )
    }

    fn shop_draft() -> GroupDraft {
        GroupDraft {
            name: "Shop".to_owned(),
            slug: "shop".to_owned(),
            active: true,
            description: None,
        }
    }

    async fn engine_with_group() -> Engine {
        let engine = engine();
        engine.create_group("alice", shop_draft()).await.unwrap();
        engine
    }

    /// Document store whose writes can be switched to fail, for driving the
    /// compensation path.
    struct FailingDocumentStore {
        inner: MemoryDocumentStore,
        fail_puts: AtomicBool,
    }

    impl FailingDocumentStore {
        fn new() -> Self {
            Self {
                inner: MemoryDocumentStore::new(),
                fail_puts: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl DocumentStore for FailingDocumentStore {
        async fn ensure_namespace(&self, namespace: &str) -> StoreResult<bool> {
            self.inner.ensure_namespace(namespace).await
        }

        async fn namespace_exists(&self, namespace: &str) -> StoreResult<bool> {
            self.inner.namespace_exists(namespace).await
        }

        async fn put(&self, namespace: &str, endpoint_id: i64, data: Value) -> StoreResult<Payload> {
            if self.fail_puts.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable("injected put failure".to_owned()));
            }
            self.inner.put(namespace, endpoint_id, data).await
        }

        async fn get(&self, namespace: &str, endpoint_id: i64) -> StoreResult<Payload> {
            self.inner.get(namespace, endpoint_id).await
        }

        async fn delete(&self, namespace: &str, endpoint_id: i64) -> StoreResult<()> {
            self.inner.delete(namespace, endpoint_id).await
        }

        async fn document_ids(&self, namespace: &str) -> StoreResult<Vec<i64>> {
            self.inner.document_ids(namespace).await
        }
    }

    /// Document store that never answers reads, for driving the timeout path.
    struct StalledDocumentStore {
        inner: MemoryDocumentStore,
    }

    #[async_trait]
    impl DocumentStore for StalledDocumentStore {
        async fn ensure_namespace(&self, namespace: &str) -> StoreResult<bool> {
            self.inner.ensure_namespace(namespace).await
        }

        async fn namespace_exists(&self, namespace: &str) -> StoreResult<bool> {
            self.inner.namespace_exists(namespace).await
        }

        async fn put(&self, namespace: &str, endpoint_id: i64, data: Value) -> StoreResult<Payload> {
            self.inner.put(namespace, endpoint_id, data).await
        }

        async fn get(&self, _namespace: &str, _endpoint_id: i64) -> StoreResult<Payload> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            unreachable!("the engine times out first")
        }

        async fn delete(&self, namespace: &str, endpoint_id: i64) -> StoreResult<()> {
            self.inner.delete(namespace, endpoint_id).await
        }

        async fn document_ids(&self, namespace: &str) -> StoreResult<Vec<i64>> {
            self.inner.document_ids(namespace).await
        }
    }

    #[tokio::test]
    async fn register_then_resolve_round_trips_the_document() {
        let engine = engine_with_group().await;
        let document = json!({"x": 1, "nested": {"list": [1, 2, 3]}});
        engine
            .register("alice", "shop", "items", HttpMethod::Get, document.clone())
            .await
            .unwrap();

        assert_eq!(engine.resolve("alice/shop/items").await.unwrap(), document);
    }

    #[tokio::test]
    async fn trailing_slash_spellings_resolve_identically() {
        let engine = engine_with_group().await;
        engine
            .register("alice", "shop", "items", HttpMethod::Get, json!({"x": 1}))
            .await
            .unwrap();

        let bare = engine.resolve("alice/shop/items").await.unwrap();
        let slashed = engine.resolve("alice/shop/items/").await.unwrap();
        assert_eq!(bare, slashed);
    }

    #[tokio::test]
    async fn deep_endpoint_paths_resolve() {
        let engine = engine_with_group().await;
        engine
            .register("alice", "shop", "v1/items/42", HttpMethod::Get, json!({"deep": true}))
            .await
            .unwrap();

        assert_eq!(
            engine.resolve("alice/shop/v1/items/42").await.unwrap(),
            json!({"deep": true})
        );
    }

    #[tokio::test]
    async fn register_requires_an_existing_group() {
        let engine = engine();
        let err = engine
            .register("alice", "ghost", "items", HttpMethod::Get, json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn register_validates_before_touching_stores() {
        let engine = engine_with_group().await;
        let err = engine
            .register("alice", "sh/op", "items", HttpMethod::Get, json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));

        let err = engine
            .register("alice", "shop", "a//b", HttpMethod::Get, json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));

        // Nothing was written.
        assert!(engine.reconcile_orphans("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_registration_is_a_conflict() {
        let engine = engine_with_group().await;
        engine
            .register("alice", "shop", "items", HttpMethod::Get, json!({"v": 1}))
            .await
            .unwrap();

        // Re-submitting a fully succeeded registration must not double-create.
        let err = engine
            .register("alice", "shop", "items", HttpMethod::Get, json!({"v": 2}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));

        // The first write's document is untouched.
        assert_eq!(
            engine.resolve("alice/shop/items").await.unwrap(),
            json!({"v": 1})
        );
    }

    #[tokio::test]
    async fn method_strings_normalize_to_one_endpoint() {
        let engine = engine_with_group().await;
        let method: HttpMethod = "get".parse().unwrap();
        engine
            .register("alice", "shop", "items", method, json!({}))
            .await
            .unwrap();

        let method: HttpMethod = "GET".parse().unwrap();
        let err = engine
            .register("alice", "shop", "items", method, json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn same_path_different_method_is_distinct() {
        let engine = engine_with_group().await;
        engine
            .register("alice", "shop", "items", HttpMethod::Get, json!({"m": "get"}))
            .await
            .unwrap();
        engine
            .register("alice", "shop", "items", HttpMethod::Post, json!({"m": "post"}))
            .await
            .unwrap();

        // Resolution is method-agnostic and deterministic: the first
        // registration wins.
        assert_eq!(
            engine.resolve("alice/shop/items").await.unwrap(),
            json!({"m": "get"})
        );
    }

    #[tokio::test]
    async fn missing_links_report_one_uniform_not_found() {
        let engine = engine_with_group().await;
        engine
            .register("alice", "shop", "items", HttpMethod::Get, json!({}))
            .await
            .unwrap();

        let unknown_owner = engine.resolve("mallory/shop/items").await.unwrap_err();
        let unknown_group = engine.resolve("alice/blog/items").await.unwrap_err();
        let unknown_endpoint = engine.resolve("alice/shop/missing").await.unwrap_err();

        let messages: Vec<String> = [unknown_owner, unknown_group, unknown_endpoint]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(messages[0], messages[1]);
        assert_eq!(messages[1], messages[2]);
    }

    #[tokio::test]
    async fn malformed_and_shallow_paths_are_invalid_not_missing() {
        let engine = engine_with_group().await;
        assert!(matches!(
            engine.resolve("alice//items").await.unwrap_err(),
            Error::InvalidPath(PathError::Malformed(_))
        ));
        assert!(matches!(
            engine.resolve("alice/shop").await.unwrap_err(),
            Error::InvalidPath(PathError::TooShallow { .. })
        ));
    }

    #[tokio::test]
    async fn inactive_groups_do_not_resolve_but_stay_manageable() {
        let engine = engine_with_group().await;
        let groups = engine.list_groups("alice").await.unwrap();
        let group_id = groups[0].id;
        engine
            .register("alice", "shop", "items", HttpMethod::Get, json!({}))
            .await
            .unwrap();

        engine
            .update_group(
                "alice",
                group_id,
                GroupPatch {
                    active: Some(false),
                    ..GroupPatch::default()
                },
            )
            .await
            .unwrap();

        assert!(matches!(
            engine.resolve("alice/shop/items").await.unwrap_err(),
            Error::NotFound(_)
        ));
        // The owner still sees and manages the group.
        let (group, endpoints) = engine.group_detail("alice", group_id).await.unwrap();
        assert!(!group.active);
        assert_eq!(endpoints.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_identical_registrations_have_one_winner() {
        let engine = Arc::new(engine_with_group().await);

        let mut handles = Vec::new();
        for n in 0..8 {
            let engine = engine.clone();
            handles.push(tokio::spawn(async move {
                engine
                    .register("alice", "shop", "items", HttpMethod::Get, json!({"n": n}))
                    .await
            }));
        }

        let mut won = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => won += 1,
                Err(Error::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }
        assert_eq!(won, 1);
        assert_eq!(conflicts, 7);
        assert!(engine.reconcile_orphans("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_payload_write_leaves_a_reconcilable_draft() {
        let documents = Arc::new(FailingDocumentStore::new());
        let engine = Engine::new(Arc::new(MemoryIndexStore::new()), documents.clone());
        engine.create_group("alice", shop_draft()).await.unwrap();

        documents.fail_puts.store(true, Ordering::SeqCst);
        let err = engine
            .register("alice", "shop", "items", HttpMethod::Get, json!({"x": 1}))
            .await
            .unwrap_err();
        let endpoint_id = match &err {
            Error::PartialWrite { endpoint_id, .. } => *endpoint_id,
            other => panic!("expected PartialWrite, got {other:?}"),
        };
        assert!(err.is_retryable());

        // Draft endpoints never resolve to a document; a draft reaching the
        // payload fetch is exactly the inconsistency the error names.
        assert!(matches!(
            engine.resolve("alice/shop/items").await.unwrap_err(),
            Error::Consistency { .. }
        ));

        // The sweep surfaces the draft.
        assert_eq!(
            engine.reconcile_orphans("alice").await.unwrap(),
            vec![endpoint_id]
        );

        // Retrying only the payload write completes the registration.
        documents.fail_puts.store(false, Ordering::SeqCst);
        engine
            .attach_payload("alice", endpoint_id, json!({"x": 1}))
            .await
            .unwrap();
        assert_eq!(
            engine.resolve("alice/shop/items").await.unwrap(),
            json!({"x": 1})
        );
        assert!(engine.reconcile_orphans("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn resolved_endpoint_without_document_is_a_consistency_error() {
        let index = Arc::new(MemoryIndexStore::new());
        let documents = Arc::new(MemoryDocumentStore::new());
        let engine = Engine::new(index, documents.clone());
        engine.create_group("alice", shop_draft()).await.unwrap();
        let endpoint_id = engine
            .register("alice", "shop", "items", HttpMethod::Get, json!({}))
            .await
            .unwrap();

        // Remove the document out-of-band to force the impossible state.
        documents.delete("alice", endpoint_id).await.unwrap();

        let err = engine.resolve("alice/shop/items").await.unwrap_err();
        assert!(matches!(err, Error::Consistency { endpoint_id: id, .. } if id == endpoint_id));
    }

    #[tokio::test]
    async fn attach_payload_requires_owner_and_endpoint() {
        let engine = engine_with_group().await;
        let endpoint_id = engine
            .register("alice", "shop", "items", HttpMethod::Get, json!({"v": 1}))
            .await
            .unwrap();

        // Unknown endpoint.
        assert!(matches!(
            engine.attach_payload("alice", 999, json!({})).await.unwrap_err(),
            Error::NotFound(_)
        ));
        // Someone else's endpoint.
        assert!(matches!(
            engine
                .attach_payload("mallory", endpoint_id, json!({}))
                .await
                .unwrap_err(),
            Error::NotFound(_)
        ));

        // The owner can reconfigure the response at runtime.
        engine
            .attach_payload("alice", endpoint_id, json!({"v": 2}))
            .await
            .unwrap();
        assert_eq!(
            engine.resolve("alice/shop/items").await.unwrap(),
            json!({"v": 2})
        );
    }

    #[tokio::test]
    async fn delete_group_cascades_to_endpoints_and_payloads() {
        let index = Arc::new(MemoryIndexStore::new());
        let documents = Arc::new(MemoryDocumentStore::new());
        let engine = Engine::new(index, documents.clone());
        let group = engine.create_group("alice", shop_draft()).await.unwrap();
        engine
            .register("alice", "shop", "items", HttpMethod::Get, json!({}))
            .await
            .unwrap();
        engine
            .register("alice", "shop", "orders", HttpMethod::Post, json!({}))
            .await
            .unwrap();

        engine.delete_group("alice", group.id).await.unwrap();

        assert!(engine.list_groups("alice").await.unwrap().is_empty());
        assert!(documents.document_ids("alice").await.unwrap().is_empty());
        assert!(matches!(
            engine.resolve("alice/shop/items").await.unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn delete_endpoint_removes_row_and_document() {
        let engine = engine_with_group().await;
        engine
            .register("alice", "shop", "items", HttpMethod::Get, json!({}))
            .await
            .unwrap();

        engine
            .delete_endpoint("alice", "shop", "items", HttpMethod::Get)
            .await
            .unwrap();

        assert!(matches!(
            engine.resolve("alice/shop/items").await.unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(engine.reconcile_orphans("alice").await.unwrap().is_empty());

        // Deleting again reports the endpoint as gone.
        assert!(matches!(
            engine
                .delete_endpoint("alice", "shop", "items", HttpMethod::Get)
                .await
                .unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_store_round_trips_surface_as_unavailable() {
        let documents = Arc::new(StalledDocumentStore {
            inner: MemoryDocumentStore::new(),
        });
        let engine = Engine::with_config(
            Arc::new(MemoryIndexStore::new()),
            documents,
            EngineConfig {
                op_timeout: Duration::from_millis(100),
            },
        );
        engine.create_group("alice", shop_draft()).await.unwrap();
        engine
            .register("alice", "shop", "items", HttpMethod::Get, json!({}))
            .await
            .unwrap();

        let err = engine.resolve("alice/shop/items").await.unwrap_err();
        assert!(matches!(err, Error::StoreUnavailable(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn scenario_walkthrough() {
        let engine = engine();

        // 1. Create the group.
        let group = engine.create_group("alice", shop_draft()).await.unwrap();
        assert!(group.id >= 1);

        // 2. Register an endpoint with its document.
        let endpoint_id = engine
            .register("alice", "shop", "items", HttpMethod::Get, json!({"x": 1}))
            .await
            .unwrap();
        assert!(endpoint_id >= 1);

        // 3. Resolution returns the document verbatim.
        assert_eq!(
            engine.resolve("alice/shop/items").await.unwrap(),
            json!({"x": 1})
        );

        // 4. Unknown endpoint path.
        assert!(matches!(
            engine.resolve("alice/shop/missing").await.unwrap_err(),
            Error::NotFound(_)
        ));

        // 5. Duplicate slug.
        let err = engine
            .create_group(
                "alice",
                GroupDraft {
                    name: "Shop2".to_owned(),
                    ..shop_draft()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));

        // 6. Empty segment.
        assert!(matches!(
            engine.resolve("alice//items").await.unwrap_err(),
            Error::InvalidPath(_)
        ));
    }
}
