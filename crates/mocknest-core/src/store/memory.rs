//! In-memory store implementations.
//!
//! Both stores keep their records in `HashMap`s behind a single
//! `tokio::sync::RwLock`: reads run concurrently, and every mutation takes
//! the write lock so a uniqueness check and its insert happen atomically.
//! Nothing is durable; state is lost on process restart. Referential
//! integrity mirrors what a relational backend would enforce with foreign
//! keys: endpoints cannot be inserted under a missing group, and a group with
//! endpoints cannot be deleted.

use super::{DocumentStore, IndexStore, StoreError, StoreResult};
use crate::types::endpoint::{Endpoint, HttpMethod};
use crate::types::group::{Group, GroupDraft, GroupPatch};
use crate::types::payload::Payload;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug)]
struct IndexInner {
    groups: HashMap<i64, Group>,
    endpoints: HashMap<i64, Endpoint>,
    next_group_id: i64,
    next_endpoint_id: i64,
}

impl IndexInner {
    fn new() -> Self {
        Self {
            groups: HashMap::new(),
            endpoints: HashMap::new(),
            next_group_id: 1,
            next_endpoint_id: 1,
        }
    }

    fn slug_taken(&self, owner: &str, slug: &str, except: Option<i64>) -> bool {
        self.groups
            .values()
            .any(|g| g.owner == owner && g.slug == slug && Some(g.id) != except)
    }
}

/// In-memory relational index of groups and endpoints.
#[derive(Debug, Clone)]
pub struct MemoryIndexStore {
    inner: Arc<RwLock<IndexInner>>,
}

impl MemoryIndexStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(IndexInner::new())),
        }
    }
}

impl Default for MemoryIndexStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IndexStore for MemoryIndexStore {
    async fn insert_group(&self, owner: &str, draft: GroupDraft) -> StoreResult<Group> {
        let mut inner = self.inner.write().await;
        if inner.slug_taken(owner, &draft.slug, None) {
            return Err(StoreError::Conflict(format!(
                "group slug {:?} already exists for this owner",
                draft.slug
            )));
        }
        let id = inner.next_group_id;
        inner.next_group_id += 1;
        let now = Utc::now();
        let group = Group {
            id,
            owner: owner.to_owned(),
            name: draft.name,
            slug: draft.slug,
            active: draft.active,
            description: draft.description,
            created_at: now,
            updated_at: now,
        };
        inner.groups.insert(id, group.clone());
        Ok(group)
    }

    async fn group_by_slug(&self, owner: &str, slug: &str) -> StoreResult<Group> {
        let inner = self.inner.read().await;
        inner
            .groups
            .values()
            .find(|g| g.owner == owner && g.slug == slug)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("group {slug:?}")))
    }

    async fn group_by_id(&self, owner: &str, id: i64) -> StoreResult<Group> {
        let inner = self.inner.read().await;
        inner
            .groups
            .get(&id)
            .filter(|g| g.owner == owner)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("group {id}")))
    }

    async fn groups_for_owner(&self, owner: &str) -> StoreResult<Vec<Group>> {
        let inner = self.inner.read().await;
        let mut groups: Vec<Group> = inner
            .groups
            .values()
            .filter(|g| g.owner == owner)
            .cloned()
            .collect();
        groups.sort_by_key(|g| g.id);
        Ok(groups)
    }

    async fn update_group(&self, owner: &str, id: i64, patch: GroupPatch) -> StoreResult<Group> {
        let mut inner = self.inner.write().await;
        let current = inner
            .groups
            .get(&id)
            .filter(|g| g.owner == owner)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("group {id}")))?;
        if let Some(slug) = &patch.slug {
            if *slug != current.slug && inner.slug_taken(owner, slug, Some(id)) {
                return Err(StoreError::Conflict(format!(
                    "group slug {slug:?} already exists for this owner"
                )));
            }
        }
        let group = inner.groups.get_mut(&id).expect("checked above");
        if let Some(name) = patch.name {
            group.name = name;
        }
        if let Some(slug) = patch.slug {
            group.slug = slug;
        }
        if let Some(active) = patch.active {
            group.active = active;
        }
        if let Some(description) = patch.description {
            group.description = Some(description);
        }
        group.updated_at = Utc::now();
        Ok(group.clone())
    }

    async fn delete_group(&self, owner: &str, id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        if !inner
            .groups
            .get(&id)
            .is_some_and(|g| g.owner == owner)
        {
            return Err(StoreError::NotFound(format!("group {id}")));
        }
        if inner.endpoints.values().any(|e| e.group_id == id) {
            return Err(StoreError::Conflict(format!(
                "group {id} still has endpoints"
            )));
        }
        inner.groups.remove(&id);
        Ok(())
    }

    async fn insert_endpoint(
        &self,
        group_id: i64,
        path: &str,
        method: HttpMethod,
    ) -> StoreResult<Endpoint> {
        let mut inner = self.inner.write().await;
        if !inner.groups.contains_key(&group_id) {
            return Err(StoreError::NotFound(format!("group {group_id}")));
        }
        let duplicate = inner
            .endpoints
            .values()
            .any(|e| e.group_id == group_id && e.path == path && e.method == method);
        if duplicate {
            return Err(StoreError::Conflict(format!(
                "endpoint {method} {path:?} already exists in group {group_id}"
            )));
        }
        let id = inner.next_endpoint_id;
        inner.next_endpoint_id += 1;
        let now = Utc::now();
        let endpoint = Endpoint {
            id,
            group_id,
            path: path.to_owned(),
            method,
            created_at: now,
            updated_at: now,
        };
        inner.endpoints.insert(id, endpoint.clone());
        Ok(endpoint)
    }

    async fn endpoint_by_id(&self, id: i64) -> StoreResult<Endpoint> {
        let inner = self.inner.read().await;
        inner
            .endpoints
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("endpoint {id}")))
    }

    async fn endpoint_by_key(
        &self,
        group_id: i64,
        path: &str,
        method: HttpMethod,
    ) -> StoreResult<Endpoint> {
        let inner = self.inner.read().await;
        inner
            .endpoints
            .values()
            .find(|e| e.group_id == group_id && e.path == path && e.method == method)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("endpoint {method} {path:?}")))
    }

    async fn endpoint_by_path(&self, group_id: i64, path: &str) -> StoreResult<Endpoint> {
        let inner = self.inner.read().await;
        inner
            .endpoints
            .values()
            .filter(|e| e.group_id == group_id && e.path == path)
            .min_by_key(|e| e.id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("endpoint {path:?}")))
    }

    async fn endpoints_for_group(&self, group_id: i64) -> StoreResult<Vec<Endpoint>> {
        let inner = self.inner.read().await;
        let mut endpoints: Vec<Endpoint> = inner
            .endpoints
            .values()
            .filter(|e| e.group_id == group_id)
            .cloned()
            .collect();
        endpoints.sort_by_key(|e| e.id);
        Ok(endpoints)
    }

    async fn delete_endpoint(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner
            .endpoints
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("endpoint {id}")))
    }
}

/// In-memory document store with one partition per namespace.
#[derive(Debug, Clone)]
pub struct MemoryDocumentStore {
    namespaces: Arc<RwLock<HashMap<String, HashMap<i64, Payload>>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            namespaces: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn ensure_namespace(&self, namespace: &str) -> StoreResult<bool> {
        let mut namespaces = self.namespaces.write().await;
        // entry() is the atomic create-if-absent primitive here; racing first
        // writers both land in the same partition.
        let created = !namespaces.contains_key(namespace);
        namespaces.entry(namespace.to_owned()).or_default();
        Ok(created)
    }

    async fn namespace_exists(&self, namespace: &str) -> StoreResult<bool> {
        let namespaces = self.namespaces.read().await;
        Ok(namespaces.contains_key(namespace))
    }

    async fn put(&self, namespace: &str, endpoint_id: i64, data: Value) -> StoreResult<Payload> {
        let mut namespaces = self.namespaces.write().await;
        let partition = namespaces.entry(namespace.to_owned()).or_default();
        let now = Utc::now();
        let payload = match partition.entry(endpoint_id) {
            Entry::Occupied(mut entry) => {
                let payload = entry.get_mut();
                payload.data = data;
                payload.updated_at = now;
                payload.clone()
            }
            Entry::Vacant(entry) => entry
                .insert(Payload {
                    namespace: namespace.to_owned(),
                    endpoint_id,
                    data,
                    created_at: now,
                    updated_at: now,
                })
                .clone(),
        };
        Ok(payload)
    }

    async fn get(&self, namespace: &str, endpoint_id: i64) -> StoreResult<Payload> {
        let namespaces = self.namespaces.read().await;
        namespaces
            .get(namespace)
            .and_then(|partition| partition.get(&endpoint_id))
            .cloned()
            .ok_or_else(|| {
                StoreError::NotFound(format!("document {endpoint_id} in {namespace:?}"))
            })
    }

    async fn delete(&self, namespace: &str, endpoint_id: i64) -> StoreResult<()> {
        let mut namespaces = self.namespaces.write().await;
        if let Some(partition) = namespaces.get_mut(namespace) {
            partition.remove(&endpoint_id);
        }
        Ok(())
    }

    async fn document_ids(&self, namespace: &str) -> StoreResult<Vec<i64>> {
        let namespaces = self.namespaces.read().await;
        let mut ids: Vec<i64> = namespaces
            .get(namespace)
            .map(|partition| partition.keys().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        Ok(ids)
    }
}
