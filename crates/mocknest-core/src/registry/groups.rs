//! Group registry: owner-scoped group records.

use crate::error::Error;
use crate::path;
use crate::path::PathError;
use crate::store::IndexStore;
use crate::types::group::{Group, GroupDraft, GroupPatch};
use std::sync::Arc;

/// Owns all group mutations. Slug grammar is checked here, before the store
/// is touched; `(owner, slug)` uniqueness is enforced by the store itself.
#[derive(Clone)]
pub struct GroupRegistry {
    index: Arc<dyn IndexStore>,
}

impl GroupRegistry {
    pub fn new(index: Arc<dyn IndexStore>) -> Self {
        Self { index }
    }

    /// Create a group. The slug must be a single valid path segment.
    pub async fn create(&self, owner: &str, draft: GroupDraft) -> Result<Group, Error> {
        if !path::is_valid_segment(&draft.slug) {
            return Err(PathError::Malformed(draft.slug.clone()).into());
        }
        Ok(self.index.insert_group(owner, draft).await?)
    }

    /// Resolution-facing lookup: inactive groups are invisible and report the
    /// same `NotFound` as an absent one.
    pub async fn get_by_slug(&self, owner: &str, slug: &str) -> Result<Group, Error> {
        let group = self.index.group_by_slug(owner, slug).await?;
        if !group.active {
            return Err(Error::NotFound(format!("group {slug:?}")));
        }
        Ok(group)
    }

    /// Management-facing lookup by slug: the owner sees inactive groups too.
    pub async fn get_by_slug_any(&self, owner: &str, slug: &str) -> Result<Group, Error> {
        Ok(self.index.group_by_slug(owner, slug).await?)
    }

    /// Management-facing lookup by identity, owner-checked.
    pub async fn get(&self, owner: &str, id: i64) -> Result<Group, Error> {
        Ok(self.index.group_by_id(owner, id).await?)
    }

    /// All groups of the owner, stable by creation order.
    pub async fn list(&self, owner: &str) -> Result<Vec<Group>, Error> {
        Ok(self.index.groups_for_owner(owner).await?)
    }

    /// Apply a partial update. A changed slug is re-validated against the
    /// segment grammar and re-checked for uniqueness by the store.
    pub async fn update(&self, owner: &str, id: i64, patch: GroupPatch) -> Result<Group, Error> {
        if let Some(slug) = &patch.slug {
            if !path::is_valid_segment(slug) {
                return Err(PathError::Malformed(slug.clone()).into());
            }
        }
        Ok(self.index.update_group(owner, id, patch).await?)
    }

    /// Delete the group row. Child endpoints must already be gone; the engine
    /// runs the cascade before calling this.
    pub async fn delete(&self, owner: &str, id: i64) -> Result<(), Error> {
        Ok(self.index.delete_group(owner, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryIndexStore;

    fn registry() -> GroupRegistry {
        GroupRegistry::new(Arc::new(MemoryIndexStore::new()))
    }

    fn draft(slug: &str) -> GroupDraft {
        GroupDraft {
            name: "Shop".to_owned(),
            slug: slug.to_owned(),
            active: true,
            description: None,
        }
    }

    #[tokio::test]
    async fn create_rejects_invalid_slugs_before_the_store() {
        let registry = registry();
        for slug in ["", "sh/op", "sh op", "-shop", "shop/"] {
            let err = registry.create("alice", draft(slug)).await.unwrap_err();
            assert!(matches!(err, Error::InvalidPath(_)), "slug {slug:?}");
        }
        assert!(registry.list("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_conflict() {
        let registry = registry();
        registry.create("alice", draft("shop")).await.unwrap();
        let err = registry.create("alice", draft("shop")).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn inactive_groups_hide_from_resolution_but_not_management() {
        let registry = registry();
        let group = registry
            .create(
                "alice",
                GroupDraft {
                    active: false,
                    ..draft("shop")
                },
            )
            .await
            .unwrap();

        let err = registry.get_by_slug("alice", "shop").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        assert_eq!(registry.get_by_slug_any("alice", "shop").await.unwrap().id, group.id);
        assert_eq!(registry.get("alice", group.id).await.unwrap().id, group.id);
        assert_eq!(registry.list("alice").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_validates_new_slugs() {
        let registry = registry();
        let group = registry.create("alice", draft("shop")).await.unwrap();
        let err = registry
            .update(
                "alice",
                group.id,
                GroupPatch {
                    slug: Some("not/a/segment".to_owned()),
                    ..GroupPatch::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }

    #[tokio::test]
    async fn only_the_owner_can_mutate() {
        let registry = registry();
        let group = registry.create("alice", draft("shop")).await.unwrap();
        let err = registry
            .update(
                "mallory",
                group.id,
                GroupPatch {
                    name: Some("Hijacked".to_owned()),
                    ..GroupPatch::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let err = registry.delete("mallory", group.id).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
