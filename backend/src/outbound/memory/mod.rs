//! In-process association store.
//!
//! Mirrors the PostgreSQL adapter's observable behaviour (conflicts, missing
//! users, idempotent creates and associations, insertion order) without a
//! database, so
//! facade behaviour can be exercised in tests and local tooling.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{AssociationStore, AssociationStoreError};
use crate::domain::{ItemId, User, UserId, UserName};

#[derive(Debug, Clone)]
struct StoredUser {
    name: UserName,
    items: Vec<ItemId>,
}

/// Association store backed by a mutex-guarded map.
///
/// Clones share the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssociationStore {
    users: Arc<Mutex<HashMap<UserId, StoredUser>>>,
}

impl InMemoryAssociationStore {
    fn lock(&self) -> MutexGuard<'_, HashMap<UserId, StoredUser>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn missing_user(user_id: &UserId) -> AssociationStoreError {
        AssociationStoreError::not_found(format!("user {user_id} does not exist"))
    }
}

#[async_trait]
impl AssociationStore for InMemoryAssociationStore {
    async fn create_user(&self, user: &User) -> Result<(), AssociationStoreError> {
        let mut users = self.lock();
        match users.get(user.id()) {
            // An identical row means an earlier attempt already landed.
            Some(existing) if existing.name == *user.name() => Ok(()),
            Some(_) => Err(AssociationStoreError::conflict(format!(
                "user {} already exists",
                user.id()
            ))),
            None => {
                users.insert(
                    user.id().clone(),
                    StoredUser {
                        name: user.name().clone(),
                        items: Vec::new(),
                    },
                );
                Ok(())
            }
        }
    }

    async fn add_item_to_user(
        &self,
        user_id: &UserId,
        item_id: &ItemId,
    ) -> Result<(), AssociationStoreError> {
        let mut users = self.lock();
        let items = &mut users
            .get_mut(user_id)
            .ok_or_else(|| Self::missing_user(user_id))?
            .items;
        if !items.contains(item_id) {
            items.push(item_id.clone());
        }
        Ok(())
    }

    async fn user_items(&self, user_id: &UserId) -> Result<Vec<ItemId>, AssociationStoreError> {
        self.lock()
            .get(user_id)
            .map(|stored| stored.items.clone())
            .ok_or_else(|| Self::missing_user(user_id))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn store() -> InMemoryAssociationStore {
        InMemoryAssociationStore::default()
    }

    fn user(id: &str) -> User {
        named_user(id, "alice")
    }

    fn named_user(id: &str, name: &str) -> User {
        User::try_from_strings(id, name).expect("valid user")
    }

    fn item(id: &str) -> ItemId {
        ItemId::new(id).expect("valid item")
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_user_ids_with_another_name_conflict(store: InMemoryAssociationStore) {
        store.create_user(&user("u-1")).await.expect("first insert");
        let err = store
            .create_user(&named_user("u-1", "bob"))
            .await
            .expect_err("second insert conflicts");
        assert!(matches!(err, AssociationStoreError::Conflict { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn repeating_an_identical_create_succeeds(store: InMemoryAssociationStore) {
        let owner = user("u-1");
        store.create_user(&owner).await.expect("first insert");
        store
            .add_item_to_user(owner.id(), &item("sword-01"))
            .await
            .expect("associate");
        store.create_user(&owner).await.expect("replayed insert");
        let items = store.user_items(owner.id()).await.expect("list");
        assert_eq!(items, vec![item("sword-01")], "replay keeps associations");
    }

    #[rstest]
    #[tokio::test]
    async fn associations_are_idempotent_and_ordered(store: InMemoryAssociationStore) {
        let owner = user("u-1");
        store.create_user(&owner).await.expect("insert user");
        for raw in ["sword-01", "shield-02", "sword-01"] {
            store
                .add_item_to_user(owner.id(), &item(raw))
                .await
                .expect("associate");
        }
        let items = store.user_items(owner.id()).await.expect("list");
        assert_eq!(items, vec![item("sword-01"), item("shield-02")]);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_users_are_not_found(store: InMemoryAssociationStore) {
        let missing = UserId::new("ghost").expect("valid id");
        let add = store.add_item_to_user(&missing, &item("item-1")).await;
        let list = store.user_items(&missing).await;
        assert!(matches!(add, Err(AssociationStoreError::NotFound { .. })));
        assert!(matches!(list, Err(AssociationStoreError::NotFound { .. })));
    }

    #[rstest]
    #[tokio::test]
    async fn clones_share_state(store: InMemoryAssociationStore) {
        let clone = store.clone();
        let owner = user("u-2");
        clone.create_user(&owner).await.expect("insert via clone");
        assert!(store.user_items(owner.id()).await.expect("visible").is_empty());
    }
}
