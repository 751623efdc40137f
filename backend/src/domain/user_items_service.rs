//! User/item operation facade.
//!
//! [`UserItemsService`] is the narrow surface inbound adapters call. It
//! validates caller-supplied strings, runs each store call under the retry
//! policy and the caller's deadline, and maps store failures into the
//! transport-agnostic [`Error`].

use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{
    AssociationStore, AssociationStoreError, RandomUserIdGenerator, UserIdGenerator,
};
use crate::domain::{Deadline, Error, ItemId, Retrier, User, UserId, UserName};

fn map_store_error(error: AssociationStoreError) -> Error {
    match error {
        AssociationStoreError::Validation { message } => Error::invalid_request(message),
        AssociationStoreError::Conflict { message } => Error::conflict(message),
        AssociationStoreError::NotFound { message } => Error::not_found(message),
        AssociationStoreError::Connection { .. } => {
            Error::service_unavailable("storage is temporarily unavailable")
        }
        AssociationStoreError::Timeout { .. } => Error::timeout("storage operation timed out"),
        AssociationStoreError::Query { .. } => Error::internal("storage operation failed"),
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

fn parse_item_id(raw: &str) -> Result<ItemId, Error> {
    ItemId::new(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

/// Drive `operation` until it finishes or `deadline` passes. On expiry the
/// future is dropped, which abandons any open transaction.
async fn within_deadline<T, F>(
    operation_name: &'static str,
    deadline: Deadline,
    operation: F,
) -> Result<T, Error>
where
    F: Future<Output = Result<T, AssociationStoreError>>,
{
    match tokio::time::timeout_at(deadline.instant(), operation).await {
        Ok(result) => result.map_err(map_store_error),
        Err(_elapsed) => {
            debug!(operation = operation_name, "operation deadline expired");
            Err(map_store_error(AssociationStoreError::timeout(
                "deadline expired",
            )))
        }
    }
}

/// Facade over an [`AssociationStore`].
///
/// Cheap to clone; clones share the store, id generator, and retry runtime.
pub struct UserItemsService<S> {
    store: Arc<S>,
    ids: Arc<dyn UserIdGenerator>,
    retrier: Retrier,
}

impl<S> Clone for UserItemsService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            ids: Arc::clone(&self.ids),
            retrier: self.retrier.clone(),
        }
    }
}

impl<S> UserItemsService<S> {
    /// Facade with random UUID ids and the default retry policy.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_parts(store, Arc::new(RandomUserIdGenerator), Retrier::default())
    }

    /// Facade with explicit id generation and retry behaviour.
    pub fn with_parts(store: Arc<S>, ids: Arc<dyn UserIdGenerator>, retrier: Retrier) -> Self {
        Self {
            store,
            ids,
            retrier,
        }
    }
}

impl<S> UserItemsService<S>
where
    S: AssociationStore,
{
    /// Create a user with a freshly generated id.
    ///
    /// # Examples
    /// ```no_run
    /// # async fn demo() -> Result<(), user_items::domain::Error> {
    /// use std::sync::Arc;
    /// use std::time::Duration;
    /// use user_items::domain::{Deadline, UserItemsService};
    /// use user_items::outbound::memory::InMemoryAssociationStore;
    ///
    /// let service = UserItemsService::new(Arc::new(InMemoryAssociationStore::default()));
    /// let user = service
    ///     .create_user("alice", Deadline::after(Duration::from_secs(1)))
    ///     .await?;
    /// assert_eq!(user.name().as_ref(), "alice");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_user(&self, name: &str, deadline: Deadline) -> Result<User, Error> {
        let name = UserName::new(name).map_err(|err| Error::invalid_request(err.to_string()))?;
        let user = User::new(self.ids.next_id(), name);

        let store = &self.store;
        let user_ref = &user;
        within_deadline(
            "create_user",
            deadline,
            self.retrier
                .run("create_user", move || store.create_user(user_ref)),
        )
        .await?;

        Ok(user)
    }

    /// Associate `item_id` with `user_id`. Repeating an existing association
    /// succeeds.
    pub async fn add_item_to_user(
        &self,
        user_id: &str,
        item_id: &str,
        deadline: Deadline,
    ) -> Result<(), Error> {
        let user_id = parse_user_id(user_id)?;
        let item_id = parse_item_id(item_id)?;

        let store = &self.store;
        let (user_ref, item_ref) = (&user_id, &item_id);
        within_deadline(
            "add_item_to_user",
            deadline,
            self.retrier.run("add_item_to_user", move || {
                store.add_item_to_user(user_ref, item_ref)
            }),
        )
        .await
    }

    /// Items associated with `user_id`, oldest first.
    pub async fn user_items(&self, user_id: &str, deadline: Deadline) -> Result<Vec<ItemId>, Error> {
        let user_id = parse_user_id(user_id)?;

        let store = &self.store;
        let user_ref = &user_id;
        within_deadline(
            "user_items",
            deadline,
            self.retrier
                .run("user_items", move || store.user_items(user_ref)),
        )
        .await
    }
}

#[cfg(test)]
#[path = "user_items_service_tests.rs"]
mod tests;
