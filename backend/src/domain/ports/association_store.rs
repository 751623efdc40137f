//! Port for the user/item association store and its error taxonomy.
//!
//! Each operation is one transaction against the backing database. Adapters
//! classify driver failures into [`AssociationStoreError`] before returning so
//! the domain can decide what to retry without inspecting driver types.

use async_trait::async_trait;

use crate::domain::{ItemId, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by association store adapters.
    pub enum AssociationStoreError {
        /// Input violated a storage constraint.
        Validation { message: String } =>
            "association store rejected input: {message}",
        /// A uniqueness constraint was violated.
        Conflict { message: String } =>
            "association store conflict: {message}",
        /// A referenced user does not exist.
        NotFound { message: String } =>
            "association store lookup failed: {message}",
        /// The database could not be reached or aborted the transaction.
        Connection { message: String } =>
            "association store connection failed: {message}",
        /// The database or the caller's deadline cut the operation short.
        Timeout { message: String } =>
            "association store operation timed out: {message}",
        /// The database failed in a way retrying will not fix.
        Query { message: String } =>
            "association store query failed: {message}",
    }
}

impl AssociationStoreError {
    /// Whether the failure is expected to clear on retry.
    ///
    /// Only connection loss, contention aborts, and timeouts qualify;
    /// constraint violations and malformed input never do.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Timeout { .. })
    }
}

/// Port for creating users, associating items, and listing a user's items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssociationStore: Send + Sync {
    /// Insert a new user.
    ///
    /// Fails with `Conflict` when the id is taken.
    async fn create_user(&self, user: &User) -> Result<(), AssociationStoreError>;

    /// Associate an item with an existing user.
    ///
    /// Fails with `NotFound` when the user does not exist. Associating the
    /// same pair again succeeds without writing a second row.
    async fn add_item_to_user(
        &self,
        user_id: &UserId,
        item_id: &ItemId,
    ) -> Result<(), AssociationStoreError>;

    /// List the user's items in insertion order.
    ///
    /// Returns an empty list for a user without items and `NotFound` for an
    /// unknown user.
    async fn user_items(&self, user_id: &UserId) -> Result<Vec<ItemId>, AssociationStoreError>;
}
