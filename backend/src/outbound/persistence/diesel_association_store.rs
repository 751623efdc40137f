//! PostgreSQL-backed `AssociationStore` implementation using Diesel ORM.
//!
//! Every operation checks out one pooled connection and runs in a single
//! transaction. Dropping an operation's future before it completes drops the
//! connection mid-transaction, so nothing is committed and the pool discards
//! the connection.
//!
//! Creating a user whose id already exists with the same name succeeds, so a
//! create whose acknowledgement was lost can be retried.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserItemRow, NewUserRow};
use super::pool::DbPool;
use super::schema::{user_items, users};
use crate::domain::ports::{AssociationStore, AssociationStoreError};
use crate::domain::{ItemId, User, UserId};

/// Diesel-backed implementation of the association store port.
#[derive(Clone)]
pub struct DieselAssociationStore {
    pool: DbPool,
}

impl DieselAssociationStore {
    /// Create a new store with the given connection pool.
    ///
    /// # Examples
    /// ```no_run
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// use user_items::outbound::persistence::{DbPool, DieselAssociationStore, PoolConfig};
    ///
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/items")).await?;
    /// let store = DieselAssociationStore::new(pool);
    /// # let _ = store;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn missing_user(user_id: &UserId) -> AssociationStoreError {
    AssociationStoreError::not_found(format!("user {user_id} does not exist"))
}

#[async_trait]
impl AssociationStore for DieselAssociationStore {
    async fn create_user(&self, user: &User) -> Result<(), AssociationStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: user.id().as_ref(),
            name: user.name().as_ref(),
        };

        let stored_name = conn
            .transaction(|conn| {
                async move {
                    let inserted = diesel::insert_into(users::table)
                        .values(&row)
                        .on_conflict(users::id)
                        .do_nothing()
                        .execute(conn)
                        .await?;
                    if inserted == 1 {
                        return Ok::<_, DieselError>(None);
                    }

                    let name = users::table
                        .filter(users::id.eq(row.id))
                        .select(users::name)
                        .first::<String>(conn)
                        .await?;
                    Ok(Some(name))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_diesel_error(err, "user"))?;

        match stored_name {
            // An identical row means an earlier attempt already committed.
            Some(name) if name != user.name().as_ref() => Err(AssociationStoreError::conflict(
                format!("user {} already exists", user.id()),
            )),
            _ => Ok(()),
        }
    }

    async fn add_item_to_user(
        &self,
        user_id: &UserId,
        item_id: &ItemId,
    ) -> Result<(), AssociationStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserItemRow {
            user_id: user_id.as_ref(),
            item_id: item_id.as_ref(),
        };

        let user_exists = conn
            .transaction(|conn| {
                async move {
                    // KEY SHARE keeps the user row stable until commit.
                    let owner = users::table
                        .filter(users::id.eq(row.user_id))
                        .select(users::id)
                        .for_key_share()
                        .first::<String>(conn)
                        .await
                        .optional()?;
                    if owner.is_none() {
                        return Ok::<_, DieselError>(false);
                    }

                    diesel::insert_into(user_items::table)
                        .values(&row)
                        .on_conflict((user_items::user_id, user_items::item_id))
                        .do_nothing()
                        .execute(conn)
                        .await?;
                    Ok(true)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_diesel_error(err, "user item"))?;

        if user_exists {
            Ok(())
        } else {
            Err(missing_user(user_id))
        }
    }

    async fn user_items(&self, user_id: &UserId) -> Result<Vec<ItemId>, AssociationStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner = user_id.as_ref();

        let rows = conn
            .transaction(|conn| {
                async move {
                    let items: Vec<String> = user_items::table
                        .filter(user_items::user_id.eq(owner))
                        .order(user_items::seq.asc())
                        .select(user_items::item_id)
                        .load(conn)
                        .await?;
                    if !items.is_empty() {
                        return Ok::<_, DieselError>(Some(items));
                    }

                    let user_exists: bool =
                        diesel::select(exists(users::table.filter(users::id.eq(owner))))
                            .get_result(conn)
                            .await?;
                    Ok(user_exists.then_some(items))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_diesel_error(err, "user item"))?;

        let rows = rows.ok_or_else(|| missing_user(user_id))?;
        rows.into_iter()
            .map(|raw| {
                ItemId::try_from(raw)
                    .map_err(|_| AssociationStoreError::query("stored item id is malformed"))
            })
            .collect()
    }
}
