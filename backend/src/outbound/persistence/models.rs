//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use super::schema::{user_items, users};

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
}

/// Insertable struct for associating an item with a user.
///
/// `seq` and `created_at` are filled by column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_items)]
pub(crate) struct NewUserItemRow<'a> {
    pub user_id: &'a str,
    pub item_id: &'a str,
}
