//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. When a
//! migration changes the schema, regenerate them with `diesel print-schema`
//! or update them by hand.

diesel::table! {
    /// Users who can own items.
    users (id) {
        /// Caller-visible identifier (UUID v4 when generated).
        id -> Text,
        /// Free-text name, 1 to 256 characters.
        name -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Associations between users and catalogue items.
    ///
    /// `(user_id, item_id)` is the primary key, so an item is associated with
    /// a user at most once. `seq` records insertion order.
    user_items (user_id, item_id) {
        /// Owning user; references `users.id`.
        user_id -> Text,
        /// Catalogue item identifier.
        item_id -> Text,
        /// Monotonic insertion sequence.
        seq -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(user_items -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, user_items);
