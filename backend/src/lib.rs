//! User/item association data layer.
//!
//! Creates users with generated identifiers, associates catalogue items with
//! them, and lists each user's items in insertion order. Storage sits behind
//! the [`AssociationStore`](domain::ports::AssociationStore) port with a
//! PostgreSQL adapter and an in-memory adapter.

pub mod config;
pub mod domain;
pub mod outbound;
