//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL-backed association store using Diesel ORM.
//! - **memory**: in-process association store with the same observable
//!   behaviour, for tests and local tooling.
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod persistence;
