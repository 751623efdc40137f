//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Provides the production [`AssociationStore`](crate::domain::ports::AssociationStore)
//! backed by PostgreSQL via `diesel-async` and a `bb8` connection pool, plus
//! the embedded schema migrations it relies on.
//!
//! - **Thin adapter**: the store translates between Diesel rows and domain
//!   types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) are never exposed to the domain layer.
//! - **Classified errors**: driver failures are mapped to store error kinds
//!   (`error_mapping.rs`) so the domain can decide what to retry.
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use user_items::outbound::persistence::{DbPool, DieselAssociationStore, PoolConfig};
//!
//! let config = PoolConfig::new("postgres://localhost/mydb");
//! let pool = DbPool::new(config).await?;
//! let store = DieselAssociationStore::new(pool.clone());
//! # let _ = store;
//! pool.close();
//! # Ok(())
//! # }
//! ```

mod diesel_association_store;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_association_store::DieselAssociationStore;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
