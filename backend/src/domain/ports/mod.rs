//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod association_store;
mod user_id_generator;

#[cfg(test)]
pub use association_store::MockAssociationStore;
pub use association_store::{AssociationStore, AssociationStoreError};
#[cfg(test)]
pub use user_id_generator::MockUserIdGenerator;
pub use user_id_generator::{RandomUserIdGenerator, UserIdGenerator};
