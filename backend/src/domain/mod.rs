//! Domain primitives, ports, and the user/item operation facade.
//!
//! Public surface:
//! - `User`, `UserId`, `UserName`, `ItemId`: validated identity types.
//! - `Error` and `ErrorCode`: the single error type callers see.
//! - `UserItemsService`: create users, associate items, list items.
//! - `Retrier` and `RetryPolicy`: bounded back-off for transient failures.

pub mod deadline;
pub mod error;
pub mod ports;
pub mod retry;
pub mod user;
pub mod user_items_service;

pub use self::deadline::Deadline;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::retry::{
    BackoffJitter, NoJitter, RandomJitter, Retrier, RetryPolicy, Sleeper, TokioSleeper,
};
pub use self::user::{
    IDENTIFIER_MAX, ItemId, USER_NAME_MAX, User, UserId, UserName, UserValidationError,
};
pub use self::user_items_service::UserItemsService;
