//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! small shared helpers live here rather than being copied between suites.

use std::time::Duration;

use user_items::domain::Deadline;

/// Environment variable naming a disposable PostgreSQL database for the
/// Diesel suites.
pub const TEST_DATABASE_URL_VAR: &str = "USER_ITEMS_TEST_DATABASE_URL";

/// Return the test database URL, or print a skip marker and return `None`.
///
/// Suites that need PostgreSQL return early when this yields `None`, so the
/// default `cargo test` run stays self-contained.
pub fn test_database_url() -> Option<String> {
    match std::env::var(TEST_DATABASE_URL_VAR) {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            eprintln!("SKIP-TEST-CLUSTER: {TEST_DATABASE_URL_VAR} is not set");
            None
        }
    }
}

/// A deadline generous enough that only a hung operation would hit it.
pub fn generous_deadline() -> Deadline {
    Deadline::after(Duration::from_secs(30))
}
