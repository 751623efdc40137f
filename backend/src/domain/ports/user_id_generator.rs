//! Port for minting new user identifiers.

use crate::domain::UserId;

/// Source of fresh user identifiers.
///
/// Collisions are not checked against the store; a collision surfaces as a
/// conflict when the user row is inserted.
#[cfg_attr(test, mockall::automock)]
pub trait UserIdGenerator: Send + Sync {
    /// Produce a new identifier.
    fn next_id(&self) -> UserId;
}

/// Generates version-4 UUIDs from the operating system's CSPRNG.
///
/// Each id carries 122 random bits and is rendered as lowercase hex and
/// hyphens, so it is safe to embed in URL path segments.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomUserIdGenerator;

impl UserIdGenerator for RandomUserIdGenerator {
    fn next_id(&self) -> UserId {
        UserId::random()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn generated_ids_do_not_repeat() {
        let generator = RandomUserIdGenerator;
        let ids: HashSet<String> = (0..100_000)
            .map(|_| generator.next_id().into())
            .collect();
        assert_eq!(ids.len(), 100_000);
    }

    #[rstest]
    fn generated_ids_are_path_safe() {
        let id = RandomUserIdGenerator.next_id();
        assert!(
            id.as_ref()
                .chars()
                .all(|c| matches!(c, '0'..='9' | 'a'..='f' | '-'))
        );
    }
}
