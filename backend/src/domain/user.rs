//! User, user name, and item identifier types.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum allowed length, in characters, for user and item identifiers.
pub const IDENTIFIER_MAX: usize = 256;
/// Maximum allowed length, in characters, for a user name.
pub const USER_NAME_MAX: usize = 256;

/// Validation errors returned by the identifier and user name constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUserId,
    InvalidUserId,
    UserIdTooLong { max: usize },
    EmptyItemId,
    InvalidItemId,
    ItemIdTooLong { max: usize },
    EmptyUserName,
    UserNameTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUserId => write!(f, "user id must not be empty"),
            Self::InvalidUserId => write!(
                f,
                "user id may only contain lowercase letters, digits, hyphens, or dots",
            ),
            Self::UserIdTooLong { max } => {
                write!(f, "user id must be at most {max} characters")
            }
            Self::EmptyItemId => write!(f, "item id must not be empty"),
            Self::InvalidItemId => write!(
                f,
                "item id may only contain lowercase letters, digits, hyphens, or dots",
            ),
            Self::ItemIdTooLong { max } => {
                write!(f, "item id must be at most {max} characters")
            }
            Self::EmptyUserName => write!(f, "user name must not be empty"),
            Self::UserNameTooLong { max } => {
                write!(f, "user name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

static IDENTIFIER_RE: OnceLock<Regex> = OnceLock::new();

fn identifier_regex() -> &'static Regex {
    IDENTIFIER_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        let pattern = "^[a-z0-9.-]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("identifier regex failed to compile: {error}"))
    })
}

/// Which identifier is being validated, so errors name the right field.
#[derive(Clone, Copy)]
enum IdentifierKind {
    User,
    Item,
}

fn validate_identifier(value: &str, kind: IdentifierKind) -> Result<(), UserValidationError> {
    let (empty, invalid, too_long) = match kind {
        IdentifierKind::User => (
            UserValidationError::EmptyUserId,
            UserValidationError::InvalidUserId,
            UserValidationError::UserIdTooLong {
                max: IDENTIFIER_MAX,
            },
        ),
        IdentifierKind::Item => (
            UserValidationError::EmptyItemId,
            UserValidationError::InvalidItemId,
            UserValidationError::ItemIdTooLong {
                max: IDENTIFIER_MAX,
            },
        ),
    };

    if value.is_empty() {
        return Err(empty);
    }
    if value.chars().count() > IDENTIFIER_MAX {
        return Err(too_long);
    }
    if !identifier_regex().is_match(value) {
        return Err(invalid);
    }
    Ok(())
}

/// Opaque user identifier.
///
/// Generated identifiers are hyphenated, lowercase UUID v4 strings, but any
/// value made of lowercase alphanumerics, hyphens, and dots is accepted so
/// callers can address users by the identifiers they were handed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`] backed by a version-4 UUID.
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Build a [`UserId`] from a UUID using its hyphenated lowercase form.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.hyphenated().to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        validate_identifier(&id, IdentifierKind::User)?;
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Caller-supplied catalogue item identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Validate and construct an [`ItemId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        validate_identifier(&id, IdentifierKind::Item)?;
        Ok(Self(id))
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ItemId> for String {
    fn from(value: ItemId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ItemId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Human readable user name. Names are not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`] from owned input.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, UserValidationError> {
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyUserName);
        }
        if name.chars().count() > USER_NAME_MAX {
            return Err(UserValidationError::UserNameTooLong {
                max: USER_NAME_MAX,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Application user.
///
/// ## Invariants
/// - `id` satisfies the identifier character set and length cap.
/// - `name` is non-empty once trimmed and at most [`USER_NAME_MAX`] characters.
///
/// Serialises as `{"id": "...", "name": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    name: UserName,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(id: UserId, name: UserName) -> Self {
        Self { id, name }
    }

    /// Fallible constructor enforcing identifier and name invariants.
    ///
    /// Prefer [`User::new`] when components are already validated.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        name: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let id = UserId::new(id)?;
        let name = UserName::new(name)?;

        Ok(Self::new(id, name))
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Name supplied when the user was created.
    pub fn name(&self) -> &UserName {
        &self.name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct UserDto {
    id: String,
    name: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User { id, name } = value;
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_from_strings(value.id, value.name)
    }
}

#[cfg(test)]
mod tests;
