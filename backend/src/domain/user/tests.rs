//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn valid_id() -> UserId {
    UserId::new(VALID_ID).expect("fixture user id is valid")
}

#[fixture]
fn valid_name() -> UserName {
    UserName::new("alice").expect("fixture user name is valid")
}

#[rstest]
#[case("3fa85f64-5717-4562-b3fc-2c963f66afa6")]
#[case("test-user")]
#[case("v1.2.3")]
#[case("a")]
fn user_id_accepts_boundary_character_set(#[case] raw: &str) {
    let id = UserId::new(raw).expect("identifier should be accepted");
    assert_eq!(id.as_ref(), raw);
}

#[rstest]
#[case("", UserValidationError::EmptyUserId)]
#[case("Alice", UserValidationError::InvalidUserId)]
#[case("with space", UserValidationError::InvalidUserId)]
#[case("under_score", UserValidationError::InvalidUserId)]
#[case("slash/path", UserValidationError::InvalidUserId)]
#[case(" 3fa85f64 ", UserValidationError::InvalidUserId)]
fn user_id_rejects_malformed_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn user_id_rejects_overlong_input() {
    let raw = "a".repeat(IDENTIFIER_MAX + 1);
    assert_eq!(
        UserId::new(raw),
        Err(UserValidationError::UserIdTooLong {
            max: IDENTIFIER_MAX
        })
    );
}

#[rstest]
fn user_id_accepts_maximum_length() {
    let raw = "a".repeat(IDENTIFIER_MAX);
    assert!(UserId::new(raw).is_ok());
}

#[rstest]
fn random_user_id_is_lowercase_hyphenated_uuid() {
    let id = UserId::random();
    let raw = id.as_ref();

    assert_eq!(raw.len(), 36);
    assert!(
        raw.chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c) || c == '-')
    );
    let parsed = uuid::Uuid::parse_str(raw).expect("random id parses as a UUID");
    assert_eq!(parsed.get_version_num(), 4);
    assert!(UserId::new(raw).is_ok(), "generated ids pass boundary validation");
}

#[rstest]
fn user_id_from_uuid_uses_hyphenated_form() {
    let uuid = uuid::Uuid::parse_str(VALID_ID).expect("valid UUID");
    assert_eq!(UserId::from_uuid(uuid).as_ref(), VALID_ID);
}

#[rstest]
#[case("", UserValidationError::EmptyItemId)]
#[case("Sword-01", UserValidationError::InvalidItemId)]
#[case("sword#01", UserValidationError::InvalidItemId)]
fn item_id_rejects_malformed_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(ItemId::new(raw), Err(expected));
}

#[rstest]
fn item_id_accepts_catalogue_identifiers() {
    let item = ItemId::new("d169f397-ba3f-413b-bc3c-a465576ef06e").expect("valid item id");
    assert_eq!(item.to_string(), "d169f397-ba3f-413b-bc3c-a465576ef06e");
}

#[rstest]
fn item_id_rejects_overlong_input() {
    let raw = "1".repeat(IDENTIFIER_MAX + 1);
    assert!(matches!(
        ItemId::new(raw),
        Err(UserValidationError::ItemIdTooLong { max }) if max == IDENTIFIER_MAX
    ));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn user_name_rejects_blank_input(#[case] raw: &str) {
    assert_eq!(UserName::new(raw), Err(UserValidationError::EmptyUserName));
}

#[rstest]
fn user_name_enforces_character_cap() {
    let at_cap = "é".repeat(USER_NAME_MAX);
    assert!(UserName::new(at_cap).is_ok(), "cap counts characters, not bytes");

    let over_cap = "a".repeat(USER_NAME_MAX + 1);
    assert_eq!(
        UserName::new(over_cap),
        Err(UserValidationError::UserNameTooLong { max: USER_NAME_MAX })
    );
}

#[rstest]
fn user_name_accepts_free_text() {
    let name = UserName::new("Ada Lovelace (1815)").expect("free text names are allowed");
    assert_eq!(name.as_ref(), "Ada Lovelace (1815)");
}

#[rstest]
fn try_from_strings_accepts_valid_inputs(valid_id: UserId, valid_name: UserName) {
    let user = User::try_from_strings(valid_id.as_ref(), valid_name.as_ref())
        .expect("valid inputs");
    assert_eq!(user.id(), &valid_id);
    assert_eq!(user.name(), &valid_name);
}

#[rstest]
fn try_from_strings_reports_first_failure() {
    let result = User::try_from_strings("NOT VALID", "");
    assert_eq!(result, Err(UserValidationError::InvalidUserId));
}

#[rstest]
fn user_serialises_as_id_and_name(valid_id: UserId, valid_name: UserName) {
    let user = User::new(valid_id, valid_name);
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(value, json!({ "id": VALID_ID, "name": "alice" }));
}

#[rstest]
fn user_deserialisation_validates_fields() {
    let bad = json!({ "id": VALID_ID, "name": "" });
    assert!(serde_json::from_value::<User>(bad).is_err());

    let unknown = json!({ "id": VALID_ID, "name": "alice", "extra": true });
    assert!(serde_json::from_value::<User>(unknown).is_err());

    let good = json!({ "id": VALID_ID, "name": "alice" });
    let user: User = serde_json::from_value(good).expect("valid payload");
    assert_eq!(user.name().as_ref(), "alice");
}

#[rstest]
fn item_ids_serialise_as_plain_strings() {
    let items = vec![
        ItemId::new("sword-01").expect("valid item"),
        ItemId::new("shield.02").expect("valid item"),
    ];
    let value = serde_json::to_value(&items).expect("serialise items");
    assert_eq!(value, json!(["sword-01", "shield.02"]));
}

#[rstest]
fn validation_errors_have_readable_messages() {
    assert_eq!(
        UserValidationError::InvalidItemId.to_string(),
        "item id may only contain lowercase letters, digits, hyphens, or dots"
    );
    assert_eq!(
        UserValidationError::UserNameTooLong { max: 256 }.to_string(),
        "user name must be at most 256 characters"
    );
}
