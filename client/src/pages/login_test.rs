use super::*;

#[test]
fn validate_login_input_trims_both_fields() {
    assert_eq!(
        validate_login_input("  Admin ", " 1234 "),
        Ok(("Admin".to_owned(), "1234".to_owned()))
    );
}

#[test]
fn validate_login_input_requires_username() {
    assert_eq!(validate_login_input("   ", "1234"), Err(MISSING_INPUT_MESSAGE));
}

#[test]
fn validate_login_input_requires_password() {
    assert_eq!(validate_login_input("Admin", ""), Err(MISSING_INPUT_MESSAGE));
}
