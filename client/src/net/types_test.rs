use super::*;

// =============================================================
// User
// =============================================================

#[test]
fn user_accepts_string_id() {
    let user: User = serde_json::from_str(r#"{"id":"a1","username":"Admin","role":"admin"}"#).unwrap();
    assert_eq!(user.id.as_deref(), Some("a1"));
}

#[test]
fn user_accepts_numeric_id() {
    let user: User = serde_json::from_str(r#"{"id":42,"username":"Admin","role":"admin"}"#).unwrap();
    assert_eq!(user.id.as_deref(), Some("42"));
}

#[test]
fn user_without_id_deserializes() {
    let user: User = serde_json::from_str(r#"{"username":"Admin","role":"admin"}"#).unwrap();
    assert_eq!(user, User::new(None, "Admin", "admin"));
}

#[test]
fn user_rejects_object_id() {
    let res = serde_json::from_str::<User>(r#"{"id":{},"username":"Admin","role":"admin"}"#);
    assert!(res.is_err());
}

#[test]
fn user_omits_absent_id_when_serialized() {
    let json = serde_json::to_value(User::new(None, "Admin", "admin")).unwrap();
    assert_eq!(json, serde_json::json!({"username": "Admin", "role": "admin"}));
}

// =============================================================
// LoginRequest
// =============================================================

#[test]
fn login_request_missing_fields_decode_as_empty() {
    let req: LoginRequest = serde_json::from_str("{}").unwrap();
    assert_eq!(req.normalized(), Err(VerificationError::MissingCredentials));
}

#[test]
fn login_request_normalized_trims_username_only() {
    let req = LoginRequest::new("  Admin ", "\t1234\n");
    assert_eq!(req.normalized().unwrap(), LoginRequest::new("Admin", "\t1234\n"));
}

#[test]
fn login_request_whitespace_password_rejected() {
    let req = LoginRequest::new("Admin", "   ");
    assert_eq!(req.normalized(), Err(VerificationError::MissingCredentials));
}

#[test]
fn login_request_debug_hides_password() {
    let debug = format!("{:?}", LoginRequest::new("Admin", "hunter2"));
    assert!(debug.contains("Admin"));
    assert!(!debug.contains("hunter2"));
}

// =============================================================
// Envelope
// =============================================================

#[test]
fn envelope_ok_has_only_data() {
    let env = LoginResponse::ok(LoginData { user: User::new(Some("1".into()), "Admin", "admin") });
    let json = serde_json::to_value(&env).unwrap();
    assert_eq!(json["error"], serde_json::Value::Null);
    assert_eq!(json["data"]["user"]["username"], "Admin");
}

#[test]
fn envelope_err_has_only_error() {
    let env = LoginResponse::err("Invalid username or password");
    assert!(env.data.is_none());
    assert_eq!(env.error.as_deref(), Some("Invalid username or password"));
}

#[test]
fn verification_error_messages_do_not_name_the_failing_field() {
    let msg = VerificationError::InvalidCredentials.to_string();
    assert_eq!(msg, "Invalid username or password");
}
