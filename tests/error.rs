use serde_json::Value;
use todo_sync::error::{exit_codes, Error, JsonError};

#[test]
fn exit_code_user_error() {
    let err = Error::InvalidConfig("bad".to_string());
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    let err = Error::InvalidArgument("bad".to_string());
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
}

#[test]
fn exit_code_operation_failed() {
    let err = Error::Load("network down".to_string());
    assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
    let err = Error::OperationFailed("boom".to_string());
    assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
}

#[test]
fn json_error_includes_details() {
    let err = Error::Load("network down".to_string());
    let json = JsonError::from(&err);
    assert_eq!(json.code, exit_codes::OPERATION_FAILED);
    assert_eq!(json.error, "Failed to load tasks: network down");
    let details = json.details.expect("details");
    assert_eq!(details["message"], Value::String("network down".to_string()));
}
