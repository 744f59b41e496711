use super::*;

#[test]
fn retryable_covers_network_and_server_errors() {
    assert!(ApiError::Network("refused".into()).is_retryable());
    assert!(ApiError::Status { status: 503, message: String::new() }.is_retryable());
    assert!(ApiError::Status { status: 429, message: String::new() }.is_retryable());
    assert!(!ApiError::Status { status: 400, message: String::new() }.is_retryable());
    assert!(!ApiError::Decode("bad".into()).is_retryable());
    assert!(!ApiError::InvalidUpload("x.txt".into()).is_retryable());
}

#[test]
fn display_includes_status_and_message() {
    let err = ApiError::Status { status: 500, message: "Model not trained".into() };
    assert_eq!(err.to_string(), "service returned 500: Model not trained");
}
