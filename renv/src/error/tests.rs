//! Tests for error construction and display.

use super::*;
use rstest::rstest;
use std::error::Error as _;
use std::io;
use std::path::Path;

#[rstest]
#[case(".env", ".env not found in project")]
#[case(".env.test", ".env.test not found in project")]
fn not_found_message_names_target_file(#[case] file_name: &str, #[case] expected: &str) {
    let err = RenvError::not_found(file_name);
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), expected);
}

#[test]
fn malformed_line_message_includes_line() {
    let err = RenvError::malformed_line("BAR", 2);
    assert_eq!(
        err.to_string(),
        "Environment line BAR is malformed - must be of format key=value"
    );
    assert!(matches!(err, RenvError::MalformedLine { line_number: 2, .. }));
    assert!(!err.is_not_found());
}

#[test]
fn io_error_preserves_source() {
    let err = RenvError::io(
        Path::new("/srv/app/.env"),
        io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    );
    assert!(!err.is_not_found());
    let kind = err.io_error().map(io::Error::kind);
    assert_eq!(kind, Some(io::ErrorKind::PermissionDenied));
    assert!(err.source().is_some());
    assert!(err.to_string().contains("/srv/app/.env"));
}

#[test]
fn non_io_errors_have_no_io_source() {
    assert!(RenvError::not_found(".env").io_error().is_none());
    assert!(RenvError::malformed_line("X", 1).io_error().is_none());
}
