use polybench::error;
use polybench::PolybenchError;
use std::error::Error;
use std::time::Duration;

#[test]
fn test_user_friendly_messages() {
    let msg = error::user_friendly_message(&PolybenchError::RunnerError {
        language: "Java".into(),
        message: "exit 1".into(),
    });
    assert!(msg.contains("Java"));
    assert!(msg.contains("PATH"));

    let msg = error::user_friendly_message(&PolybenchError::Timeout {
        language: "Python".into(),
        after: Duration::from_secs(300),
    });
    assert!(msg.contains("timeout"));
}

#[test]
fn test_display_and_source() {
    let err = PolybenchError::Timeout {
        language: "Python".into(),
        after: Duration::from_secs(90),
    };
    assert_eq!(err.to_string(), "Python runner timed out after 1m 30s");

    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
    let err: PolybenchError = io.into();
    assert!(err.source().is_some());
    assert!(err.to_string().starts_with("I/O error"));
}

#[test]
fn test_json_error_conversion() {
    let err: PolybenchError = serde_json::from_str::<Vec<u8>>("nope").unwrap_err().into();
    assert!(matches!(err, PolybenchError::SerializationError(_)));
}
