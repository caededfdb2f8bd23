use jobgrid_core::{ErrorInfo, JobGridError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("param", "x")
        .with_context("value", "42")
}

#[test]
fn config_error_surface() {
    let err =
        JobGridError::Config(sample_info("param-redefined", "parameter is already registered"));
    assert_eq!(err.info().code, "param-redefined");
    assert!(err.info().context.contains_key("param"));
    assert!(err.to_string().starts_with("config error:"));
}

#[test]
fn coerce_error_surface() {
    let err = JobGridError::Coerce(sample_info("coerce-parse", "could not coerce value"));
    assert_eq!(err.info().code, "coerce-parse");
    assert!(err.to_string().starts_with("coercion error:"));
}

#[test]
fn argv_error_surface() {
    let err = JobGridError::Argv(sample_info("argv-separator", "no argument separator found"));
    assert_eq!(err.info().code, "argv-separator");
    assert!(err.to_string().starts_with("argv error:"));
}

#[test]
fn info_display_carries_context_and_hint() {
    let info = sample_info("coerce-parse", "could not coerce value")
        .with_hint("invalid digit found in string");
    let rendered = info.to_string();
    assert!(rendered.contains("(code: coerce-parse)"));
    assert!(rendered.contains("param=x"));
    assert!(rendered.contains("value=42"));
    assert!(rendered.contains("hint: invalid digit"));
}

#[test]
fn errors_roundtrip_through_serde() {
    let err = JobGridError::Argv(sample_info("args-unused", "arguments were not consumed"));
    let encoded = serde_json::to_string(&err).expect("encode");
    assert!(encoded.contains("\"family\":\"Argv\""));
    let decoded: JobGridError = serde_json::from_str(&encoded).expect("decode");
    assert_eq!(decoded, err);
}
