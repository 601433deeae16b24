//! Config loading end to end: TOML in, effective values and errors out.

use rewind_core::errors::{error_code, ValidationError};
use rewind_core::{EndSelector, ErrorCode, RewindConfig, RewindError, UpdatePolicy};

/// Every field set explicitly.
#[test]
fn full_document() {
    let config = RewindConfig::from_toml(
        r#"
        prefix = "ur_"
        default_policy = "per_column"
        end_output = "both_binary"
        log_generated_sql = true
        "#,
    )
    .unwrap();
    assert_eq!(config.effective_prefix(), "ur_");
    assert_eq!(config.effective_default_policy(), UpdatePolicy::PerColumn);
    assert_eq!(config.effective_end_output(), EndSelector::BothBinary);
    assert!(config.effective_log_generated_sql());
}

/// Missing fields fall back to defaults.
#[test]
fn partial_document() {
    let config = RewindConfig::from_toml("default_policy = \"none\"").unwrap();
    assert_eq!(config.effective_default_policy(), UpdatePolicy::None);
    assert_eq!(config.effective_prefix(), "rewind_");
    assert_eq!(config.effective_end_output(), EndSelector::BothText);
}

/// A prefix that is not a bare identifier is rejected.
#[test]
fn bad_prefix() {
    let err = RewindConfig::from_toml("prefix = \"x-y\"").unwrap_err();
    assert!(matches!(
        err,
        RewindError::Validation(ValidationError::InvalidPrefix(ref p)) if p == "x-y"
    ));
    assert_eq!(err.error_code(), error_code::VALIDATION_ERROR);
}

/// Unknown enum values and malformed TOML are config errors.
#[test]
fn malformed_documents() {
    let err = RewindConfig::from_toml("default_policy = \"sometimes\"").unwrap_err();
    assert_eq!(err.error_code(), error_code::CONFIG_ERROR);
    let err = RewindConfig::from_toml("prefix = ").unwrap_err();
    assert!(matches!(err, RewindError::Config(_)));
}

/// Config survives a serialize/parse cycle through TOML.
#[test]
fn serializes_back_to_toml() {
    let config = RewindConfig {
        prefix: Some("hist_".into()),
        end_output: Some(EndSelector::RedoCount),
        ..Default::default()
    };
    let text = toml::to_string(&config).unwrap();
    let back = RewindConfig::from_toml(&text).unwrap();
    assert_eq!(back.effective_prefix(), "hist_");
    assert_eq!(back.effective_end_output(), EndSelector::RedoCount);
}
