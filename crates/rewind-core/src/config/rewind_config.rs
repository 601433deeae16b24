//! Engine configuration, loadable from a `[rewind]`-style TOML document.

use serde::{Deserialize, Serialize};

use crate::errors::{RewindResult, ValidationError};
use crate::types::{EndSelector, UpdatePolicy};

/// Prefix used for every object the engine creates: log tables, index,
/// triggers, SQL functions, and savepoints.
pub const DEFAULT_PREFIX: &str = "rewind_";

/// Configuration for one undo session.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RewindConfig {
    /// Object prefix. Default: "rewind_".
    pub prefix: Option<String>,
    /// Policy used by `attach_default`. Default: per_table.
    pub default_policy: Option<UpdatePolicy>,
    /// Selector used when `end` is called without one. Default: both_text.
    pub end_output: Option<EndSelector>,
    /// Log generated trigger DDL at debug level. Default: false.
    pub log_generated_sql: Option<bool>,
}

impl RewindConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> RewindResult<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the effective object prefix, defaulting to `rewind_`.
    pub fn effective_prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_PREFIX)
    }

    /// Returns the effective default policy, defaulting to per-table.
    pub fn effective_default_policy(&self) -> UpdatePolicy {
        self.default_policy.unwrap_or_default()
    }

    /// Returns the effective `end` selector, defaulting to both-as-text.
    pub fn effective_end_output(&self) -> EndSelector {
        self.end_output.unwrap_or_default()
    }

    pub fn effective_log_generated_sql(&self) -> bool {
        self.log_generated_sql.unwrap_or(false)
    }

    /// The prefix ends up unquoted inside function names, so it must be a bare identifier.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let prefix = self.effective_prefix();
        let mut chars = prefix.chars();
        let head_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if head_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            Ok(())
        } else {
            Err(ValidationError::InvalidPrefix(prefix.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RewindError;

    #[test]
    fn empty_document_uses_defaults() {
        let config = RewindConfig::from_toml("").unwrap();
        assert_eq!(config.effective_prefix(), "rewind_");
        assert_eq!(config.effective_default_policy(), UpdatePolicy::PerTable);
        assert_eq!(config.effective_end_output(), EndSelector::BothText);
        assert!(!config.effective_log_generated_sql());
    }

    #[test]
    fn overrides_are_read() {
        let config = RewindConfig::from_toml(
            r#"
            prefix = "undo_"
            default_policy = "per_column"
            end_output = "undo_count"
            log_generated_sql = true
            "#,
        )
        .unwrap();
        assert_eq!(config.effective_prefix(), "undo_");
        assert_eq!(config.effective_default_policy(), UpdatePolicy::PerColumn);
        assert_eq!(config.effective_end_output(), EndSelector::UndoCount);
        assert!(config.effective_log_generated_sql());
    }

    #[test]
    fn rejects_prefix_that_is_not_an_identifier() {
        let err = RewindConfig::from_toml(r#"prefix = "bad-prefix""#).unwrap_err();
        assert!(matches!(
            err,
            RewindError::Validation(ValidationError::InvalidPrefix(ref p)) if p == "bad-prefix"
        ));

        let empty = RewindConfig {
            prefix: Some(String::new()),
            ..Default::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = RewindConfig::from_toml("prefix = [").unwrap_err();
        assert!(matches!(err, RewindError::Config(_)));
    }
}
