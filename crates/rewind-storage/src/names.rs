//! Names of every object the engine creates on a connection.
//!
//! All of them derive from one validated prefix so two engines configured
//! with different prefixes never collide on the same connection.

use rewind_core::errors::ValidationError;
use rewind_core::RewindConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectNames {
    prefix: String,
}

impl ObjectNames {
    pub fn from_config(config: &RewindConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self {
            prefix: config.effective_prefix().to_string(),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Index table: one row per group.
    pub fn groups_table(&self) -> String {
        format!("{}groups", self.prefix)
    }

    /// Statement table: one row per inverse step.
    pub fn steps_table(&self) -> String {
        format!("{}steps", self.prefix)
    }

    pub fn steps_index(&self) -> String {
        format!("{}steps_group_idx", self.prefix)
    }

    /// SQL function returning 1 while capture is on.
    pub fn active_fn(&self) -> String {
        format!("{}active", self.prefix)
    }

    /// SQL function returning the group new steps belong to.
    pub fn group_id_fn(&self) -> String {
        format!("{}group_id", self.prefix)
    }

    /// Common prefix of every trigger installed for `table`.
    ///
    /// The table name is preceded by its length so no table's prefix can
    /// run into another table's suffix (`t` + `u_i` vs `t_u` + `i`).
    pub fn trigger_prefix(&self, table: &str) -> String {
        format!("{}{}_{}_", self.prefix, table.chars().count(), table)
    }

    pub fn trigger(&self, table: &str, suffix: &str) -> String {
        format!("{}{}", self.trigger_prefix(table), suffix)
    }

    pub fn savepoint_label(&self, operation: &str) -> String {
        format!("{}{}_svp", self.prefix, operation)
    }

    /// Whether `table` is one of the log's own tables.
    pub fn is_reserved(&self, table: &str) -> bool {
        table.eq_ignore_ascii_case(&self.groups_table())
            || table.eq_ignore_ascii_case(&self.steps_table())
    }
}

impl Default for ObjectNames {
    fn default() -> Self {
        Self {
            prefix: rewind_core::config::rewind_config::DEFAULT_PREFIX.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_every_name_from_the_prefix() {
        let names = ObjectNames::default();
        assert_eq!(names.groups_table(), "rewind_groups");
        assert_eq!(names.steps_table(), "rewind_steps");
        assert_eq!(names.steps_index(), "rewind_steps_group_idx");
        assert_eq!(names.active_fn(), "rewind_active");
        assert_eq!(names.group_id_fn(), "rewind_group_id");
        assert_eq!(names.trigger("Test", "u_data"), "rewind_4_Test_u_data");
        assert_eq!(names.savepoint_label("undo"), "rewind_undo_svp");
    }

    #[test]
    fn trigger_names_never_collide_across_tables() {
        let names = ObjectNames::default();
        assert_ne!(names.trigger("t", "u_i"), names.trigger("t_u", "i"));
        assert_eq!(names.trigger("t", "u_i"), "rewind_1_t_u_i");
        assert_eq!(names.trigger("t_u", "i"), "rewind_3_t_u_i");
    }

    #[test]
    fn custom_prefix_is_validated() {
        let config = RewindConfig {
            prefix: Some("9bad".to_string()),
            ..Default::default()
        };
        assert!(ObjectNames::from_config(&config).is_err());

        let config = RewindConfig {
            prefix: Some("u_".to_string()),
            ..Default::default()
        };
        let names = ObjectNames::from_config(&config).unwrap();
        assert_eq!(names.steps_table(), "u_steps");
    }

    #[test]
    fn log_tables_are_reserved() {
        let names = ObjectNames::default();
        assert!(names.is_reserved("REWIND_STEPS"));
        assert!(names.is_reserved("rewind_groups"));
        assert!(!names.is_reserved("items"));
    }
}
