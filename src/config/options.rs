use crate::core::{DbError, Result};
use crate::schema_utils::count_template_slots;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TABLE_NAME: &str = "%s_version";
pub const DEFAULT_VERSION_COLUMN_NAME: &str = "transaction_id";

/// Versioning configuration
///
/// Resolved once per builder; every recognized option is a named field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersioningOptions {
    /// Template for the history table name, with one `%s` for the source table name
    pub table_name: String,

    /// Name of the version column that joins the history table's primary key
    pub version_column_name: String,

    /// Mirror columns in the order the database reports them instead of declaration order
    pub inspect_column_order: bool,
}

impl Default for VersioningOptions {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            version_column_name: DEFAULT_VERSION_COLUMN_NAME.to_string(),
            inspect_column_order: false,
        }
    }
}

impl VersioningOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the history table name template
    pub fn table_name(mut self, template: &str) -> Self {
        self.table_name = template.to_string();
        self
    }

    /// Set the version column name
    pub fn version_column_name(mut self, name: &str) -> Self {
        self.version_column_name = name.to_string();
        self
    }

    /// Toggle live column-order inspection
    pub fn inspect_column_order(mut self, enabled: bool) -> Self {
        self.inspect_column_order = enabled;
        self
    }

    /// Parse from a JSON document
    ///
    /// Missing keys keep their defaults, unknown keys are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use memodb_history::VersioningOptions;
    ///
    /// let options = VersioningOptions::from_json_str(r#"{"table_name": "%s_history"}"#).unwrap();
    /// assert_eq!(options.table_name, "%s_history");
    /// assert_eq!(options.version_column_name, "transaction_id");
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)
            .map_err(|e| DbError::ConfigurationError(format!("invalid versioning options: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let slots = count_template_slots(&self.table_name)?;
        if slots != 1 {
            return Err(DbError::FormatError(format!(
                "table_name '{}' must contain exactly one '%s', found {}",
                self.table_name, slots
            )));
        }

        if self.version_column_name.trim().is_empty() {
            return Err(DbError::ConfigurationError(
                "version_column_name cannot be empty".into(),
            ));
        }

        Ok(())
    }

    /// Options with per-model overrides applied on top.
    pub fn merged(&self, overrides: &VersioningOverrides) -> Self {
        Self {
            table_name: overrides
                .table_name
                .clone()
                .unwrap_or_else(|| self.table_name.clone()),
            version_column_name: overrides
                .version_column_name
                .clone()
                .unwrap_or_else(|| self.version_column_name.clone()),
            inspect_column_order: overrides
                .inspect_column_order
                .unwrap_or(self.inspect_column_order),
        }
    }
}

/// Per-model settings; unset fields fall back to the manager's options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersioningOverrides {
    pub table_name: Option<String>,
    pub version_column_name: Option<String>,
    pub inspect_column_order: Option<bool>,
}

impl VersioningOverrides {
    pub fn is_empty(&self) -> bool {
        self.table_name.is_none()
            && self.version_column_name.is_none()
            && self.inspect_column_order.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = VersioningOptions::default();
        assert_eq!(options.table_name, "%s_version");
        assert_eq!(options.version_column_name, "transaction_id");
        assert!(!options.inspect_column_order);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let options = VersioningOptions::new()
            .table_name("%s_history")
            .version_column_name("version_id")
            .inspect_column_order(true);

        assert_eq!(options.table_name, "%s_history");
        assert_eq!(options.version_column_name, "version_id");
        assert!(options.inspect_column_order);
    }

    #[test]
    fn test_json_rejects_unknown_keys() {
        let err = VersioningOptions::from_json_str(r#"{"tablename": "%s_h"}"#).unwrap_err();
        assert!(matches!(err, DbError::ConfigurationError(_)));
    }

    #[test]
    fn test_json_validates_template() {
        let err = VersioningOptions::from_json_str(r#"{"table_name": "history"}"#).unwrap_err();
        assert!(matches!(err, DbError::FormatError(_)));
    }

    #[test]
    fn test_empty_version_column() {
        let options = VersioningOptions::new().version_column_name("  ");
        assert!(matches!(options.validate(), Err(DbError::ConfigurationError(_))));
    }

    #[test]
    fn test_overrides_win() {
        let base = VersioningOptions::default();
        let overrides = VersioningOverrides {
            table_name: Some("%s_audit".into()),
            inspect_column_order: Some(true),
            ..Default::default()
        };

        let merged = base.merged(&overrides);
        assert_eq!(merged.table_name, "%s_audit");
        assert_eq!(merged.version_column_name, "transaction_id");
        assert!(merged.inspect_column_order);
        assert!(!overrides.is_empty());
        assert!(VersioningOverrides::default().is_empty());
    }
}
