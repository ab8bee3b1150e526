use crate::core::{Column, DbError, Result, Schema};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    name: String,
    schema: Schema,
    /// Set when this definition augments a table already present in the catalog
    #[serde(default)]
    extend_existing: bool,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            schema: Schema::new(columns),
            extend_existing: false,
        }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn schema(&self) -> &Schema { &self.schema }
    pub fn columns(&self) -> &[Column] { self.schema.columns() }
    pub fn extend_existing(&self) -> bool { self.extend_existing }

    /// Column lookup that fails the way a keyed access on the table would.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.schema
            .get_column(name)
            .ok_or_else(|| DbError::ColumnNotFound(name.to_string(), self.name.clone()))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.schema.find_column_index(name).is_some()
    }

    pub fn primary_key(&self) -> Vec<&Column> {
        self.schema.primary_key()
    }

    pub fn primary_key_names(&self) -> Vec<&str> {
        self.primary_key().into_iter().map(|col| col.name.as_str()).collect()
    }

    pub(crate) fn mark_extended(mut self) -> Self {
        self.extend_existing = true;
        self
    }

    /// Appends columns not yet present. Columns already defined keep their
    /// current definition.
    pub(crate) fn merge_columns(&mut self, columns: Vec<Column>) {
        for column in columns {
            if !self.has_column(&column.name) {
                self.schema.push(column);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DbError::ConfigurationError("Table name cannot be empty".into()));
        }

        let mut seen = HashSet::new();
        for column in self.columns() {
            if column.name.trim().is_empty() {
                return Err(DbError::ConfigurationError(format!(
                    "Table '{}' has a column with an empty name",
                    self.name
                )));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(DbError::DuplicateColumn(column.name.clone(), self.name.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DataType;

    fn articles() -> TableSchema {
        TableSchema::new(
            "articles",
            vec![
                Column::new("id", DataType::Integer).primary_key(),
                Column::new("title", DataType::Text),
            ],
        )
    }

    #[test]
    fn test_column_lookup_error() {
        let table = articles();
        assert!(table.column("title").is_ok());
        assert!(matches!(
            table.column("body"),
            Err(DbError::ColumnNotFound(col, tbl)) if col == "body" && tbl == "articles"
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_columns() {
        let table = TableSchema::new(
            "t",
            vec![Column::new("a", DataType::Integer), Column::new("a", DataType::Text)],
        );
        assert!(matches!(table.validate(), Err(DbError::DuplicateColumn(_, _))));
        assert!(articles().validate().is_ok());
    }

    #[test]
    fn test_merge_keeps_existing_definitions() {
        let mut table = articles();
        table.merge_columns(vec![
            Column::new("title", DataType::Integer),
            Column::new("body", DataType::Text),
        ]);
        assert_eq!(table.columns().len(), 3);
        assert_eq!(table.column("title").unwrap().data_type, DataType::Text);
        assert_eq!(table.primary_key_names(), vec!["id"]);
    }
}
