use std::collections::HashMap;
use std::sync::Arc;
use log::debug;
use crate::core::{Column, Result, DbError};
use super::TableSchema;

/// Catalog holds table definitions only.
/// Immutable once built: every change produces a new Catalog, so clones are lock-free.
#[derive(Clone, Debug)]
pub struct Catalog {
    /// Copy-on-Write: a change clones the map and swaps the Arc
    tables: Arc<HashMap<String, Arc<TableSchema>>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(HashMap::new()),
        }
    }

    /// Adds a table and returns the NEW Catalog.
    /// The old Catalog is left untouched.
    pub fn with_table(self, schema: TableSchema) -> Result<Self> {
        schema.validate()?;
        let name = schema.name().to_string();

        if self.tables.contains_key(&name) {
            return Err(DbError::TableExists(name));
        }

        debug!("Catalog: adding table '{}' ({} columns)", name, schema.columns().len());

        let mut new_tables = (*self.tables).clone();
        new_tables.insert(name, Arc::new(schema));

        Ok(Self {
            tables: Arc::new(new_tables),
        })
    }

    /// Re-registers `name` with `extend_existing` set, appending any of
    /// `columns` it does not define yet. A table that is not present is
    /// created from `columns`.
    pub fn with_extended_table(self, name: &str, columns: Vec<Column>) -> Result<Self> {
        let extended = match self.tables.get(name) {
            Some(existing) => {
                let mut table = (**existing).clone();
                table.merge_columns(columns);
                table
            }
            None => TableSchema::new(name, columns),
        }
        .mark_extended();
        extended.validate()?;

        debug!("Catalog: extending table '{}'", name);

        let mut new_tables = (*self.tables).clone();
        new_tables.insert(name.to_string(), Arc::new(extended));

        Ok(Self {
            tables: Arc::new(new_tables),
        })
    }

    pub fn get_table(&self, name: &str) -> Result<&Arc<TableSchema>> {
        self.tables
            .get(name)
            .ok_or_else(|| DbError::TableNotFound(name.to_string()))
    }

    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn list_tables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Removes a table and returns the NEW Catalog.
    pub fn without_table(self, name: &str) -> Result<Self> {
        if !self.tables.contains_key(name) {
            return Err(DbError::TableNotFound(name.to_string()));
        }

        let mut new_tables = (*self.tables).clone();
        new_tables.remove(name);

        Ok(Self {
            tables: Arc::new(new_tables),
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
