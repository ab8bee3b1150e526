//! Live-schema introspection.
//!
//! A [`SchemaInspector`] reports the columns of a table the way the database
//! physically stores them, which may differ from the declared model order.

use crate::core::{DataType, DbError, Result};
use crate::parser::SqlParserAdapter;
use crate::storage::TableSchema;
use std::collections::HashMap;

/// One column as reported by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectedColumn {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

pub trait SchemaInspector: Send + Sync {
    /// Columns of `table_name` in physical order.
    fn get_columns(&self, table_name: &str) -> Result<Vec<ReflectedColumn>>;

    fn get_table_names(&self) -> Result<Vec<String>>;
}

/// Inspector backed by the `CREATE TABLE` script a database was built from.
#[derive(Debug, Clone, Default)]
pub struct DdlInspector {
    tables: HashMap<String, Vec<ReflectedColumn>>,
}

impl DdlInspector {
    pub fn from_sql(sql: &str) -> Result<Self> {
        let tables = SqlParserAdapter::new().parse_tables(sql)?;
        Ok(Self::from_tables(tables))
    }

    pub fn from_tables(tables: impl IntoIterator<Item = TableSchema>) -> Self {
        let tables = tables
            .into_iter()
            .map(|table| {
                let columns = table
                    .columns()
                    .iter()
                    .map(|col| ReflectedColumn {
                        name: col.name.clone(),
                        data_type: col.data_type.clone(),
                        nullable: col.nullable,
                    })
                    .collect();
                (table.name().to_string(), columns)
            })
            .collect();
        Self { tables }
    }
}

impl SchemaInspector for DdlInspector {
    fn get_columns(&self, table_name: &str) -> Result<Vec<ReflectedColumn>> {
        self.tables
            .get(table_name)
            .cloned()
            .ok_or_else(|| DbError::TableNotFound(table_name.to_string()))
    }

    fn get_table_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
