use crate::config::VersioningOptions;
use crate::core::{Column, DataType, DbError, Result};
use crate::model::ModelClass;
use crate::schema_utils::{format_table_name, table_name};
use crate::storage::{Metadata, TableSchema};
use log::{debug, warn};
use std::sync::Arc;

use super::VersioningManager;

/// Derives the history table of a model.
///
/// The history table mirrors every source column, with uniqueness dropped since
/// each version is stored as a new row, and appends a `BIGINT` version column.
/// Its primary key is the version column plus the mirrored column of the same
/// name, when the source has one.
pub struct VersionedTableBuilder<'a> {
    model: &'a ModelClass,
    options: VersioningOptions,
}

impl<'a> VersionedTableBuilder<'a> {
    pub fn new(model: &'a ModelClass, options: VersioningOptions) -> Self {
        Self { model, options }
    }

    /// Builder with the manager's options and the model's overrides applied.
    pub fn for_model(manager: &VersioningManager, model: &'a ModelClass) -> Self {
        Self::new(model, manager.options_for(model))
    }

    pub fn options(&self) -> &VersioningOptions {
        &self.options
    }

    pub fn table_name(&self) -> Result<String> {
        format_table_name(&self.options.table_name, table_name(self.model))
    }

    /// Copies of the source columns to mirror.
    ///
    /// With `inspect_column_order` the order comes from the database bound to
    /// the model's metadata; every reported column must exist on the model.
    /// The model's definition of each column is kept, and a database that
    /// disagrees on type or nullability is only logged.
    pub fn parent_columns(&self) -> Result<Vec<Column>> {
        let table = self.model.table()?;

        if !self.options.inspect_column_order {
            return Ok(table.columns().iter().map(Column::copy).collect());
        }

        let inspector = self.metadata()?.inspector()?;
        inspector
            .get_columns(table.name())?
            .iter()
            .map(|reflected| -> Result<Column> {
                let column = table.column(&reflected.name)?;
                if reflected.data_type != column.data_type || reflected.nullable != column.nullable {
                    warn!(
                        "Column '{}.{}' is {}{} in the database but declared {}{}",
                        table.name(),
                        column.name,
                        reflected.data_type,
                        if reflected.nullable { "" } else { " NOT NULL" },
                        column.data_type,
                        if column.nullable { "" } else { " NOT NULL" },
                    );
                }
                Ok(column.copy())
            })
            .collect()
    }

    pub fn build_reflected_columns(&self) -> Result<Vec<Column>> {
        let columns = self
            .parent_columns()?
            .into_iter()
            .map(|mut copy| {
                copy.unique = false;
                copy.primary_key = copy.name == self.options.version_column_name;
                if copy.primary_key {
                    copy.nullable = false;
                }
                copy
            })
            .collect();
        Ok(columns)
    }

    pub fn build_version_column(&self) -> Column {
        Column::new(self.options.version_column_name.clone(), DataType::BigInt).primary_key()
    }

    /// Schema registry of the first direct base that carries one.
    pub fn metadata(&self) -> Result<Metadata> {
        self.model.metadata().cloned().ok_or_else(|| {
            DbError::ConfigurationError(format!(
                "Unable to find base class with appropriate metadata for model '{}'",
                self.model.name()
            ))
        })
    }

    /// Builds the history table and attaches it to the model's metadata.
    ///
    /// With `extends` the existing table is re-registered under its own name
    /// with `extend_existing` set instead of being built from the source columns.
    pub fn build_table(&self, extends: Option<&TableSchema>) -> Result<Arc<TableSchema>> {
        let metadata = self.metadata()?;

        if let Some(existing) = extends {
            debug!(
                "Extending history table '{}' for model '{}'",
                existing.name(),
                self.model.name()
            );
            return metadata.extend_table(existing.name(), existing.columns().to_vec());
        }

        let name = self.table_name()?;
        let version_column = &self.options.version_column_name;
        if self.model.table()?.has_column(version_column) {
            return Err(DbError::ColumnNameCollision {
                table: self.model.table_name().to_string(),
                column: version_column.clone(),
            });
        }

        let mut columns = self.build_reflected_columns()?;
        columns.push(self.build_version_column());

        debug!(
            "Building history table '{}' for model '{}' ({} columns)",
            name,
            self.model.name(),
            columns.len()
        );

        metadata.add_table(TableSchema::new(name, columns))
    }
}
