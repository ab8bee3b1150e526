use crate::config::VersioningOptions;
use crate::core::{DbError, Result};
use crate::inspect::DdlInspector;
use crate::model::DeclarativeBase;
use crate::parser::SqlParserAdapter;
use crate::schema_utils::{class_name_for_table, create_table_sql};
use log::info;
use std::sync::Arc;

use super::VersioningManager;

/// Derives the history tables of a `CREATE TABLE` script.
///
/// Every table in `ddl` is mapped on a fresh declarative base. History tables
/// are built for the tables named in `only`, or for all of them when `only` is
/// empty, and returned as `CREATE TABLE` statements separated by blank lines.
/// `live_ddl` describes the database as it physically exists and is used when
/// `options.inspect_column_order` is set.
pub fn derive_history_ddl(
    ddl: &str,
    options: VersioningOptions,
    live_ddl: Option<&str>,
    only: &[String],
) -> Result<String> {
    let tables = SqlParserAdapter::new().parse_tables(ddl)?;

    if let Some(missing) = only
        .iter()
        .find(|name| !tables.iter().any(|t| t.name() == name.as_str()))
    {
        return Err(DbError::TableNotFound(missing.clone()));
    }

    let base = Arc::new(DeclarativeBase::new("Base"));
    if let Some(live_ddl) = live_ddl {
        base.metadata().bind(Arc::new(DdlInspector::from_sql(live_ddl)?))?;
    }

    let mut models = Vec::new();
    for table in tables {
        let selected = only.is_empty() || only.iter().any(|name| name == table.name());
        let model = base.map_class(class_name_for_table(table.name()), table)?;
        if selected {
            models.push(model);
        }
    }

    let manager = VersioningManager::new(base.clone(), options)?;
    let mut statements = Vec::with_capacity(models.len());
    for model in &models {
        let history = manager.version_class(model)?;
        statements.push(create_table_sql(&*history.table()?));
    }

    info!("Derived {} history table(s)", statements.len());
    Ok(statements.join("\n\n"))
}
