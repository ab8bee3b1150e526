// ============================================================================
// src/parser/adapter.rs - CREATE TABLE statements -> TableSchema
// ============================================================================

use sqlparser::ast as sql_ast;
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;
use crate::core::{Column, DataType, DbError, Result};
use crate::storage::TableSchema;

pub struct SqlParserAdapter {
    dialect: PostgreSqlDialect,
}

impl SqlParserAdapter {
    pub fn new() -> Self {
        Self {
            dialect: PostgreSqlDialect {},
        }
    }

    /// Parses a script of `CREATE TABLE` statements, keeping declaration order.
    pub fn parse_tables(&self, sql: &str) -> Result<Vec<TableSchema>> {
        let external_stmts = Parser::parse_sql(&self.dialect, sql)
            .map_err(|e| DbError::ParseError(e.to_string()))?;

        external_stmts
            .into_iter()
            .map(|stmt| self.convert_statement(stmt))
            .collect()
    }

    fn convert_statement(&self, stmt: sql_ast::Statement) -> Result<TableSchema> {
        match stmt {
            sql_ast::Statement::CreateTable(create) => self.convert_create_table(create),
            other => Err(DbError::ParseError(format!(
                "Only CREATE TABLE statements are supported, got: {}",
                other
            ))),
        }
    }

    fn convert_create_table(&self, create: sql_ast::CreateTable) -> Result<TableSchema> {
        let table_name = extract_table_name(&create.name)?;
        let mut columns = create
            .columns
            .into_iter()
            .map(|col| self.convert_column_def(col))
            .collect::<Result<Vec<_>>>()?;

        // Table-level PRIMARY KEY (...) / UNIQUE (...) constraints
        for constraint in &create.constraints {
            let (names, is_primary) = match constraint {
                sql_ast::TableConstraint::PrimaryKey { columns, .. } => {
                    (columns.iter().map(|c| c.to_string()).collect::<Vec<_>>(), true)
                }
                sql_ast::TableConstraint::Unique { columns, .. } if columns.len() == 1 => {
                    (columns.iter().map(|c| c.to_string()).collect::<Vec<_>>(), false)
                }
                _ => continue,
            };

            for raw in names {
                let name = constraint_column_name(&raw);
                let column = columns
                    .iter_mut()
                    .find(|col| col.name == name)
                    .ok_or_else(|| DbError::ColumnNotFound(name.clone(), table_name.clone()))?;
                if is_primary {
                    column.primary_key = true;
                    column.nullable = false;
                } else {
                    column.unique = true;
                }
            }
        }

        let table = TableSchema::new(table_name, columns);
        table.validate()?;
        Ok(table)
    }

    fn convert_column_def(&self, col: sql_ast::ColumnDef) -> Result<Column> {
        let data_type = self.convert_data_type(&col.data_type)?;
        let mut column = Column::new(col.name.value, data_type);

        for option in col.options {
            match option.option {
                sql_ast::ColumnOption::NotNull => column.nullable = false,
                sql_ast::ColumnOption::Null => column.nullable = true,
                sql_ast::ColumnOption::Default(expr) => column.default = Some(expr.to_string()),
                sql_ast::ColumnOption::Unique { is_primary, .. } => {
                    if is_primary {
                        column.primary_key = true;
                        column.nullable = false;
                    } else {
                        column.unique = true;
                    }
                }
                _ => {}
            }
        }

        Ok(column)
    }

    fn convert_data_type(&self, dt: &sql_ast::DataType) -> Result<DataType> {
        match dt {
            sql_ast::DataType::SmallInt(_) => Ok(DataType::SmallInt),

            sql_ast::DataType::Int(_)
            | sql_ast::DataType::Integer(_) => Ok(DataType::Integer),

            sql_ast::DataType::BigInt(_) => Ok(DataType::BigInt),

            sql_ast::DataType::Float(_)
            | sql_ast::DataType::Real => Ok(DataType::Float),

            sql_ast::DataType::Double(_)
            | sql_ast::DataType::DoublePrecision => Ok(DataType::Double),

            sql_ast::DataType::Numeric(_)
            | sql_ast::DataType::Decimal(_) => Ok(DataType::Numeric),

            sql_ast::DataType::Varchar(length)
            | sql_ast::DataType::CharacterVarying(length) => {
                Ok(DataType::Varchar(character_length(length)))
            }

            sql_ast::DataType::Text
            | sql_ast::DataType::Char(_)
            | sql_ast::DataType::String(_) => Ok(DataType::Text),

            sql_ast::DataType::Boolean
            | sql_ast::DataType::Bool => Ok(DataType::Boolean),

            sql_ast::DataType::Date => Ok(DataType::Date),
            sql_ast::DataType::Timestamp(..) => Ok(DataType::Timestamp),

            sql_ast::DataType::JSON
            | sql_ast::DataType::JSONB => Ok(DataType::Json),

            _ => Err(DbError::ParseError(format!(
                "Unsupported data type: {}",
                dt
            ))),
        }
    }
}

impl Default for SqlParserAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn character_length(length: &Option<sql_ast::CharacterLength>) -> Option<u64> {
    match length {
        Some(sql_ast::CharacterLength::IntegerLength { length, .. }) => Some(*length),
        _ => None,
    }
}

fn extract_table_name(name: &sql_ast::ObjectName) -> Result<String> {
    name.0
        .last()
        .map(|ident| trim_sql_identifier(&ident.to_string()))
        .ok_or_else(|| DbError::ParseError("Invalid table name".into()))
}

/// Index columns may render with ordering or operator class suffixes.
fn constraint_column_name(raw: &str) -> String {
    let head = raw.split_whitespace().next().unwrap_or(raw);
    trim_sql_identifier(head)
}

fn trim_sql_identifier(value: &str) -> String {
    value
        .trim_matches('"')
        .trim_matches('`')
        .to_string()
}

// ============================================================================
// TESTS
// ============================================================================
