use crate::core::Column;
use crate::storage::TableSchema;

/// Renders a `CREATE TABLE` statement for a table definition.
///
/// Single-column keys are declared inline, composite keys as a table constraint.
pub fn create_table_sql(table: &TableSchema) -> String {
    let pk = table.primary_key_names();
    let inline_pk = pk.len() == 1;

    let mut lines: Vec<String> = table
        .columns()
        .iter()
        .map(|col| format!("    {}", column_sql(col, inline_pk)))
        .collect();

    if pk.len() > 1 {
        let names: Vec<String> = pk.iter().map(|name| quote_identifier(name)).collect();
        lines.push(format!("    PRIMARY KEY ({})", names.join(", ")));
    }

    format!(
        "CREATE TABLE {} (\n{}\n);",
        quote_identifier(table.name()),
        lines.join(",\n")
    )
}

fn column_sql(col: &Column, inline_pk: bool) -> String {
    let mut sql = format!("{} {}", quote_identifier(&col.name), col.data_type);
    if col.primary_key && inline_pk {
        sql.push_str(" PRIMARY KEY");
    } else if !col.nullable {
        sql.push_str(" NOT NULL");
    }
    if col.unique {
        sql.push_str(" UNIQUE");
    }
    if let Some(default) = &col.default {
        sql.push_str(" DEFAULT ");
        sql.push_str(default);
    }
    sql
}

/// Quotes an identifier only when it is not a plain lowercase name.
pub fn quote_identifier(name: &str) -> String {
    let plain = !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_')
        && !name.starts_with(|ch: char| ch.is_ascii_digit());
    if plain {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}
