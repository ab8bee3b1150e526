pub mod ddl;
pub mod naming;

pub use ddl::{create_table_sql, quote_identifier};
pub use naming::{
    class_name_for_table, count_template_slots, format_table_name, sanitize_sql_identifier,
    table_name, version_class_name,
};
