use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Table '{0}' already exists")]
    TableExists(String),

    #[error("Table '{0}' not found")]
    TableNotFound(String),

    #[error("Column '{0}' not found in table '{1}'")]
    ColumnNotFound(String, String),

    #[error("Duplicate column '{0}' in table '{1}'")]
    DuplicateColumn(String, String),

    #[error(
        "Version column '{column}' collides with an existing column of table '{table}'"
    )]
    ColumnNameCollision { table: String, column: String },

    #[error("Model '{0}' is already registered")]
    ModelExists(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Format error: {0}")]
    FormatError(String),

    #[error("Metadata is not bound to a database: {0}")]
    NotBound(String),

    #[error("Lock error: {0}")]
    LockError(String),

    #[error("I/0 error: {0}")]
    IoError(String),
}

pub type Result<T> = std::result::Result<T, DbError>;


impl<T> From<std::sync::PoisonError<T>> for DbError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}

impl From<std::io::Error> for DbError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}
