pub mod data_type;
pub mod error;
pub mod types;

pub use data_type::DataType;
pub use error::{DbError, Result};
pub use types::{Column, Schema};
