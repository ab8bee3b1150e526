pub mod catalog;
pub mod metadata;
pub mod table;

pub use catalog::Catalog;
pub use metadata::Metadata;
pub use table::TableSchema;
