// ============================================================================
// RustMemDB History Library
// ============================================================================

//! History table derivation for mapped models.
//!
//! For every versioned model the library derives a `<table>_version` table that
//! mirrors the source columns and adds a `BIGINT` version column to the
//! primary key, then registers a `<Model>Version` class for it exactly once.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use memodb_history::{
//!     Column, DataType, DeclarativeBase, TableSchema, VersioningManager, VersioningOptions,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let base = Arc::new(DeclarativeBase::new("Base"));
//! let article = base.map_class(
//!     "Article",
//!     TableSchema::new("articles", vec![
//!         Column::new("id", DataType::Integer).primary_key(),
//!         Column::new("slug", DataType::Text).unique(),
//!     ]),
//! )?;
//!
//! let manager = VersioningManager::new(base.clone(), VersioningOptions::new().table_name("%s_history"))?;
//! let history = manager.version_class(&article)?;
//!
//! assert_eq!(history.name(), "ArticleVersion");
//! let table = history.table()?;
//! assert_eq!(table.name(), "articles_history");
//! assert_eq!(table.primary_key_names(), vec!["transaction_id"]);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod storage;
pub mod config;
pub mod inspect;
pub mod model;
pub mod parser;
pub mod schema_utils;
pub mod versioning;

// Re-export main types for convenience
pub use crate::core::{Column, DataType, DbError, Result, Schema};
pub use crate::storage::{Catalog, Metadata, TableSchema};
pub use crate::config::{VersioningOptions, VersioningOverrides};
pub use crate::inspect::{DdlInspector, ReflectedColumn, SchemaInspector};
pub use crate::model::{BaseClass, DeclarativeBase, ModelClass, ModelClassSpec, Registry};
pub use crate::parser::SqlParserAdapter;
pub use crate::versioning::{
    derive_history_ddl, ModelFactory, VersionClassFactory, VersionedTableBuilder, VersioningManager,
};
