pub mod options;

pub use options::{
    DEFAULT_TABLE_NAME, DEFAULT_VERSION_COLUMN_NAME, VersioningOptions, VersioningOverrides,
};
