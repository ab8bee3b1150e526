pub mod factory;
pub mod manager;
pub mod script;
pub mod table_builder;
pub mod version_class;

pub use factory::ModelFactory;
pub use manager::VersioningManager;
pub use script::derive_history_ddl;
pub use table_builder::VersionedTableBuilder;
pub use version_class::VersionClassFactory;
