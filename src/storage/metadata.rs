use super::{Catalog, TableSchema};
use crate::core::{Column, DbError, Result};
use crate::inspect::SchemaInspector;
use std::fmt;
use std::sync::{Arc, RwLock};

struct MetadataInner {
    catalog: RwLock<Catalog>,
    bind: RwLock<Option<Arc<dyn SchemaInspector>>>,
}

/// Shared schema registry.
///
/// Cloning hands out another handle to the same registry; use [`Metadata::ptr_eq`]
/// to check whether two handles point at the same one.
#[derive(Clone)]
pub struct Metadata {
    inner: Arc<MetadataInner>,
}

impl Metadata {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetadataInner {
                catalog: RwLock::new(Catalog::new()),
                bind: RwLock::new(None),
            }),
        }
    }

    /// Binds the registry to a database that can report its live column layout.
    pub fn bind(&self, inspector: Arc<dyn SchemaInspector>) -> Result<()> {
        *self.inner.bind.write()? = Some(inspector);
        Ok(())
    }

    pub fn inspector(&self) -> Result<Arc<dyn SchemaInspector>> {
        self.inner
            .bind
            .read()?
            .clone()
            .ok_or_else(|| DbError::NotBound("no inspector attached to metadata".into()))
    }

    pub fn is_bound(&self) -> Result<bool> {
        Ok(self.inner.bind.read()?.is_some())
    }

    pub fn add_table(&self, schema: TableSchema) -> Result<Arc<TableSchema>> {
        let name = schema.name().to_string();
        let mut catalog = self.inner.catalog.write()?;
        *catalog = catalog.clone().with_table(schema)?;
        Ok(catalog.get_table(&name)?.clone())
    }

    pub fn extend_table(&self, name: &str, columns: Vec<Column>) -> Result<Arc<TableSchema>> {
        let mut catalog = self.inner.catalog.write()?;
        *catalog = catalog.clone().with_extended_table(name, columns)?;
        Ok(catalog.get_table(name)?.clone())
    }

    pub fn remove_table(&self, name: &str) -> Result<()> {
        let mut catalog = self.inner.catalog.write()?;
        *catalog = catalog.clone().without_table(name)?;
        Ok(())
    }

    pub fn table(&self, name: &str) -> Result<Arc<TableSchema>> {
        Ok(self.inner.catalog.read()?.get_table(name)?.clone())
    }

    /// Like [`Metadata::table`], but an unknown name is `None` rather than an error.
    pub fn find_table(&self, name: &str) -> Result<Option<Arc<TableSchema>>> {
        let catalog = self.inner.catalog.read()?;
        Ok(catalog.get_table(name).ok().cloned())
    }

    pub fn contains_table(&self, name: &str) -> Result<bool> {
        Ok(self.inner.catalog.read()?.table_exists(name))
    }

    pub fn table_names(&self) -> Result<Vec<String>> {
        let catalog = self.inner.catalog.read()?;
        Ok(catalog.list_tables().into_iter().map(str::to_string).collect())
    }

    /// Snapshot of the current catalog.
    pub fn catalog(&self) -> Result<Catalog> {
        Ok(self.inner.catalog.read()?.clone())
    }

    pub fn ptr_eq(&self, other: &Metadata) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metadata")
            .field("tables", &self.table_names().ok())
            .field("bound", &self.is_bound().ok())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DataType;

    #[test]
    fn test_clones_share_registry() {
        let metadata = Metadata::new();
        let handle = metadata.clone();
        handle
            .add_table(TableSchema::new("t", vec![Column::new("a", DataType::Integer)]))
            .unwrap();

        assert!(metadata.contains_table("t").unwrap());
        assert!(metadata.ptr_eq(&handle));
        assert!(!metadata.ptr_eq(&Metadata::new()));
    }

    #[test]
    fn test_unbound_inspector() {
        let metadata = Metadata::new();
        assert!(!metadata.is_bound().unwrap());
        assert!(matches!(metadata.inspector(), Err(DbError::NotBound(_))));
    }

    #[test]
    fn test_snapshot_does_not_follow_later_changes() {
        let metadata = Metadata::new();
        let before = metadata.catalog().unwrap();
        metadata
            .add_table(TableSchema::new("t", vec![Column::new("a", DataType::Integer)]))
            .unwrap();
        assert!(!before.table_exists("t"));
        metadata.remove_table("t").unwrap();
        assert!(metadata.table_names().unwrap().is_empty());
    }

    #[test]
    fn test_find_table() {
        let metadata = Metadata::new();
        let added = metadata
            .add_table(TableSchema::new("t", vec![Column::new("a", DataType::Integer)]))
            .unwrap();

        assert!(Arc::ptr_eq(&metadata.find_table("t").unwrap().unwrap(), &added));
        assert!(metadata.find_table("missing").unwrap().is_none());
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let metadata = Metadata::new();
        let handle = metadata.clone();
        let _ = std::thread::spawn(move || {
            let _guard = handle.inner.catalog.write().unwrap();
            panic!("poison the catalog lock");
        })
        .join();

        assert!(matches!(metadata.contains_table("t"), Err(DbError::LockError(_))));
        assert!(matches!(metadata.find_table("t"), Err(DbError::LockError(_))));
        assert!(metadata.is_bound().is_ok());
    }
}
