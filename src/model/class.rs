use crate::config::VersioningOverrides;
use crate::core::Result;
use crate::storage::{Metadata, TableSchema};
use std::sync::Arc;

/// A direct base of a model class.
///
/// Only declarative bases carry a schema registry; mixins have none.
#[derive(Debug, Clone)]
pub struct BaseClass {
    name: String,
    metadata: Option<Metadata>,
}

impl BaseClass {
    pub fn new(name: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            name: name.into(),
            metadata: Some(metadata),
        }
    }

    pub fn mixin(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: None,
        }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn metadata(&self) -> Option<&Metadata> { self.metadata.as_ref() }
}

/// A mapped model: a name bound to a table.
///
/// The table is bound by name. Once it is attached to the metadata of one of
/// the model's bases, [`ModelClass::table`] returns the registered definition,
/// so extensions made after mapping are seen by every class sharing the table.
#[derive(Debug, Clone)]
pub struct ModelClass {
    name: String,
    /// Definition the class was mapped with
    table: Arc<TableSchema>,
    bases: Vec<BaseClass>,
    /// Mapped superclass for inheritance hierarchies
    parent: Option<Arc<ModelClass>>,
    versioned: VersioningOverrides,
}

impl ModelClass {
    pub fn new(name: impl Into<String>, table: Arc<TableSchema>) -> Self {
        Self {
            name: name.into(),
            table,
            bases: Vec::new(),
            parent: None,
            versioned: VersioningOverrides::default(),
        }
    }

    pub fn with_base(mut self, base: BaseClass) -> Self {
        self.bases.push(base);
        self
    }

    pub fn with_bases(mut self, bases: impl IntoIterator<Item = BaseClass>) -> Self {
        self.bases.extend(bases);
        self
    }

    pub fn with_parent(mut self, parent: Arc<ModelClass>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_versioning(mut self, overrides: VersioningOverrides) -> Self {
        self.versioned = overrides;
        self
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn table_name(&self) -> &str { self.table.name() }
    pub fn bases(&self) -> &[BaseClass] { &self.bases }
    pub fn parent(&self) -> Option<&Arc<ModelClass>> { self.parent.as_ref() }
    pub fn versioning(&self) -> &VersioningOverrides { &self.versioned }

    /// Schema registry of the first direct base that carries one.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.bases.iter().find_map(|base| base.metadata())
    }

    /// Current definition of the model's table.
    ///
    /// Falls back to the mapped definition when no base metadata holds a
    /// table of that name.
    pub fn table(&self) -> Result<Arc<TableSchema>> {
        if let Some(metadata) = self.metadata() {
            if let Some(table) = metadata.find_table(self.table.name())? {
                return Ok(table);
            }
        }
        Ok(self.table.clone())
    }

    /// True when this model shares its parent's table (single-table inheritance).
    pub fn shares_parent_table(&self) -> bool {
        self.parent
            .as_ref()
            .is_some_and(|parent| parent.table_name() == self.table_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Column, DataType};

    fn table(name: &str) -> Arc<TableSchema> {
        Arc::new(TableSchema::new(name, vec![Column::new("id", DataType::Integer).primary_key()]))
    }

    #[test]
    fn test_single_table_inheritance_detection() {
        let parent = Arc::new(ModelClass::new("Article", table("articles")));
        let same_table = ModelClass::new("NewsArticle", table("articles")).with_parent(parent.clone());
        let own_table = ModelClass::new("Review", table("reviews")).with_parent(parent);

        assert!(same_table.shares_parent_table());
        assert!(!own_table.shares_parent_table());
    }

    #[test]
    fn test_table_follows_metadata() {
        let metadata = Metadata::new();
        let mapped = metadata.add_table(TableSchema::new("articles", vec![])).unwrap();
        let model = ModelClass::new("Article", mapped.clone())
            .with_base(BaseClass::mixin("Timestamped"))
            .with_base(BaseClass::new("Base", metadata.clone()));

        let extended = metadata
            .extend_table("articles", vec![Column::new("body", DataType::Text)])
            .unwrap();

        let current = model.table().unwrap();
        assert!(Arc::ptr_eq(&current, &extended));
        assert!(current.has_column("body"));
        assert!(!mapped.has_column("body"));
        assert!(model.metadata().unwrap().ptr_eq(&metadata));
    }

    #[test]
    fn test_unattached_table_is_the_mapped_one() {
        let mapped = table("articles");
        let model = ModelClass::new("Article", mapped.clone()).with_base(BaseClass::mixin("Timestamped"));
        assert!(model.metadata().is_none());
        assert!(Arc::ptr_eq(&model.table().unwrap(), &mapped));
    }

    #[test]
    fn test_mixin_has_no_metadata() {
        assert!(BaseClass::mixin("Timestamped").metadata().is_none());
        assert!(BaseClass::new("Base", Metadata::new()).metadata().is_some());
    }
}
