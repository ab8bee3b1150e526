use super::{BaseClass, ModelClass};
use crate::config::VersioningOverrides;
use crate::core::{DbError, Result};
use crate::storage::{Metadata, TableSchema};
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Model name -> mapped class.
#[derive(Debug, Default)]
pub struct Registry {
    mappers: RwLock<HashMap<String, Arc<ModelClass>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.mappers.read()?.contains_key(name))
    }

    pub fn get(&self, name: &str) -> Result<Option<Arc<ModelClass>>> {
        Ok(self.mappers.read()?.get(name).cloned())
    }

    /// Registers a class under its own name. A name can be registered once.
    pub fn register(&self, class: ModelClass) -> Result<Arc<ModelClass>> {
        let mut mappers = self.mappers.write()?;
        if mappers.contains_key(class.name()) {
            return Err(DbError::ModelExists(class.name().to_string()));
        }

        debug!("Registry: mapping model '{}' to table '{}'", class.name(), class.table_name());

        let class = Arc::new(class);
        mappers.insert(class.name().to_string(), class.clone());
        Ok(class)
    }

    pub fn names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.mappers.read()?.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.mappers.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// Root of a family of mapped models: one schema registry, one model registry.
#[derive(Debug)]
pub struct DeclarativeBase {
    name: String,
    metadata: Metadata,
    registry: Registry,
}

impl DeclarativeBase {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_metadata(name, Metadata::new())
    }

    pub fn with_metadata(name: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            name: name.into(),
            metadata,
            registry: Registry::new(),
        }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn metadata(&self) -> &Metadata { &self.metadata }
    pub fn registry(&self) -> &Registry { &self.registry }

    /// This base as seen from a subclass.
    pub fn as_base(&self) -> BaseClass {
        BaseClass::new(self.name.clone(), self.metadata.clone())
    }

    /// Attaches `table` to the metadata and registers a class for it.
    pub fn map_class(&self, name: impl Into<String>, table: TableSchema) -> Result<Arc<ModelClass>> {
        self.map(ModelClassSpec::new(name, table))
    }

    /// Attaches and registers a class with extra bases, a parent or overrides.
    ///
    /// A subclass declaring its parent's table name shares that table. Columns
    /// it declares beyond the parent's are appended to the shared table.
    pub fn map(&self, spec: ModelClassSpec) -> Result<Arc<ModelClass>> {
        let name = spec.name;
        if self.registry.contains(&name)? {
            return Err(DbError::ModelExists(name));
        }

        let table = match &spec.parent {
            Some(parent) if parent.table_name() == spec.table.name() => {
                spec.table.validate()?;
                debug!("Mapping '{}' onto its parent's table '{}'", name, parent.table_name());
                self.metadata
                    .extend_table(spec.table.name(), spec.table.columns().to_vec())?
            }
            _ => self.metadata.add_table(spec.table)?,
        };

        let mut class = ModelClass::new(name, table)
            .with_base(self.as_base())
            .with_bases(spec.mixins)
            .with_versioning(spec.versioned);
        if let Some(parent) = spec.parent {
            class = class.with_parent(parent);
        }
        self.registry.register(class)
    }
}

/// Declaration of a class to map on a [`DeclarativeBase`].
#[derive(Debug)]
pub struct ModelClassSpec {
    name: String,
    table: TableSchema,
    mixins: Vec<BaseClass>,
    parent: Option<Arc<ModelClass>>,
    versioned: VersioningOverrides,
}

impl ModelClassSpec {
    pub fn new(name: impl Into<String>, table: TableSchema) -> Self {
        Self {
            name: name.into(),
            table,
            mixins: Vec::new(),
            parent: None,
            versioned: Default::default(),
        }
    }

    pub fn mixin(mut self, base: BaseClass) -> Self {
        self.mixins.push(base);
        self
    }

    pub fn parent(mut self, parent: Arc<ModelClass>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn versioned(mut self, overrides: VersioningOverrides) -> Self {
        self.versioned = overrides;
        self
    }
}
