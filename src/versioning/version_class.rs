use crate::core::Result;
use crate::model::ModelClass;
use crate::schema_utils::version_class_name;
use log::info;
use std::sync::Arc;

use super::{ModelFactory, VersionedTableBuilder, VersioningManager};

/// Creates the history class `<Model>Version` for a versioned model.
///
/// Subclasses sharing their parent's table get the parent's history table
/// extended rather than a table of their own.
pub struct VersionClassFactory {
    model: Arc<ModelClass>,
    model_name: String,
}

impl VersionClassFactory {
    pub fn new(model: Arc<ModelClass>) -> Self {
        let model_name = version_class_name(model.name());
        Self { model, model_name }
    }
}

impl ModelFactory for VersionClassFactory {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn create_class(&self, manager: &VersioningManager) -> Result<Arc<ModelClass>> {
        let builder = VersionedTableBuilder::for_model(manager, &self.model);

        let parent_version = match self.model.parent() {
            Some(parent) => Some(VersionClassFactory::new(parent.clone()).invoke(manager)?),
            None => None,
        };

        let table = match &parent_version {
            Some(parent_version) if self.model.shares_parent_table() => {
                builder.build_table(Some(parent_version.table()?.as_ref()))?
            }
            _ => builder.build_table(None)?,
        };

        let mut class = ModelClass::new(self.model_name.clone(), table)
            .with_bases(self.model.bases().iter().cloned());
        if let Some(parent_version) = parent_version {
            class = class.with_parent(parent_version);
        }

        let class = manager.declarative_base().registry().register(class)?;
        info!(
            "Created history model '{}' on table '{}'",
            class.name(),
            class.table_name()
        );
        Ok(class)
    }
}
