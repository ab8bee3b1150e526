use crate::config::VersioningOptions;
use crate::core::Result;
use crate::model::{DeclarativeBase, ModelClass};
use log::info;
use std::sync::Arc;

use super::{ModelFactory, VersionClassFactory};

/// Coordinates versioning for the models of one declarative base.
#[derive(Debug)]
pub struct VersioningManager {
    declarative_base: Arc<DeclarativeBase>,
    options: VersioningOptions,
}

impl VersioningManager {
    /// Creates a manager, rejecting invalid options up front.
    pub fn new(declarative_base: Arc<DeclarativeBase>, options: VersioningOptions) -> Result<Self> {
        options.validate()?;
        info!(
            "Versioning enabled for base '{}' (table_name='{}', version_column_name='{}')",
            declarative_base.name(),
            options.table_name,
            options.version_column_name
        );
        Ok(Self {
            declarative_base,
            options,
        })
    }

    pub fn with_defaults(declarative_base: Arc<DeclarativeBase>) -> Self {
        Self {
            declarative_base,
            options: VersioningOptions::default(),
        }
    }

    pub fn declarative_base(&self) -> &DeclarativeBase {
        &self.declarative_base
    }

    pub fn options(&self) -> &VersioningOptions {
        &self.options
    }

    /// Manager options with the model's own overrides applied.
    pub fn options_for(&self, model: &ModelClass) -> VersioningOptions {
        let overrides = model.versioning();
        if overrides.is_empty() {
            self.options.clone()
        } else {
            self.options.merged(overrides)
        }
    }

    /// History class of `model`, created on first request.
    pub fn version_class(&self, model: &Arc<ModelClass>) -> Result<Arc<ModelClass>> {
        VersionClassFactory::new(model.clone()).invoke(self)
    }
}
