use crate::core::Result;
use crate::model::ModelClass;
use std::sync::Arc;
use tracing::{Level, event, info_span};

use super::VersioningManager;

/// Creates a model class at most once per declarative registry.
pub trait ModelFactory {
    /// Registry key of the class this factory creates.
    fn model_name(&self) -> &str;

    /// Builds and registers the class. Only called when the registry has no
    /// class under [`ModelFactory::model_name`].
    fn create_class(&self, manager: &VersioningManager) -> Result<Arc<ModelClass>>;

    /// Returns the registered class, creating it first if needed.
    fn invoke(&self, manager: &VersioningManager) -> Result<Arc<ModelClass>> {
        let span = info_span!("model_factory", model = self.model_name());
        let _guard = span.enter();

        let registry = manager.declarative_base().registry();
        match registry.get(self.model_name())? {
            Some(existing) => {
                event!(Level::DEBUG, "model already registered");
                Ok(existing)
            }
            None => {
                event!(Level::INFO, "creating model class");
                self.create_class(manager)
            }
        }
    }
}
