pub mod class;
pub mod registry;

pub use class::{BaseClass, ModelClass};
pub use registry::{DeclarativeBase, ModelClassSpec, Registry};
