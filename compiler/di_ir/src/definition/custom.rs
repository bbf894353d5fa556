use std::any::Any;
use std::fmt::Debug;

use di_runtime::{Container, ContainerError, Value};

use crate::Tag;

/// Callback into the resolver for definitions that depend on other ids.
pub trait Resolve {
    fn resolve_definition(&self, id: &str) -> Result<(), ContainerError>;
}

/// A definition kind outside the built-in four.
///
/// Custom kinds resolve and instantiate through their own hooks. They only
/// compile when a matching definition compiler is registered.
pub trait CustomDefinition: Debug {
    /// Kind name reported in diagnostics.
    fn kind(&self) -> &str;

    fn is_shared(&self) -> bool {
        true
    }

    fn tags(&self) -> &[Tag] {
        &[]
    }

    /// Resolve the ids this definition depends on.
    fn resolve(&self, _resolver: &dyn Resolve) -> Result<(), ContainerError> {
        Ok(())
    }

    fn get(&self, container: &dyn Container) -> Result<Value, ContainerError>;

    /// Downcast hook for definition compilers.
    fn as_any(&self) -> &dyn Any;
}
