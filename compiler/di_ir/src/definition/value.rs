use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::Literal;

#[derive(Clone)]
pub enum DefinitionValue {
    Literal(Literal),
    /// The container the definition is registered in.
    ContainerSelf,
    /// An already constructed object. Cannot be compiled.
    Object(Rc<dyn Any>),
}

impl fmt::Debug for DefinitionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionValue::Literal(literal) => f.debug_tuple("Literal").field(literal).finish(),
            DefinitionValue::ContainerSelf => write!(f, "ContainerSelf"),
            DefinitionValue::Object(_) => write!(f, "Object(..)"),
        }
    }
}

/// A fixed value. Always shared.
#[derive(Clone, Debug)]
pub struct ValueDefinition {
    value: DefinitionValue,
}

impl ValueDefinition {
    pub fn new(value: impl Into<Literal>) -> Self {
        ValueDefinition {
            value: DefinitionValue::Literal(value.into()),
        }
    }

    pub fn container_self() -> Self {
        ValueDefinition {
            value: DefinitionValue::ContainerSelf,
        }
    }

    pub fn object<T: Any>(object: T) -> Self {
        ValueDefinition {
            value: DefinitionValue::Object(Rc::new(object)),
        }
    }

    pub fn value(&self) -> &DefinitionValue {
        &self.value
    }

    pub fn is_container_self(&self) -> bool {
        matches!(self.value, DefinitionValue::ContainerSelf)
    }
}
