//! Definition kinds.
//!
//! A [`Definition`] is a recipe for one identifier. The four built-in kinds
//! cover constructing a class, calling a factory, aliasing another id and
//! returning a fixed value; anything else plugs in through
//! [`CustomDefinition`].

mod alias;
mod class;
mod custom;
mod factory;
mod value;

pub use alias::AliasDefinition;
pub use class::ClassDefinition;
pub use custom::{CustomDefinition, Resolve};
pub use factory::{Callable, FactoryDefinition, FactoryFn};
pub use value::{DefinitionValue, ValueDefinition};

use crate::Tag;

#[derive(Debug)]
pub enum Definition {
    Class(ClassDefinition),
    Factory(FactoryDefinition),
    Alias(AliasDefinition),
    Value(ValueDefinition),
    Custom(Box<dyn CustomDefinition>),
}

impl Definition {
    /// Name of the definition kind, used in diagnostics.
    pub fn kind(&self) -> &str {
        match self {
            Definition::Class(_) => "ClassDefinition",
            Definition::Factory(_) => "FactoryDefinition",
            Definition::Alias(_) => "AliasDefinition",
            Definition::Value(_) => "ValueDefinition",
            Definition::Custom(custom) => custom.kind(),
        }
    }

    /// Whether one instance is kept per container.
    pub fn is_shared(&self) -> bool {
        match self {
            Definition::Class(class) => class.is_shared(),
            Definition::Factory(factory) => factory.is_shared(),
            Definition::Alias(_) | Definition::Value(_) => true,
            Definition::Custom(custom) => custom.is_shared(),
        }
    }

    pub fn is_lazy(&self) -> bool {
        match self {
            Definition::Class(class) => class.is_lazy(),
            Definition::Factory(factory) => factory.is_lazy(),
            _ => false,
        }
    }

    /// Class a lazy proxy stands in for; `None` unless the definition is lazy.
    pub fn lazy_proxy_class(&self) -> Option<&str> {
        match self {
            Definition::Class(class) if class.is_lazy() => Some(class.class_name()),
            Definition::Factory(factory) if factory.is_lazy() => factory.proxy_class(),
            _ => None,
        }
    }

    pub fn tags(&self) -> &[Tag] {
        match self {
            Definition::Class(class) => class.tags(),
            Definition::Factory(factory) => factory.tags(),
            Definition::Custom(custom) => custom.tags(),
            Definition::Alias(_) | Definition::Value(_) => &[],
        }
    }

    pub fn tag_priority(&self, name: &str) -> Option<i32> {
        self.tags()
            .iter()
            .find(|tag| tag.name == name)
            .map(|tag| tag.priority)
    }

    pub fn as_class(&self) -> Option<&ClassDefinition> {
        match self {
            Definition::Class(class) => Some(class),
            _ => None,
        }
    }
}

impl From<ClassDefinition> for Definition {
    fn from(definition: ClassDefinition) -> Self {
        Definition::Class(definition)
    }
}

impl From<FactoryDefinition> for Definition {
    fn from(definition: FactoryDefinition) -> Self {
        Definition::Factory(definition)
    }
}

impl From<AliasDefinition> for Definition {
    fn from(definition: AliasDefinition) -> Self {
        Definition::Alias(definition)
    }
}

impl From<ValueDefinition> for Definition {
    fn from(definition: ValueDefinition) -> Self {
        Definition::Value(definition)
    }
}

impl From<Box<dyn CustomDefinition>> for Definition {
    fn from(definition: Box<dyn CustomDefinition>) -> Self {
        Definition::Custom(definition)
    }
}
