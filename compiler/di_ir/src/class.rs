//! Class metadata standing in for runtime reflection.
//!
//! Rust has no constructor reflection, so each injectable type is described
//! by a [`ClassInfo`]: its path, whether it can be instantiated, and its
//! constructor parameters with their type hints. Descriptions are registered
//! in code or loaded from a JSON manifest produced by a build step.

use std::rc::Rc;

use di_runtime::{construct, ConstructFn, ContainerError, Injectable};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::Literal;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Concrete,
    /// Interfaces and abstract classes: usable as hints, never constructed.
    Abstract,
}

/// One declared type of a constructor parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeHint {
    /// A class or interface path; resolvable through the container.
    Class(String),
    /// A builtin such as `int` or `string`; never inferred.
    Scalar(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Declared types; more than one for union types.
    #[serde(default)]
    pub types: Vec<TypeHint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Literal>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Parameter {
            name: name.into(),
            types: Vec::new(),
            default: None,
        }
    }

    #[must_use]
    pub fn class(mut self, path: impl Into<String>) -> Self {
        self.types.push(TypeHint::Class(path.into()));
        self
    }

    #[must_use]
    pub fn scalar(mut self, name: impl Into<String>) -> Self {
        self.types.push(TypeHint::Scalar(name.into()));
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<Literal>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Class paths among the hints, in declaration order.
    pub fn class_hints(&self) -> impl Iterator<Item = &str> {
        self.types.iter().filter_map(|hint| match hint {
            TypeHint::Class(path) => Some(path.as_str()),
            TypeHint::Scalar(_) => None,
        })
    }
}

fn visible() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassInfo {
    /// Rust path of the type, as written in generated code.
    pub name: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default = "visible")]
    pub constructor_visible: bool,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Abstract types this class can stand in for.
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(skip)]
    pub construct: Option<ConstructFn>,
}

impl ClassInfo {
    /// A concrete class with a visible constructor and no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        ClassInfo {
            name: name.into(),
            kind: ClassKind::Concrete,
            is_final: false,
            constructor_visible: true,
            parameters: Vec::new(),
            implements: Vec::new(),
            construct: None,
        }
    }

    /// A concrete class constructed through `T`'s [`Injectable`] impl.
    pub fn of<T: Injectable>(name: impl Into<String>) -> Self {
        ClassInfo {
            construct: Some(construct::<T> as ConstructFn),
            ..ClassInfo::new(name)
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        ClassInfo {
            kind: ClassKind::Abstract,
            ..ClassInfo::new(name)
        }
    }

    #[must_use]
    pub fn final_class(mut self) -> Self {
        self.is_final = true;
        self
    }

    #[must_use]
    pub fn private_constructor(mut self) -> Self {
        self.constructor_visible = false;
        self
    }

    #[must_use]
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn implements(mut self, name: impl Into<String>) -> Self {
        self.implements.push(name.into());
        self
    }

    pub fn is_instantiable(&self) -> bool {
        self.kind == ClassKind::Concrete && self.constructor_visible
    }

    pub fn parameter_index(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name == name)
    }
}

/// Source of class metadata for the resolver.
pub trait TypeIntrospector {
    fn class_info(&self, name: &str) -> Option<Rc<ClassInfo>>;
}

#[derive(Serialize, Deserialize)]
struct Manifest {
    classes: Vec<ClassInfo>,
}

/// Default introspector: a table of registered class descriptions.
#[derive(Clone, Debug, Default)]
pub struct ClassRegistry {
    classes: FxHashMap<String, Rc<ClassInfo>>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load descriptions from `{"classes": [...]}`.
    ///
    /// Manifest entries carry no constructors; attach them with
    /// [`ClassRegistry::bind_constructor`] before instantiating.
    pub fn from_manifest(json: &str) -> Result<Self, ContainerError> {
        let manifest: Manifest = serde_json::from_str(json)
            .map_err(|err| ContainerError::invalid(format!("Invalid class manifest: {err}")))?;

        let mut registry = ClassRegistry::new();
        for class in manifest.classes {
            registry.register(class);
        }
        Ok(registry)
    }

    /// Serialize the registry as a manifest, classes sorted by name.
    pub fn manifest(&self) -> Result<String, ContainerError> {
        let mut classes: Vec<ClassInfo> = self.classes.values().map(|c| (**c).clone()).collect();
        classes.sort_by(|a, b| a.name.cmp(&b.name));

        serde_json::to_string_pretty(&Manifest { classes })
            .map_err(|err| ContainerError::invalid(format!("Invalid class manifest: {err}")))
    }

    pub fn register(&mut self, class: ClassInfo) -> &mut Self {
        self.classes.insert(class.name.clone(), Rc::new(class));
        self
    }

    #[must_use]
    pub fn with(mut self, class: ClassInfo) -> Self {
        self.register(class);
        self
    }

    pub fn bind_constructor(
        &mut self,
        name: &str,
        construct: ConstructFn,
    ) -> Result<(), ContainerError> {
        let class = self.classes.get_mut(name).ok_or_else(|| {
            ContainerError::invalid(format!("The class \"{name}\" does not exist"))
        })?;
        Rc::make_mut(class).construct = Some(construct);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl TypeIntrospector for ClassRegistry {
    fn class_info(&self, name: &str) -> Option<Rc<ClassInfo>> {
        self.classes.get(name).cloned()
    }
}
