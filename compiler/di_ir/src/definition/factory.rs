use std::fmt;
use std::rc::Rc;

use di_runtime::{Container, ContainerError, Value};

use crate::Tag;

/// Signature of a factory that can be compiled.
pub type FactoryFn = fn(&dyn Container) -> Result<Value, ContainerError>;

/// The function a factory definition calls.
#[derive(Clone)]
pub enum Callable {
    /// A named function, emitted by path.
    Path { path: String, func: FactoryFn },
    /// A non-capturing closure together with its source text.
    Inline {
        param: String,
        body: String,
        func: FactoryFn,
    },
    /// A closure with captured state. Usable at runtime only.
    Closure(Rc<dyn Fn(&dyn Container) -> Result<Value, ContainerError>>),
}

impl Callable {
    pub fn path(path: &str, func: FactoryFn) -> Self {
        Callable::Path {
            path: path.chars().filter(|c| !c.is_whitespace()).collect(),
            func,
        }
    }

    pub fn inline(param: &str, body: &str, func: FactoryFn) -> Self {
        Callable::Inline {
            param: param.to_owned(),
            body: body.to_owned(),
            func,
        }
    }

    pub fn closure(
        func: impl Fn(&dyn Container) -> Result<Value, ContainerError> + 'static,
    ) -> Self {
        Callable::Closure(Rc::new(func))
    }

    pub fn call(&self, container: &dyn Container) -> Result<Value, ContainerError> {
        match self {
            Callable::Path { func, .. } | Callable::Inline { func, .. } => func(container),
            Callable::Closure(func) => func(container),
        }
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Path { path, .. } => write!(f, "Path({path})"),
            Callable::Inline { param, body, .. } => write!(f, "Inline(|{param}| {body})"),
            Callable::Closure(_) => write!(f, "Closure(..)"),
        }
    }
}

/// Produces its value by calling a function with the container.
#[derive(Clone, Debug)]
pub struct FactoryDefinition {
    callable: Callable,
    shared: bool,
    lazy: bool,
    proxy_class: Option<String>,
    tags: Vec<Tag>,
}

impl FactoryDefinition {
    /// Shared, eager factory.
    pub fn new(callable: Callable) -> Self {
        FactoryDefinition {
            callable,
            shared: true,
            lazy: false,
            proxy_class: None,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    /// Make the factory lazy, proxied as `proxy_class`.
    #[must_use]
    pub fn lazy_as(mut self, proxy_class: impl Into<String>) -> Self {
        self.lazy = true;
        self.proxy_class = Some(proxy_class.into());
        self
    }

    /// Toggle laziness. A factory has no class of its own, so turning it on
    /// needs a proxy class set through [`FactoryDefinition::lazy_as`] first.
    pub fn with_lazy(mut self, lazy: bool) -> Result<Self, ContainerError> {
        if lazy && self.proxy_class.is_none() {
            return Err(ContainerError::invalid(
                "A lazy factory definition needs a proxy class",
            ));
        }
        self.lazy = lazy;
        Ok(self)
    }

    #[must_use]
    pub fn tag(mut self, name: impl Into<String>, priority: i32) -> Self {
        self.tags.push(Tag::new(name, priority));
        self
    }

    pub fn callable(&self) -> &Callable {
        &self.callable
    }

    pub fn is_shared(&self) -> bool {
        self.shared
    }

    pub fn is_lazy(&self) -> bool {
        self.lazy
    }

    pub fn proxy_class(&self) -> Option<&str> {
        self.proxy_class.as_deref()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }
}
