use std::cell::OnceCell;
use std::rc::Rc;

use di_runtime::ContainerError;

use crate::{Argument, ArgumentKey, ClassInfo, ResolvedArgument, Tag, TypeIntrospector};

/// Constructs a class, inferring constructor arguments that are not given.
///
/// The resolved argument list is computed once by the resolver and kept
/// here; later resolutions and the compiler read it back.
#[derive(Debug)]
pub struct ClassDefinition {
    class: Rc<ClassInfo>,
    shared: bool,
    lazy: bool,
    arguments: Vec<(ArgumentKey, Argument)>,
    tags: Vec<Tag>,
    resolved: OnceCell<Vec<ResolvedArgument>>,
}

impl ClassDefinition {
    /// Shared, eager definition of `class`.
    pub fn new(class: Rc<ClassInfo>) -> Result<Self, ContainerError> {
        if !class.is_instantiable() {
            return Err(ContainerError::invalid(format!(
                "The class \"{}\" must be instantiable",
                class.name
            )));
        }

        Ok(ClassDefinition {
            class,
            shared: true,
            lazy: false,
            arguments: Vec::new(),
            tags: Vec::new(),
            resolved: OnceCell::new(),
        })
    }

    /// Look `name` up in `introspector` and define it.
    pub fn from_introspector(
        name: &str,
        introspector: &dyn TypeIntrospector,
    ) -> Result<Self, ContainerError> {
        let class = introspector
            .class_info(name)
            .ok_or_else(|| ContainerError::invalid(format!("The class \"{name}\" does not exist")))?;
        Self::new(class)
    }

    #[must_use]
    pub fn shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    #[must_use]
    pub fn lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    /// Pin a constructor argument by parameter name or position.
    #[must_use]
    pub fn argument(mut self, key: impl Into<ArgumentKey>, argument: impl Into<Argument>) -> Self {
        let key = key.into();
        let argument = argument.into();
        match self.arguments.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = argument,
            None => self.arguments.push((key, argument)),
        }
        self
    }

    #[must_use]
    pub fn tag(mut self, name: impl Into<String>, priority: i32) -> Self {
        self.tags.push(Tag::new(name, priority));
        self
    }

    pub fn class(&self) -> &Rc<ClassInfo> {
        &self.class
    }

    pub fn class_name(&self) -> &str {
        &self.class.name
    }

    pub fn is_shared(&self) -> bool {
        self.shared
    }

    /// Final classes cannot be proxied, so laziness is dropped for them.
    pub fn is_lazy(&self) -> bool {
        self.lazy && !self.class.is_final
    }

    pub fn arguments(&self) -> &[(ArgumentKey, Argument)] {
        &self.arguments
    }

    pub fn explicit(&self, key: &ArgumentKey) -> Option<&Argument> {
        self.arguments
            .iter()
            .find_map(|(k, argument)| (k == key).then_some(argument))
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Store the resolved arguments. The first stored list wins.
    ///
    /// The plan is kept on the definition, so containers sharing this
    /// definition share the plan. Each container still resolves the ids the
    /// plan references before using it.
    pub fn memoize(&self, arguments: Vec<ResolvedArgument>) -> &[ResolvedArgument] {
        self.resolved.get_or_init(|| arguments)
    }

    /// Resolved arguments, once the resolver has run.
    pub fn resolved_arguments(&self) -> Option<&[ResolvedArgument]> {
        self.resolved.get().map(Vec::as_slice)
    }
}
