use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use di_ir::{
    ensure_sufficient_stack, Definition, DefinitionValue, Definitions, ResolvedArgument,
    TypeIntrospector, ValueDefinition,
};
use di_runtime::{upgrade, ContainerError, Value, CONTAINER_ID};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::binding::bind_interfaces;
use crate::ContainerOptions;

/// Interpreted container: resolves definitions and builds services on
/// demand.
///
/// Containers are created behind an `Rc` so lazy proxies and the container's
/// own self-definition can hand out handles to it.
pub struct Container {
    pub(crate) this: Weak<Container>,
    pub(crate) definitions: RefCell<IndexMap<String, Rc<Definition>>>,
    /// Shared instances already built.
    instances: RefCell<FxHashMap<String, Value>>,
    /// Ids whose resolution completed.
    pub(crate) resolved: RefCell<FxHashSet<String>>,
    /// Ids currently being resolved, outermost first.
    pub(crate) resolving: RefCell<Vec<String>>,
    pub(crate) introspector: Rc<dyn TypeIntrospector>,
    pub(crate) options: ContainerOptions,
}

impl Container {
    pub fn new(
        definitions: Definitions,
        introspector: Rc<dyn TypeIntrospector>,
        options: ContainerOptions,
    ) -> Rc<Self> {
        let mut definitions = definitions.into_inner();

        if options.auto_binding {
            bind_interfaces(&mut definitions);
        }

        if !definitions.contains_key(CONTAINER_ID) {
            definitions.insert(
                CONTAINER_ID.to_owned(),
                Rc::new(ValueDefinition::container_self().into()),
            );
        }

        Rc::new_cyclic(|this| Container {
            this: this.clone(),
            definitions: RefCell::new(definitions),
            instances: RefCell::new(FxHashMap::default()),
            resolved: RefCell::new(FxHashSet::default()),
            resolving: RefCell::new(Vec::new()),
            introspector,
            options,
        })
    }

    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    pub fn introspector(&self) -> &Rc<dyn TypeIntrospector> {
        &self.introspector
    }

    /// Resolve every definition, failing on the first error.
    #[tracing::instrument(level = "debug", skip_all, fields(count = self.definitions.borrow().len()))]
    pub fn validate(&self) -> Result<(), ContainerError> {
        let ids: Vec<String> = self.definitions.borrow().keys().cloned().collect();
        for id in &ids {
            self.resolve_definition(id)?;
        }
        Ok(())
    }

    /// User definitions in insertion order, auto-vivified ones included and
    /// the container's own entry left out.
    pub fn definitions(&self) -> Definitions {
        self.definitions
            .borrow()
            .iter()
            .filter(|(id, definition)| !is_self_entry(id, definition))
            .map(|(id, definition)| (id.clone(), Rc::clone(definition)))
            .collect::<IndexMap<_, _>>()
            .into()
    }

    pub fn definition(&self, id: &str) -> Result<Rc<Definition>, ContainerError> {
        self.definitions
            .borrow()
            .get(id)
            .cloned()
            .ok_or_else(|| ContainerError::not_found(id))
    }

    /// Whether `id` resolves.
    pub fn has(&self, id: &str) -> bool {
        self.instances.borrow().contains_key(id) || self.resolve_definition(id).is_ok()
    }

    /// The value of `id`. Shared definitions are built once.
    pub fn get(&self, id: &str) -> Result<Value, ContainerError> {
        if let Some(value) = self.instances.borrow().get(id) {
            return Ok(value.clone());
        }

        self.resolve_definition(id)?;
        let definition = self.definition(id)?;

        let value = match definition.lazy_proxy_class() {
            Some(class) => {
                let this = self.this.clone();
                let id = id.to_owned();
                self.options.proxy_manager.get_proxy(
                    class,
                    Box::new(move || upgrade(&this)?.instance(&id)),
                )?
            }
            None => self.build(&definition)?,
        };

        if definition.is_shared() && !is_self_entry(id, &definition) {
            self.instances
                .borrow_mut()
                .insert(id.to_owned(), value.clone());
        }

        Ok(value)
    }

    /// Build a fresh value of `id`, bypassing the shared cache and proxies.
    pub fn instance(&self, id: &str) -> Result<Value, ContainerError> {
        self.resolve_definition(id)?;
        let definition = self.definition(id)?;
        self.build(&definition)
    }

    fn build(&self, definition: &Definition) -> Result<Value, ContainerError> {
        match definition {
            Definition::Class(class) => {
                let info = class.class();
                let arguments = class.resolved_arguments().ok_or_else(|| {
                    ContainerError::construction(&info.name, "arguments were not resolved")
                })?;
                let construct = info.construct.ok_or_else(|| {
                    ContainerError::construction(&info.name, "no constructor is registered")
                })?;

                let values = arguments
                    .iter()
                    .map(|argument| self.argument_value(argument))
                    .collect::<Result<Vec<_>, _>>()?;
                construct(values)
            }
            Definition::Factory(factory) => factory.callable().call(self),
            Definition::Alias(alias) => self.get(alias.target()),
            Definition::Value(value) => match value.value() {
                DefinitionValue::Literal(literal) => Ok(literal.to_value()),
                DefinitionValue::ContainerSelf => self.container_value(),
                DefinitionValue::Object(object) => Ok(Value::Object(Rc::clone(object))),
            },
            Definition::Custom(custom) => custom.get(self),
        }
    }

    fn argument_value(&self, argument: &ResolvedArgument) -> Result<Value, ContainerError> {
        match argument {
            ResolvedArgument::Literal(literal) => Ok(literal.to_value()),
            ResolvedArgument::Reference(id) => ensure_sufficient_stack(|| self.get(id)),
            ResolvedArgument::List(items) => items
                .iter()
                .map(|item| self.argument_value(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
        }
    }

    fn container_value(&self) -> Result<Value, ContainerError> {
        let handle: Rc<dyn di_runtime::Container> = upgrade(&self.this)?;
        Ok(Value::Container(handle))
    }
}

/// The self entry is never cached: caching it would make the container own
/// a strong handle to itself.
fn is_self_entry(id: &str, definition: &Definition) -> bool {
    id == CONTAINER_ID
        && matches!(definition, Definition::Value(value) if value.is_container_self())
}

impl di_runtime::Container for Container {
    fn get(&self, id: &str) -> Result<Value, ContainerError> {
        Container::get(self, id)
    }

    fn has(&self, id: &str) -> bool {
        Container::has(self, id)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("definitions", &self.definitions.borrow().len())
            .field("instances", &self.instances.borrow().len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
