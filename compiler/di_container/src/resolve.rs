//! Definition resolution.
//!
//! Resolving a definition checks that everything it needs can be produced
//! and, for class definitions, fixes the constructor argument list. Results
//! are memoised per id, so resolving twice is a no-op.

use std::rc::Rc;

use di_ir::{
    ensure_sufficient_stack, Argument, ArgumentKey, ClassDefinition, Definition, Parameter,
    Resolve, ResolvedArgument,
};
use di_runtime::ContainerError;

use crate::Container;

impl Container {
    /// Resolve `id` and everything it depends on.
    ///
    /// Unknown ids become shared class definitions when the container is not
    /// locked and the introspector knows an instantiable class by that name.
    /// A definition created this way is dropped again if it fails to
    /// resolve.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn resolve_definition(&self, id: &str) -> Result<(), ContainerError> {
        if self.resolved.borrow().contains(id) {
            return Ok(());
        }

        {
            let resolving = self.resolving.borrow();
            if resolving.iter().any(|entry| entry == id) {
                let mut path = resolving.clone();
                path.push(id.to_owned());
                return Err(ContainerError::RecursiveDependency { path });
            }
        }

        let (definition, vivified) = self.definition_or_vivify(id)?;

        self.resolving.borrow_mut().push(id.to_owned());
        let result = ensure_sufficient_stack(|| self.resolve_kind(&definition));
        self.resolving.borrow_mut().pop();

        match result {
            Ok(()) => {
                self.resolved.borrow_mut().insert(id.to_owned());
                Ok(())
            }
            Err(err) => {
                if vivified {
                    self.definitions.borrow_mut().shift_remove(id);
                }
                Err(err)
            }
        }
    }

    fn definition_or_vivify(&self, id: &str) -> Result<(Rc<Definition>, bool), ContainerError> {
        if let Some(definition) = self.definitions.borrow().get(id) {
            return Ok((Rc::clone(definition), false));
        }

        if self.options.locked {
            return Err(ContainerError::not_found(id));
        }

        let class = self
            .introspector
            .class_info(id)
            .ok_or_else(|| ContainerError::not_found(id))?;
        let definition = Rc::new(Definition::Class(ClassDefinition::new(class)?));

        tracing::debug!(id, "auto-vivified class definition");
        self.definitions
            .borrow_mut()
            .insert(id.to_owned(), Rc::clone(&definition));
        Ok((definition, true))
    }

    fn resolve_kind(&self, definition: &Definition) -> Result<(), ContainerError> {
        match definition {
            Definition::Class(class) => self.resolve_class(class),
            Definition::Alias(alias) => self.resolve_definition(alias.target()),
            Definition::Factory(_) | Definition::Value(_) => Ok(()),
            Definition::Custom(custom) => custom.resolve(self),
        }
    }

    fn resolve_class(&self, class: &ClassDefinition) -> Result<(), ContainerError> {
        // Plans are memoised on the definition, which other containers may
        // share. Their references still have to resolve here.
        if let Some(arguments) = class.resolved_arguments() {
            return arguments
                .iter()
                .try_for_each(|argument| self.resolve_references(argument));
        }

        let info = class.class();
        for (key, _) in class.arguments() {
            let known = match key {
                ArgumentKey::Name(name) => info.parameter_index(name).is_some(),
                ArgumentKey::Index(index) => *index < info.parameters.len(),
            };

            if !known {
                let key = match key {
                    ArgumentKey::Name(name) => format!("\"{name}\""),
                    ArgumentKey::Index(index) => format!("#{index}"),
                };
                return Err(ContainerError::invalid(format!(
                    "The class \"{}\" has no constructor parameter {key}",
                    info.name
                )));
            }
        }

        let arguments = info
            .parameters
            .iter()
            .enumerate()
            .map(|(index, parameter)| self.resolve_parameter(class, index, parameter))
            .collect::<Result<Vec<_>, _>>()?;

        class.memoize(arguments);
        Ok(())
    }

    /// Explicit argument by name, then by position, then a global argument,
    /// then the first class hint that resolves, then the default.
    fn resolve_parameter(
        &self,
        class: &ClassDefinition,
        index: usize,
        parameter: &Parameter,
    ) -> Result<ResolvedArgument, ContainerError> {
        let explicit = class
            .explicit(&ArgumentKey::Name(parameter.name.clone()))
            .or_else(|| class.explicit(&ArgumentKey::Index(index)))
            .or_else(|| self.options.global_argument(&parameter.name));

        if let Some(argument) = explicit {
            return self.resolve_argument(argument);
        }

        let mut last_error = None;
        for hint in parameter.class_hints() {
            match self.resolve_definition(hint) {
                Ok(()) => return Ok(ResolvedArgument::Reference(hint.to_owned())),
                Err(err @ ContainerError::RecursiveDependency { .. }) => return Err(err),
                Err(err) => {
                    tracing::trace!(parameter = %parameter.name, hint, %err, "type hint rejected");
                    last_error = Some(err);
                }
            }
        }

        if let Some(default) = &parameter.default {
            return Ok(ResolvedArgument::Literal(default.clone()));
        }

        Err(last_error.unwrap_or_else(|| ContainerError::UnknownArgument {
            parameter: parameter.name.clone(),
            class: class.class_name().to_owned(),
        }))
    }

    fn resolve_references(&self, argument: &ResolvedArgument) -> Result<(), ContainerError> {
        match argument {
            ResolvedArgument::Literal(_) => Ok(()),
            ResolvedArgument::Reference(id) => self.resolve_definition(id),
            ResolvedArgument::List(items) => items
                .iter()
                .try_for_each(|item| self.resolve_references(item)),
        }
    }

    pub(crate) fn resolve_argument(
        &self,
        argument: &Argument,
    ) -> Result<ResolvedArgument, ContainerError> {
        match argument {
            Argument::Literal(literal) => Ok(ResolvedArgument::Literal(literal.clone())),
            Argument::Reference(id) => {
                self.resolve_definition(id)?;
                Ok(ResolvedArgument::Reference(id.clone()))
            }
            Argument::List(items) => items
                .iter()
                .map(|item| self.resolve_argument(item))
                .collect::<Result<Vec<_>, _>>()
                .map(ResolvedArgument::List),
            Argument::Tagged(tag) => self
                .tagged(tag)
                .into_iter()
                .map(|id| {
                    self.resolve_definition(&id)?;
                    Ok(ResolvedArgument::Reference(id))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(ResolvedArgument::List),
        }
    }

    /// Ids carrying `tag`, highest priority first, ties in definition order.
    pub fn tagged(&self, tag: &str) -> Vec<String> {
        let mut tagged: Vec<(i32, String)> = self
            .definitions
            .borrow()
            .iter()
            .filter_map(|(id, definition)| {
                self.tag_priority(definition, tag)
                    .map(|priority| (priority, id.clone()))
            })
            .collect();

        tagged.sort_by(|a, b| b.0.cmp(&a.0));
        tagged.into_iter().map(|(_, id)| id).collect()
    }

    fn tag_priority(&self, definition: &Definition, tag: &str) -> Option<i32> {
        if let Some(priority) = definition.tag_priority(tag) {
            return Some(priority);
        }

        let class = definition.as_class()?.class();
        self.options
            .auto_tags
            .iter()
            .find(|(target, auto)| {
                auto.name == tag && (class.name == *target || class.implements.contains(target))
            })
            .map(|(_, auto)| auto.priority)
    }
}

impl Resolve for Container {
    fn resolve_definition(&self, id: &str) -> Result<(), ContainerError> {
        Container::resolve_definition(self, id)
    }
}
