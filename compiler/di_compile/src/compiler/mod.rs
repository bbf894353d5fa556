//! Compiler orchestration.
//!
//! Compiling runs in three steps:
//!
//! 1. resolve every definition through a [`Container`]
//! 2. give each definition an accessor slot, in definition order
//! 3. write the module: accessors, slot table, dispatch, `Container` impl
//!
//! The generated module glob-imports its parent, so inline factory bodies
//! resolve relative names such as `helper(c)` in the module that includes
//! the generated code.

use std::cell::RefCell;
use std::rc::Rc;

use di_container::{Container, ContainerOptions};
use di_ir::{ensure_sufficient_stack, Definition, Definitions, TypeIntrospector};
use di_runtime::{ContainerError, CONTAINER_ID};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::compilers::{self, DefinitionCompiler, CONTAINER_HANDLE};
use crate::writer::{quote, StringWriter, Writer};
use crate::{CompileError, CompilerOptions};

/// Turns container definitions into Rust source.
///
/// A compiler can be reused: each compilation starts from a cleared writer
/// and fresh slot assignments.
pub struct Compiler {
    module_name: String,
    class_name: String,
    writer: RefCell<Box<dyn Writer>>,
    compilers: Vec<Box<dyn DefinitionCompiler>>,
    definitions: IndexMap<String, Rc<Definition>>,
    slots: FxHashMap<String, usize>,
}

impl Compiler {
    pub fn new(options: CompilerOptions) -> Result<Self, CompileError> {
        crate::init_tracing();
        options.validate()?;

        let CompilerOptions {
            module_name,
            class_name,
            writer,
            definition_compilers,
        } = options;

        let mut compilers = compilers::builtin();
        compilers.extend(definition_compilers);

        Ok(Compiler {
            module_name,
            class_name,
            writer: RefCell::new(writer.unwrap_or_else(|| Box::new(StringWriter::new()))),
            compilers,
            definitions: IndexMap::new(),
            slots: FxHashMap::default(),
        })
    }

    /// Resolve `definitions` and generate the container module.
    pub fn compile(
        &mut self,
        definitions: Definitions,
        introspector: Rc<dyn TypeIntrospector>,
        options: ContainerOptions,
    ) -> Result<String, CompileError> {
        let container = Container::new(definitions, introspector, options);
        self.compile_container(&container)
    }

    /// Generate the module for an existing container.
    #[tracing::instrument(level = "debug", skip_all, fields(module = %self.module_name))]
    pub fn compile_container(&mut self, container: &Container) -> Result<String, CompileError> {
        container.validate()?;

        self.definitions = container.definitions().into_inner();
        self.slots = self
            .definitions
            .keys()
            .enumerate()
            .map(|(slot, id)| (id.clone(), slot))
            .collect();
        tracing::debug!(slots = self.slots.len(), "assigned accessor slots");

        let mut writer = self.writer.borrow_mut();
        writer.clear();
        self.write_module(&mut **writer)?;
        let code = writer.code().to_owned();
        Ok(code)
    }

    /// Path of the generated container type, relative to where the module is
    /// included.
    pub fn compiled_container_path(&self) -> String {
        format!("{}::{}", self.module_name, self.class_name)
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Definition being compiled under `id`.
    pub fn definition(&self, id: &str) -> Result<&Rc<Definition>, CompileError> {
        self.definitions
            .get(id)
            .ok_or_else(|| ContainerError::not_found(id).into())
    }

    pub fn has_definition(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    pub fn slot_for_id(&self, id: &str) -> Option<usize> {
        self.slots.get(id).copied()
    }

    /// Write the expression producing a fresh value of `id`, wrapped in a
    /// proxy when the definition is lazy.
    ///
    /// Non-shared dependencies are inlined, so this recurses once per level
    /// of a non-shared chain.
    pub fn generate_getter(&self, id: &str, writer: &mut dyn Writer) -> Result<(), CompileError> {
        ensure_sufficient_stack(|| self.write_getter(id, writer))
    }

    fn write_getter(&self, id: &str, writer: &mut dyn Writer) -> Result<(), CompileError> {
        let definition = self.definition(id)?;

        let Some(class) = definition.lazy_proxy_class() else {
            return self.compile_definition(definition, writer);
        };

        writer.write_raw(&format!(
            "c.base.proxy_manager().get_proxy({}, {{",
            quote(class)
        ));
        writer.indent(1);
        writer.write_line("let c = Rc::downgrade(c);", 1);
        writer.write("Box::new(move || -> Result<Value, ContainerError> {");
        writer.indent(1);
        writer.write_line("let c = &::di_runtime::upgrade(&c)?;", 1);
        writer.write("Ok(");
        self.compile_definition(definition, writer)?;
        writer.write_raw(")");
        writer.outdent(1);
        writer.write("})");
        writer.outdent(1);
        writer.write("})?");
        Ok(())
    }

    /// Write the expression for a dependency on `id`.
    ///
    /// Shared definitions go through the instance cache and their accessor;
    /// other definitions are built in place.
    pub fn generate_reference(&self, id: &str, writer: &mut dyn Writer) -> Result<(), CompileError> {
        if id == CONTAINER_ID && !self.has_definition(id) {
            writer.write_raw(CONTAINER_HANDLE);
            return Ok(());
        }

        if !self.definition(id)?.is_shared() {
            return self.generate_getter(id, writer);
        }

        let slot = self
            .slot_for_id(id)
            .ok_or_else(|| ContainerError::not_found(id))?;
        writer.write_raw(&format!(
            "c.base.resolved({}).map_or_else(|| Self::get{slot}(c), Ok)?",
            quote(id)
        ));
        Ok(())
    }

    fn compile_definition(
        &self,
        definition: &Definition,
        writer: &mut dyn Writer,
    ) -> Result<(), CompileError> {
        let compiler = self
            .compilers
            .iter()
            .find(|compiler| compiler.supports(definition))
            .ok_or_else(|| CompileError::Unsupported {
                kind: definition.kind().to_owned(),
            })?;
        compiler.compile(definition, self, writer)
    }

    fn write_module(&self, w: &mut dyn Writer) -> Result<(), CompileError> {
        let class = &self.class_name;

        w.write_line("// @generated by di_compile. Do not edit.", 2);
        w.write_line(
            "#[allow(non_snake_case, unused_imports, unused_variables, clippy::all)]",
            1,
        );
        w.write(&format!("pub mod {} {{", self.module_name));
        w.indent(1);
        w.write_line("use super::*;", 1);
        w.write_line("use ::std::rc::Rc;", 1);
        w.write_line("use ::di_runtime::{ContainerError, Value};", 2);

        w.write(&format!("pub struct {class} {{"));
        w.indent(1);
        w.write(&format!("base: ::di_runtime::CompiledBase<{class}>,"));
        w.outdent(1);
        w.write_line("}", 2);

        w.write(&format!("impl {class} {{"));
        w.indent(1);
        w.write("pub fn new(options: ::di_runtime::CompiledOptions) -> Rc<Self> {");
        w.indent(1);
        w.write("Rc::new_cyclic(|this| Self {");
        w.indent(1);
        w.write("base: ::di_runtime::CompiledBase::new(this.clone(), options),");
        w.outdent(1);
        w.write("})");
        w.outdent(1);
        w.write("}");

        for (slot, (id, definition)) in self.definitions.iter().enumerate() {
            w.new_line(2);
            self.write_accessor(slot, id, definition, w)?;
        }

        w.outdent(1);
        w.write_line("}", 2);

        self.write_compiled_impl(w);
        self.write_container_impl(w);

        w.outdent(1);
        w.write_line("}", 1);
        Ok(())
    }

    fn write_accessor(
        &self,
        slot: usize,
        id: &str,
        definition: &Definition,
        w: &mut dyn Writer,
    ) -> Result<(), CompileError> {
        tracing::trace!(slot, id, kind = definition.kind(), "writing accessor");

        w.write(&format!(
            "pub fn get{slot}(c: &Rc<Self>) -> Result<Value, ContainerError> {{"
        ));
        w.indent(1);

        if definition.is_shared() {
            w.write(&format!("Ok(c.base.share({}, ", quote(id)));
            self.generate_getter(id, w)?;
            w.write_raw("))");
        } else {
            w.write(&format!(
                "(c.base.remember({}, |c: &Rc<Self>| -> Result<Value, ContainerError> {{",
                quote(id)
            ));
            w.indent(1);
            w.write("Ok(");
            self.generate_getter(id, w)?;
            w.write_raw(")");
            w.outdent(1);
            w.write("}))(c)");
        }

        w.outdent(1);
        w.write("}");
        Ok(())
    }

    fn write_compiled_impl(&self, w: &mut dyn Writer) {
        w.write(&format!(
            "impl ::di_runtime::Compiled for {} {{",
            self.class_name
        ));
        w.indent(1);

        w.write("const MAPPINGS: &'static [(&'static str, usize)] = &[");
        w.indent(0);
        for (slot, id) in self.definitions.keys().enumerate() {
            w.new_line(1);
            w.write("");
            w.write_raw(&format!("({}, {slot}),", quote(id)));
        }
        w.outdent(1);
        w.write_line("];", 2);

        w.write("fn base(&self) -> &::di_runtime::CompiledBase<Self> {");
        w.indent(1);
        w.write("&self.base");
        w.outdent(1);
        w.write_line("}", 2);

        w.write("fn dispatch(c: &Rc<Self>, slot: usize) -> Result<Value, ContainerError> {");
        w.indent(1);
        w.write("match slot {");
        w.indent(1);
        for slot in 0..self.definitions.len() {
            w.write_line(&format!("{slot} => Self::get{slot}(c),"), 1);
        }
        w.write("_ => Err(ContainerError::UnknownSlot(slot)),");
        w.outdent(1);
        w.write("}");
        w.outdent(1);
        w.write("}");
        w.outdent(1);
        w.write_line("}", 2);
    }

    fn write_container_impl(&self, w: &mut dyn Writer) {
        w.write(&format!(
            "impl ::di_runtime::Container for {} {{",
            self.class_name
        ));
        w.indent(1);
        w.write("fn get(&self, id: &str) -> Result<Value, ContainerError> {");
        w.indent(1);
        w.write("::di_runtime::compiled::get(self, id)");
        w.outdent(1);
        w.write_line("}", 2);
        w.write("fn has(&self, id: &str) -> bool {");
        w.indent(1);
        w.write("::di_runtime::compiled::has(self, id)");
        w.outdent(1);
        w.write("}");
        w.outdent(1);
        w.write("}");
    }
}

#[cfg(test)]
mod tests;
