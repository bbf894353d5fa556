#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use di_container::ContainerOptions;
use di_ir::{
    Callable, ClassDefinition, ClassInfo, ClassRegistry, CustomDefinition, Definition,
    Definitions, FactoryDefinition, Parameter, ValueDefinition,
};
use di_runtime::{Arguments, ContainerError, Injectable, Value};
use pretty_assertions::assert_eq;

use super::Compiler;
use crate::{CompileError, CompilerOptions, DefinitionCompiler, StringWriter, Writer};

struct Service;

impl Injectable for Service {
    fn construct(_args: Arguments) -> Result<Self, ContainerError> {
        Ok(Service)
    }
}

#[derive(Debug)]
struct EnvDefinition {
    variable: &'static str,
}

impl CustomDefinition for EnvDefinition {
    fn kind(&self) -> &str {
        "EnvDefinition"
    }

    fn get(&self, _container: &dyn di_runtime::Container) -> Result<Value, ContainerError> {
        Ok(Value::from(self.variable))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct EnvCompiler;

impl DefinitionCompiler for EnvCompiler {
    fn supports(&self, definition: &Definition) -> bool {
        definition.kind() == "EnvDefinition"
    }

    fn compile(
        &self,
        definition: &Definition,
        _compiler: &Compiler,
        writer: &mut dyn Writer,
    ) -> Result<(), CompileError> {
        let Definition::Custom(custom) = definition else {
            return Err(CompileError::compilation("not an env definition"));
        };
        let env = custom
            .as_any()
            .downcast_ref::<EnvDefinition>()
            .ok_or_else(|| CompileError::compilation("not an env definition"))?;
        writer.write_raw(&format!(
            "Value::from(::std::env::var({:?}).unwrap_or_default())",
            env.variable
        ));
        Ok(())
    }
}

/// Writer mirroring its output into a shared buffer.
#[derive(Default)]
struct SharedWriter {
    inner: StringWriter,
    sink: Rc<RefCell<String>>,
}

impl Writer for SharedWriter {
    fn write_raw(&mut self, code: &str) {
        self.sink.borrow_mut().push_str(code);
        self.inner.write_raw(code);
    }

    fn code(&self) -> &str {
        self.inner.code()
    }

    fn clear(&mut self) {
        self.sink.borrow_mut().clear();
        self.inner.clear();
    }

    fn indentation(&self) -> usize {
        self.inner.indentation()
    }

    fn set_indentation(&mut self, level: usize) {
        self.inner.set_indentation(level);
    }
}

fn registry() -> Rc<ClassRegistry> {
    Rc::new(ClassRegistry::new().with(ClassInfo::of::<Service>("crate::Service")))
}

fn compile_with(
    options: CompilerOptions,
    definitions: Definitions,
) -> Result<String, CompileError> {
    Compiler::new(options)?.compile(definitions, registry(), ContainerOptions::default())
}

fn service_definitions() -> Definitions {
    Definitions::new()
        .with("first", ValueDefinition::new(1_i64))
        .with(
            "service",
            di_ir::ClassDefinition::from_introspector("crate::Service", &*registry()).unwrap(),
        )
        .with("last", ValueDefinition::new("x"))
}

#[test]
fn rejects_invalid_names() {
    let err = Compiler::new(CompilerOptions::default().with_module_name(""))
        .err()
        .unwrap();
    assert_eq!(
        err,
        CompileError::WrongOption(
            "The module_name option must be a Rust identifier, got \"\"".to_owned()
        )
    );

    let err = Compiler::new(CompilerOptions::default().with_class_name("My Container"))
        .err()
        .unwrap();
    assert!(matches!(err, CompileError::WrongOption(_)));
}

#[test]
fn reports_definitions_without_compiler() {
    let definitions = Definitions::new().with(
        "home",
        Definition::Custom(Box::new(EnvDefinition { variable: "HOME" })),
    );

    let err = compile_with(CompilerOptions::default(), definitions).unwrap_err();
    assert_eq!(
        err,
        CompileError::Unsupported {
            kind: "EnvDefinition".to_owned()
        }
    );
    assert_eq!(
        err.to_string(),
        "No compiler found for definition of type EnvDefinition"
    );
}

#[test]
fn registered_compilers_handle_custom_definitions() {
    let definitions = Definitions::new().with(
        "home",
        Definition::Custom(Box::new(EnvDefinition { variable: "HOME" })),
    );

    let code = compile_with(
        CompilerOptions::default().with_definition_compiler(Box::new(EnvCompiler)),
        definitions,
    )
    .unwrap();
    assert!(code.contains(
        "Ok(c.base.share(\"home\", Value::from(::std::env::var(\"HOME\").unwrap_or_default())))"
    ));
}

#[test]
fn slots_follow_definition_order() {
    let mut compiler = Compiler::new(CompilerOptions::default()).unwrap();
    compiler
        .compile(service_definitions(), registry(), ContainerOptions::default())
        .unwrap();

    assert_eq!(compiler.slot_for_id("first"), Some(0));
    assert_eq!(compiler.slot_for_id("service"), Some(1));
    assert_eq!(compiler.slot_for_id("last"), Some(2));
    assert_eq!(compiler.slot_for_id("missing"), None);
    assert!(!compiler.has_definition(di_runtime::CONTAINER_ID));
}

#[test]
fn container_path_uses_configured_names() {
    let compiler = Compiler::new(
        CompilerOptions::default()
            .with_module_name("services")
            .with_class_name("AppContainer"),
    )
    .unwrap();

    assert_eq!(compiler.compiled_container_path(), "services::AppContainer");
    assert_eq!(compiler.module_name(), "services");
    assert_eq!(compiler.class_name(), "AppContainer");
}

#[test]
fn default_names() {
    let compiler = Compiler::new(CompilerOptions::default()).unwrap();
    assert_eq!(
        compiler.compiled_container_path(),
        "__Cache__::CompiledContainer"
    );
}

#[test]
fn compiling_twice_gives_the_same_code() {
    let mut compiler = Compiler::new(CompilerOptions::default()).unwrap();
    let first = compiler
        .compile(service_definitions(), registry(), ContainerOptions::default())
        .unwrap();
    let second = compiler
        .compile(service_definitions(), registry(), ContainerOptions::default())
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn recompiling_drops_previous_slots() {
    let mut compiler = Compiler::new(CompilerOptions::default()).unwrap();
    compiler
        .compile(service_definitions(), registry(), ContainerOptions::default())
        .unwrap();
    compiler
        .compile(
            Definitions::new().with("only", ValueDefinition::new(true)),
            registry(),
            ContainerOptions::default(),
        )
        .unwrap();

    assert_eq!(compiler.slot_for_id("only"), Some(0));
    assert_eq!(compiler.slot_for_id("service"), None);
}

#[test]
fn custom_writer_receives_output() {
    let writer = SharedWriter::default();
    let sink = Rc::clone(&writer.sink);
    let code = compile_with(
        CompilerOptions::default().with_writer(Box::new(writer)),
        service_definitions(),
    )
    .unwrap();

    assert_eq!(*sink.borrow(), code);
    assert!(code.starts_with("// @generated by di_compile. Do not edit.\n"));
    assert!(code.contains("pub fn get1(c: &Rc<Self>)"));
}

#[test]
fn capturing_closures_cannot_be_compiled() {
    let prefix = String::from("hello ");
    let definitions = Definitions::new().with(
        "greeting",
        FactoryDefinition::new(Callable::closure(move |_| {
            Ok(Value::from(format!("{prefix}world")))
        })),
    );

    let err = compile_with(CompilerOptions::default(), definitions).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot compile factory closure which captures its environment"
    );
}

#[test]
fn inline_factories_using_self_cannot_be_compiled() {
    fn make(_c: &dyn di_runtime::Container) -> Result<Value, ContainerError> {
        Ok(Value::Null)
    }

    let definitions = Definitions::new().with(
        "scoped",
        FactoryDefinition::new(Callable::inline("c", "self.build(c)", make)),
    );

    let err = compile_with(CompilerOptions::default(), definitions).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot compile factory closure which uses \"self\""
    );
}

#[test]
fn quote_characters_do_not_hide_self() {
    fn make(_c: &dyn di_runtime::Container) -> Result<Value, ContainerError> {
        Ok(Value::Null)
    }

    let definitions = Definitions::new().with(
        "scoped",
        FactoryDefinition::new(Callable::inline(
            "c",
            "{ let _q = '\"'; self::helper(c) }",
            make,
        )),
    );

    let err = compile_with(CompilerOptions::default(), definitions).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot compile factory closure which uses \"self\""
    );
}

#[test]
fn deep_non_shared_chains_compile() {
    const DEPTH: usize = 1_000;

    let mut registry = ClassRegistry::new().with(ClassInfo::new("crate::Link0"));
    for depth in 1..DEPTH {
        registry.register(
            ClassInfo::new(format!("crate::Link{depth}"))
                .parameter(Parameter::new("next").class(format!("crate::Link{}", depth - 1))),
        );
    }

    let definitions: Definitions = (0..DEPTH)
        .map(|depth| {
            let name = format!("crate::Link{depth}");
            let definition = ClassDefinition::from_introspector(&name, &registry)
                .unwrap()
                .shared(false);
            (name, definition)
        })
        .collect();

    let code = Compiler::new(CompilerOptions::default())
        .unwrap()
        .compile(definitions, Rc::new(registry), ContainerOptions::default())
        .unwrap();

    assert_eq!(code.matches("construct::<crate::Link0>(vec![])").count(), DEPTH);
    assert!(code.contains(
        "::di_runtime::construct::<crate::Link1>(vec![::di_runtime::construct::<crate::Link0>(vec![])?])?"
    ));
    assert!(code.contains(&format!("(\"crate::Link{}\", {}),", DEPTH - 1, DEPTH - 1)));
}

#[test]
fn resolution_errors_abort_compilation() {
    let definitions = Definitions::new().with("broken", di_ir::AliasDefinition::new("nowhere"));

    let err = compile_with(CompilerOptions::default(), definitions).unwrap_err();
    assert_eq!(
        err,
        CompileError::Container(ContainerError::not_found("nowhere"))
    );
}

#[test]
fn runtime_objects_cannot_be_compiled() {
    let definitions = Definitions::new().with("object", ValueDefinition::object(Service));

    let err = compile_with(CompilerOptions::default(), definitions).unwrap_err();
    assert_eq!(
        err,
        CompileError::compilation("Cannot compile a value definition holding a runtime object")
    );
}

#[test]
fn interpreted_container_agrees_on_custom_values() {
    let container = di_container::Container::new(
        Definitions::new().with(
            "home",
            Definition::Custom(Box::new(EnvDefinition { variable: "HOME" })),
        ),
        registry(),
        ContainerOptions::default(),
    );

    assert_eq!(container.get("home").unwrap(), Value::from("HOME"));
}
