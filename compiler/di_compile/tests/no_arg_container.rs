//! Smallest generated container: one shared class without arguments.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::cell::Cell;
use std::rc::Rc;

use di_compile::{Compiler, CompilerOptions};
use di_container::ContainerOptions;
use di_ir::{ClassDefinition, ClassInfo, ClassRegistry, Definitions};
use di_runtime::{Arguments, Compiled, CompiledOptions, Container, ContainerError, Injectable};
use pretty_assertions::assert_eq;

include!("fixtures/no_arg_container.rs");

thread_local! {
    static BUILT: Cell<usize> = const { Cell::new(0) };
}

pub struct NoArgClass;

impl Injectable for NoArgClass {
    fn construct(_args: Arguments) -> Result<Self, ContainerError> {
        BUILT.with(|built| built.set(built.get() + 1));
        Ok(NoArgClass)
    }
}

#[test]
fn generated_source() {
    let registry =
        Rc::new(ClassRegistry::new().with(ClassInfo::of::<NoArgClass>("crate::NoArgClass")));
    let definitions = Definitions::new().with(
        "id",
        ClassDefinition::from_introspector("crate::NoArgClass", &*registry).unwrap(),
    );

    let code = Compiler::new(CompilerOptions::default())
        .unwrap()
        .compile(definitions, registry, ContainerOptions::default())
        .unwrap();
    assert_eq!(code, include_str!("fixtures/no_arg_container.rs"));
}

#[test]
fn mapping_table() {
    assert_eq!(
        <__Cache__::CompiledContainer as Compiled>::MAPPINGS,
        &[("id", 0)]
    );
}

#[test]
fn get_returns_the_cached_instance() {
    let container = __Cache__::CompiledContainer::new(CompiledOptions::default());
    let before = BUILT.with(Cell::get);

    let first = container.get("id").unwrap();
    let second = container.get("id").unwrap();

    assert_eq!(first, second);
    assert!(first.downcast::<NoArgClass>().is_ok());
    assert_eq!(BUILT.with(Cell::get), before + 1);
    assert!(container.has("id"));
}

#[test]
fn separate_containers_do_not_share_instances() {
    let one = __Cache__::CompiledContainer::new(CompiledOptions::default());
    let two = __Cache__::CompiledContainer::new(CompiledOptions::default());

    assert_ne!(one.get("id").unwrap(), two.get("id").unwrap());
}
