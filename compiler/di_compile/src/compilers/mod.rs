//! Per-kind definition compilers.
//!
//! A compiler writes the Rust expression that produces one definition's
//! value inside a generated accessor. The expression runs with `c: &Rc<Self>`
//! in scope and may use `?` to propagate `ContainerError`.

mod alias;
mod class;
mod factory;
mod value;

pub use alias::AliasDefinitionCompiler;
pub use class::ClassDefinitionCompiler;
pub use factory::FactoryDefinitionCompiler;
pub use value::ValueDefinitionCompiler;

use di_ir::Definition;

use crate::{CompileError, Compiler, Writer};

/// Expression used wherever generated code needs the container itself.
pub const CONTAINER_HANDLE: &str = "Value::Container(Rc::clone(c) as Rc<dyn ::di_runtime::Container>)";

/// Emits the construction expression for one kind of definition.
pub trait DefinitionCompiler {
    fn supports(&self, definition: &Definition) -> bool;

    fn compile(
        &self,
        definition: &Definition,
        compiler: &Compiler,
        writer: &mut dyn Writer,
    ) -> Result<(), CompileError>;
}

/// Compilers for the four built-in definition kinds.
pub fn builtin() -> Vec<Box<dyn DefinitionCompiler>> {
    vec![
        Box::new(ClassDefinitionCompiler),
        Box::new(AliasDefinitionCompiler),
        Box::new(ValueDefinitionCompiler),
        Box::new(FactoryDefinitionCompiler),
    ]
}
