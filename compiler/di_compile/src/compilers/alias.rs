use di_ir::Definition;

use crate::{CompileError, Compiler, DefinitionCompiler, Writer};

/// Emits the target's reference, so an alias of a shared definition yields
/// the same instance as the target.
#[derive(Clone, Copy, Debug, Default)]
pub struct AliasDefinitionCompiler;

impl DefinitionCompiler for AliasDefinitionCompiler {
    fn supports(&self, definition: &Definition) -> bool {
        matches!(definition, Definition::Alias(_))
    }

    fn compile(
        &self,
        definition: &Definition,
        compiler: &Compiler,
        writer: &mut dyn Writer,
    ) -> Result<(), CompileError> {
        let Definition::Alias(alias) = definition else {
            return Err(CompileError::Unsupported {
                kind: definition.kind().to_owned(),
            });
        };
        compiler.generate_reference(alias.target(), writer)
    }
}
