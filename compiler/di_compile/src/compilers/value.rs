use di_ir::{Definition, DefinitionValue};

use super::CONTAINER_HANDLE;
use crate::{CompileError, Compiler, DefinitionCompiler, Writer};

#[derive(Clone, Copy, Debug, Default)]
pub struct ValueDefinitionCompiler;

impl DefinitionCompiler for ValueDefinitionCompiler {
    fn supports(&self, definition: &Definition) -> bool {
        matches!(definition, Definition::Value(_))
    }

    fn compile(
        &self,
        definition: &Definition,
        _compiler: &Compiler,
        writer: &mut dyn Writer,
    ) -> Result<(), CompileError> {
        let Definition::Value(value) = definition else {
            return Err(CompileError::Unsupported {
                kind: definition.kind().to_owned(),
            });
        };

        match value.value() {
            DefinitionValue::Literal(literal) => writer.export(literal),
            DefinitionValue::ContainerSelf => writer.write_raw(CONTAINER_HANDLE),
            DefinitionValue::Object(_) => {
                return Err(CompileError::compilation(
                    "Cannot compile a value definition holding a runtime object",
                ))
            }
        }
        Ok(())
    }
}
