use di_ir::{Definition, ResolvedArgument};

use crate::{CompileError, Compiler, DefinitionCompiler, Writer};

/// Emits `::di_runtime::construct::<Path>(vec![..])?` from the resolved
/// argument list.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassDefinitionCompiler;

impl ClassDefinitionCompiler {
    fn compile_argument(
        compiler: &Compiler,
        writer: &mut dyn Writer,
        argument: &ResolvedArgument,
    ) -> Result<(), CompileError> {
        match argument {
            ResolvedArgument::Literal(literal) => writer.export(literal),
            ResolvedArgument::Reference(id) => compiler.generate_reference(id, writer)?,
            ResolvedArgument::List(items) if items.is_empty() => {
                writer.write_raw("Value::List(vec![])");
            }
            ResolvedArgument::List(items) => {
                writer.write_raw("Value::List(vec![");
                writer.indent(1);
                writer.write("");

                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        writer.write_raw(",");
                        writer.new_line(1);
                        writer.write("");
                    }
                    Self::compile_argument(compiler, writer, item)?;
                }

                writer.outdent(1);
                writer.write("])");
            }
        }
        Ok(())
    }
}

impl DefinitionCompiler for ClassDefinitionCompiler {
    fn supports(&self, definition: &Definition) -> bool {
        matches!(definition, Definition::Class(_))
    }

    fn compile(
        &self,
        definition: &Definition,
        compiler: &Compiler,
        writer: &mut dyn Writer,
    ) -> Result<(), CompileError> {
        let Definition::Class(class) = definition else {
            return Err(CompileError::Unsupported {
                kind: definition.kind().to_owned(),
            });
        };

        let arguments = class.resolved_arguments().ok_or_else(|| {
            CompileError::compilation(format!(
                "The class definition of \"{}\" is not resolved",
                class.class_name()
            ))
        })?;

        writer.write_raw(&format!(
            "::di_runtime::construct::<{}>(vec![",
            class.class_name()
        ));
        for (index, argument) in arguments.iter().enumerate() {
            if index > 0 {
                writer.write_raw(", ");
            }
            Self::compile_argument(compiler, writer, argument)?;
        }
        writer.write_raw("])?");
        Ok(())
    }
}
