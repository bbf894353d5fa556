use std::fmt;

use crate::{CompileError, DefinitionCompiler, Writer};

/// Settings of a [`crate::Compiler`].
pub struct CompilerOptions {
    /// Name of the generated module.
    pub module_name: String,
    /// Name of the generated container type.
    pub class_name: String,
    /// Output sink; a [`crate::StringWriter`] when unset.
    pub writer: Option<Box<dyn Writer>>,
    /// Extra compilers, consulted after the built-in ones.
    pub definition_compilers: Vec<Box<dyn DefinitionCompiler>>,
}

impl CompilerOptions {
    #[must_use]
    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = name.into();
        self
    }

    #[must_use]
    pub fn with_class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = name.into();
        self
    }

    #[must_use]
    pub fn with_writer(mut self, writer: Box<dyn Writer>) -> Self {
        self.writer = Some(writer);
        self
    }

    #[must_use]
    pub fn with_definition_compiler(mut self, compiler: Box<dyn DefinitionCompiler>) -> Self {
        self.definition_compilers.push(compiler);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), CompileError> {
        for (option, value) in [
            ("module_name", &self.module_name),
            ("class_name", &self.class_name),
        ] {
            if !is_identifier(value) {
                return Err(CompileError::WrongOption(format!(
                    "The {option} option must be a Rust identifier, got {value:?}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions {
            module_name: "__Cache__".to_owned(),
            class_name: "CompiledContainer".to_owned(),
            writer: None,
            definition_compilers: Vec::new(),
        }
    }
}

impl fmt::Debug for CompilerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompilerOptions")
            .field("module_name", &self.module_name)
            .field("class_name", &self.class_name)
            .field("writer", &self.writer.is_some())
            .field("definition_compilers", &self.definition_compilers.len())
            .finish()
    }
}

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while",
];

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name != "_"
        && !KEYWORDS.contains(&name)
}
