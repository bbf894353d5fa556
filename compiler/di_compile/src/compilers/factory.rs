use di_ir::{Callable, Definition};

use crate::{CompileError, Compiler, DefinitionCompiler, Writer};

const CONTAINER_ARGUMENT: &str = "(&**c as &dyn ::di_runtime::Container)?";

/// Emits a call of the factory function with the container.
///
/// Named functions are called by path. Inline closures are re-emitted from
/// their source text, which only works when the body does not depend on the
/// scope it was written in.
#[derive(Clone, Copy, Debug, Default)]
pub struct FactoryDefinitionCompiler;

impl DefinitionCompiler for FactoryDefinitionCompiler {
    fn supports(&self, definition: &Definition) -> bool {
        matches!(definition, Definition::Factory(_))
    }

    fn compile(
        &self,
        definition: &Definition,
        _compiler: &Compiler,
        writer: &mut dyn Writer,
    ) -> Result<(), CompileError> {
        let Definition::Factory(factory) = definition else {
            return Err(CompileError::Unsupported {
                kind: definition.kind().to_owned(),
            });
        };

        match factory.callable() {
            Callable::Path { path, .. } => {
                writer.write_raw(&format!("({path}){CONTAINER_ARGUMENT}"));
            }
            Callable::Inline { param, body, .. } => {
                if let Some(word) = scoped_keyword(body) {
                    return Err(CompileError::compilation(format!(
                        "Cannot compile factory closure which uses \"{word}\""
                    )));
                }
                writer.write_raw(&format!(
                    "(|{param}: &dyn ::di_runtime::Container| -> Result<Value, ContainerError> {{ {body} }}){CONTAINER_ARGUMENT}"
                ));
            }
            Callable::Closure(_) => {
                return Err(CompileError::compilation(
                    "Cannot compile factory closure which captures its environment",
                ));
            }
        }
        Ok(())
    }
}

const SCOPED_KEYWORDS: [&str; 3] = ["self", "Self", "super"];

/// First of `self`, `Self` or `super` used as an identifier in `body`.
///
/// String, raw string and character literals are skipped. A quote that
/// starts a lifetime or label is not a literal.
fn scoped_keyword(body: &str) -> Option<&'static str> {
    let chars: Vec<char> = body.chars().collect();
    let mut i = 0;

    while let Some(&c) = chars.get(i) {
        match c {
            '"' => i = skip_string(&chars, i + 1),
            '\'' => i = skip_char(&chars, i + 1),
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while chars
                    .get(i)
                    .is_some_and(|c| c.is_alphanumeric() || *c == '_')
                {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();

                if matches!(word.as_str(), "r" | "br" | "cr")
                    && matches!(chars.get(i), Some('"' | '#'))
                {
                    i = skip_raw_string(&chars, i);
                } else if let Some(keyword) = SCOPED_KEYWORDS.into_iter().find(|k| *k == word) {
                    return Some(keyword);
                }
            }
            _ => i += 1,
        }
    }
    None
}

/// Index past the closing quote of a string whose body starts at `i`.
fn skip_string(chars: &[char], mut i: usize) -> usize {
    while let Some(&c) = chars.get(i) {
        match c {
            '\\' => i += 2,
            '"' => return i + 1,
            _ => i += 1,
        }
    }
    chars.len()
}

/// Index past a character literal whose body starts at `i`. Lifetimes and
/// labels are left in place so their name is read as a word.
fn skip_char(chars: &[char], i: usize) -> usize {
    match chars.get(i) {
        Some('\\') => chars
            .get(i + 2..)
            .and_then(|rest| rest.iter().position(|c| *c == '\''))
            .map_or(chars.len(), |end| i + 2 + end + 1),
        Some(_) if chars.get(i + 1) == Some(&'\'') => i + 2,
        _ => i,
    }
}

/// Index past a raw string whose `#`s or opening quote start at `i`. A raw
/// identifier such as `r#type` has no quote after the `#` and is left for
/// the word reader.
fn skip_raw_string(chars: &[char], mut i: usize) -> usize {
    let hashes = chars[i..].iter().take_while(|c| **c == '#').count();
    i += hashes;
    if chars.get(i) != Some(&'"') {
        return i;
    }
    i += 1;

    while let Some(&c) = chars.get(i) {
        let closing = chars[i + 1..].iter().take(hashes).all(|c| *c == '#')
            && chars.len() - (i + 1) >= hashes;
        if c == '"' && closing {
            return i + 1 + hashes;
        }
        i += 1;
    }
    chars.len()
}
