//! Indentation-aware text output.
//!
//! Compilers never build strings themselves; they write through a [`Writer`]
//! so the output can be redirected. [`StringWriter`] is the default.

use std::fmt::Write as _;

use di_ir::Literal;

const INDENT: &str = "    ";

/// Sink for generated source.
///
/// Implementors provide raw output and an indentation counter; everything
/// else is derived.
pub trait Writer {
    /// Append `code` as-is.
    fn write_raw(&mut self, code: &str);

    /// Everything written since the last [`Writer::clear`].
    fn code(&self) -> &str;

    /// Drop the output and reset indentation.
    fn clear(&mut self);

    fn indentation(&self) -> usize;

    fn set_indentation(&mut self, level: usize);

    /// Append `code` after the current indentation.
    fn write(&mut self, code: &str) {
        let indentation = INDENT.repeat(self.indentation());
        self.write_raw(&indentation);
        self.write_raw(code);
    }

    fn write_line(&mut self, code: &str, new_lines: usize) {
        self.write(code);
        self.new_line(new_lines);
    }

    fn new_line(&mut self, count: usize) {
        self.write_raw(&"\n".repeat(count));
    }

    /// Append `literal` as a `Value` expression.
    fn export(&mut self, literal: &Literal) {
        self.write_raw(&export(literal));
    }

    /// Indent one level, then emit `new_lines` newlines.
    fn indent(&mut self, new_lines: usize) {
        self.set_indentation(self.indentation() + 1);
        self.new_line(new_lines);
    }

    /// Outdent one level, then emit `new_lines` newlines.
    fn outdent(&mut self, new_lines: usize) {
        debug_assert!(self.indentation() > 0, "outdent called with zero indentation");
        self.set_indentation(self.indentation().saturating_sub(1));
        self.new_line(new_lines);
    }
}

/// Writer collecting output in memory.
#[derive(Clone, Debug, Default)]
pub struct StringWriter {
    code: String,
    indentation: usize,
}

impl StringWriter {
    pub fn new() -> Self {
        StringWriter {
            code: String::with_capacity(4096),
            indentation: 0,
        }
    }
}

impl Writer for StringWriter {
    fn write_raw(&mut self, code: &str) {
        self.code.push_str(code);
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn clear(&mut self) {
        self.code.clear();
        self.indentation = 0;
    }

    fn indentation(&self) -> usize {
        self.indentation
    }

    fn set_indentation(&mut self, level: usize) {
        self.indentation = level;
    }
}

/// Rust string literal for `text`.
pub fn quote(text: &str) -> String {
    format!("{text:?}")
}

/// Rust expression building `literal` as a `Value`.
pub fn export(literal: &Literal) -> String {
    let mut out = String::new();
    export_into(&mut out, literal);
    out
}

fn export_into(out: &mut String, literal: &Literal) {
    match literal {
        Literal::Null => out.push_str("Value::Null"),
        Literal::Bool(value) => {
            let _ = write!(out, "Value::Bool({value})");
        }
        Literal::Int(i64::MIN) => out.push_str("Value::Int(i64::MIN)"),
        Literal::Int(value) => {
            let _ = write!(out, "Value::Int({value})");
        }
        Literal::Float(value) => {
            let _ = match value {
                v if v.is_nan() => write!(out, "Value::Float(f64::NAN)"),
                v if v.is_infinite() && v.is_sign_positive() => {
                    write!(out, "Value::Float(f64::INFINITY)")
                }
                v if v.is_infinite() => write!(out, "Value::Float(f64::NEG_INFINITY)"),
                v => write!(out, "Value::Float({v:?})"),
            };
        }
        Literal::Str(text) => {
            let _ = write!(out, "Value::from({})", quote(text));
        }
        Literal::List(items) => {
            out.push_str("Value::List(vec![");
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                export_into(out, item);
            }
            out.push_str("])");
        }
    }
}
