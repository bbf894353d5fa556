use di_runtime::ContainerError;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CompileError {
    /// No registered definition compiler accepts the definition.
    #[error("No compiler found for definition of type {kind}")]
    Unsupported { kind: String },

    /// The definition cannot be expressed as source code.
    #[error("{0}")]
    Compilation(String),

    /// A compiler option is malformed.
    #[error("{0}")]
    WrongOption(String),

    /// Resolving the definitions failed.
    #[error(transparent)]
    Container(#[from] ContainerError),
}

impl CompileError {
    pub fn compilation(message: impl Into<String>) -> Self {
        CompileError::Compilation(message.into())
    }
}
