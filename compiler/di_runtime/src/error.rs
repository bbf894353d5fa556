use thiserror::Error;

/// Errors raised while resolving or instantiating services.
///
/// None of these are retried anywhere: each one describes an input that has
/// to change (a missing definition, a cycle, an argument that cannot be
/// inferred).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// The identifier has no definition and could not be auto-vivified.
    #[error("The id \"{id}\" was not found")]
    NotFound { id: String },

    /// Malformed input detected at construction or configuration time.
    #[error("{0}")]
    InvalidArgument(String),

    /// A constructor parameter could not be inferred.
    #[error("Can't resolve parameter \"{parameter}\" of class \"{class}\"")]
    UnknownArgument { parameter: String, class: String },

    /// A cycle was found while resolving; `path` lists the resolving stack in
    /// traversal order and ends with the repeated id.
    #[error("Recursive dependency detected: {}", .path.join(" > "))]
    RecursiveDependency { path: Vec<String> },

    /// A value did not have the type its consumer asked for.
    #[error("Expected a value of type {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A constructor asked for more arguments than it was given.
    #[error("Missing argument #{index} for class \"{class}\"")]
    MissingArgument { class: String, index: usize },

    /// A generated container was asked to dispatch a slot it does not have.
    #[error("No compiled accessor for slot {0}")]
    UnknownSlot(usize),

    /// A lazy service outlived the container that should construct it.
    #[error("The container was dropped before a lazy service was initialised")]
    ContainerDropped,

    /// A constructor or factory reported a failure of its own.
    #[error("Failed to construct \"{class}\": {message}")]
    Construction { class: String, message: String },
}

impl ContainerError {
    pub fn not_found(id: impl Into<String>) -> Self {
        ContainerError::NotFound { id: id.into() }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ContainerError::InvalidArgument(message.into())
    }

    pub fn construction(class: impl Into<String>, message: impl Into<String>) -> Self {
        ContainerError::Construction {
            class: class.into(),
            message: message.into(),
        }
    }

    /// The cycle path of a [`ContainerError::RecursiveDependency`], joined
    /// as `A > B > A`.
    pub fn cycle_path(&self) -> Option<String> {
        match self {
            ContainerError::RecursiveDependency { path } => Some(path.join(" > ")),
            _ => None,
        }
    }
}
