//! Definition model for the dependency-injection container.
//!
//! A container is a map from string identifiers to [`Definition`]s. This
//! crate holds the definitions themselves, the argument forms a class
//! definition can carry, and the class metadata ([`ClassInfo`]) that stands
//! in for runtime reflection. Resolution lives in `di_container`; code
//! generation in `di_compile`.

mod argument;
mod class;
pub mod definition;
mod definitions;
mod literal;
mod stack;

pub use argument::{Argument, ArgumentKey, ResolvedArgument, Tag};
pub use class::{ClassInfo, ClassKind, ClassRegistry, Parameter, TypeHint, TypeIntrospector};
pub use definition::{
    AliasDefinition, Callable, ClassDefinition, CustomDefinition, Definition, DefinitionValue,
    FactoryDefinition, FactoryFn, Resolve, ValueDefinition,
};
pub use definitions::Definitions;
pub use literal::Literal;
pub use stack::ensure_sufficient_stack;

#[doc(hidden)]
pub use di_runtime as __runtime;

/// Build an inline factory from a non-capturing closure.
///
/// The closure body is kept as source text so a compiled container can
/// re-emit it. Expanding to a nested `fn` item rejects captured variables at
/// compile time.
///
/// Relative names in the body resolve twice: here, and in the module that
/// includes the generated container, which glob-imports its parent. Keep
/// helpers the body calls visible from both places, or use absolute paths.
///
/// ```text
/// let callable = factory!(|c| Ok(Value::from(c.has("db"))));
/// ```
#[macro_export]
macro_rules! factory {
    (|$param:ident| $body:expr) => {{
        #[allow(unused_variables)]
        fn __factory(
            $param: &dyn $crate::__runtime::Container,
        ) -> ::std::result::Result<$crate::__runtime::Value, $crate::__runtime::ContainerError> {
            $body
        }
        $crate::Callable::inline(stringify!($param), stringify!($body), __factory)
    }};
}

/// Build a factory from a named function, re-emitted by path.
#[macro_export]
macro_rules! factory_fn {
    ($path:path) => {
        $crate::Callable::path(stringify!($path), $path)
    };
}
