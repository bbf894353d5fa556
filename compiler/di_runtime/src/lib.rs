//! Runtime contract for dependency-injection containers.
//!
//! Both the interpreted container (`di_container`) and the containers emitted
//! by `di_compile` are built on the types in this crate. Generated code only
//! ever names items from here, so this crate stays small and has no knowledge
//! of definitions or resolution.
//!
//! # Overview
//!
//! - [`Value`]: dynamically typed service value (literals, objects, the container)
//! - [`Container`]: the `get`/`has` lookup contract
//! - [`Injectable`]: construction protocol implemented by service types
//! - [`ProxyManager`]: deferred construction for lazy services
//! - [`Compiled`] / [`CompiledBase`]: base of every generated container
//!
//! Everything here is single-threaded (`Rc`, `RefCell`). Callers must not
//! share a container across threads.

pub mod compiled;
mod container;
mod error;
mod proxy;
mod value;

pub use compiled::{upgrade, Compiled, CompiledBase, CompiledOptions, Thunk};
pub use container::{construct, ConstructFn, Container, Injectable};
pub use error::ContainerError;
pub use proxy::{LazyProxy, LazyProxyManager, ProxyFactory, ProxyManager};
pub use value::{Arguments, Value};

/// Identifier under which every container exposes itself.
pub const CONTAINER_ID: &str = "di_runtime::Container";
