//! Resolver and interpreted container.
//!
//! [`Container`] owns a set of definitions, resolves the construction graph
//! (parameter inference, tag expansion, cycle detection) and instantiates
//! services on demand. The compiler in `di_compile` drives the same resolver
//! and turns its results into source code.

mod binding;
mod container;
mod options;
mod resolve;

pub use container::Container;
pub use options::ContainerOptions;
