//! Ahead-of-time compilation of container definitions.
//!
//! [`Compiler`] resolves a set of definitions through the interpreted
//! container, then writes a Rust module whose container answers the same
//! `get` calls without metadata lookups or argument inference. Each
//! definition kind is emitted by a [`DefinitionCompiler`]; text goes through
//! a [`Writer`].
//!
//! The generated module depends on `di_runtime` only.

mod compiler;
pub mod compilers;
mod error;
mod options;
mod writer;

use std::sync::Once;

pub use compiler::Compiler;
pub use compilers::DefinitionCompiler;
pub use error::CompileError;
pub use options::CompilerOptions;
pub use writer::{export, quote, StringWriter, Writer};

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset or a subscriber was installed
/// already.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
