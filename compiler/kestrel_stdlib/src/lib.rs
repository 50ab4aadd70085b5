//! Kestrel Stdlib - the standard handler library and runtime setup.
//!
//! The evaluator core knows nothing about arithmetic, printing or how a root
//! scope gets populated. This crate supplies:
//!
//! - the primitive handlers (`add`, `show`, `store`, `define`, `if`, ...)
//!   and the named coercions and constants scripts refer to
//! - [`load`], which registers all of them read-only in a scope
//! - [`OutputSink`], the destination of `show`
//! - [`Runtime`] and its builder, the usual entry point for embedders
//! - [`init_tracing`], opt-in log output via `RUST_LOG`

mod loader;
mod output;
mod primitives;
mod runtime;

use std::sync::Once;

pub use loader::load;
pub use output::{buffer_output, silent_output, stdout_output, OutputSink, SharedOutput};
pub use runtime::{Runtime, RuntimeBuilder};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and nothing after the first call.
/// Evaluation logs command calls at `debug` and thunk forcing at `trace`, so
/// `RUST_LOG=kestrel_eval=debug` shows the call tree.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }
        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .with(EnvFilter::from_default_env())
            .try_init();
        // Someone else (a test harness, the embedder) already owns the global subscriber.
        if installed.is_err() {
            tracing::debug!("tracing subscriber already installed");
        }
    });
}
