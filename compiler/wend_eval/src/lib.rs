//! Wend Eval - evaluation primitives for the Wend runtime.
//!
//! Everything here operates on [`wend_value::Value`]:
//!
//! - [`dispatch`]: selecting a match arm by constructor tag
//! - [`list`]: the list algebra, all of it derived from [`list::walk`]
//! - [`basics`]: `Bool` connectives and numeric parity
//! - [`format`]: the printable form of a value
//! - [`externs`]: foreign functions callable by name
//! - [`module`]: lazily bound top-level definitions
//!
//! # Debug Environment Variables
//!
//! - `RUST_LOG=wend_eval=debug`: log runtime failures where they are raised.
//! - `RUST_LOG=wend_eval=trace`: also trace every dispatch and fold.
//!
//! Call [`init_tracing`] once to install the subscriber.

pub mod basics;
pub mod dispatch;
pub mod externs;
pub mod format;
pub mod list;
pub mod module;

use std::sync::Once;

pub use dispatch::{dispatch, dispatch_exhaustive, Arm};
pub use externs::{ExternFn, ExternRegistry};
pub use module::{Module, ModuleBuilder};
pub use wend_value::{DataType, EvalError, EvalErrorKind, EvalResult, ListView, Value};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and nothing after the first call.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
