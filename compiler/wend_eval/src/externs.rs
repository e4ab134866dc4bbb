//! Foreign functions callable from the runtime by name.
//!
//! The registry maps names to plain function pointers taking positional
//! arguments. Two are built in:
//!
//! - `to_string(x)`: the printable form of `x` as `Text`
//! - `crash(msg)`: halts evaluation with a `Crash` error

use rustc_hash::FxHashMap;
use wend_value::{arity_mismatch, crash, render, undefined_extern, EvalResult, Value};

use crate::format::to_string;

/// A foreign function.
pub type ExternFn = fn(&[Value]) -> EvalResult;

/// Name → foreign function table.
#[derive(Clone, Default)]
pub struct ExternRegistry {
    functions: FxHashMap<String, ExternFn>,
}

impl ExternRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in functions.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("to_string", extern_to_string);
        registry.register("crash", extern_crash);
        registry
    }

    /// Bind `name` to `f`, returning the function it replaces.
    pub fn register(&mut self, name: impl Into<String>, f: ExternFn) -> Option<ExternFn> {
        self.functions.insert(name.into(), f)
    }

    pub fn get(&self, name: &str) -> Option<ExternFn> {
        self.functions.get(name).copied()
    }

    /// Call the function bound to `name`.
    #[tracing::instrument(level = "trace", skip(self, args), fields(args = args.len()))]
    pub fn call(&self, name: &str, args: &[Value]) -> EvalResult {
        let Some(f) = self.get(name) else {
            tracing::debug!(name, "call to unregistered foreign function");
            return Err(undefined_extern(name));
        };
        f(args)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn extern_to_string(args: &[Value]) -> EvalResult {
    match args {
        [x] => Ok(to_string(x)),
        _ => Err(arity_mismatch("to_string", 1, args.len())),
    }
}

fn extern_crash(args: &[Value]) -> EvalResult {
    let [msg] = args else {
        return Err(arity_mismatch("crash", 1, args.len()));
    };
    let message = match msg.as_text() {
        Ok(text) => text.to_string(),
        Err(_) => render(msg),
    };
    tracing::error!(%message, "crash");
    Err(crash(&message))
}
