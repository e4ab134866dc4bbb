//! Stack growth for structural recursion over runtime values.
//!
//! Most list operations in the runtime are plain loops, but a few consumers
//! still walk a value tree recursively: rendering a constructor renders its
//! arguments, and a list's tail is just another argument. A list of a
//! million elements is therefore a tree a million levels deep.
//!
//! [`ensure_sufficient_stack`] wraps each recursive step. On native targets
//! it grows the stack through `stacker` once the remaining space drops below
//! [`RED_ZONE`]; on WASM it calls the closure directly.
//!
//! ```text
//! fn render_into(value: &Value, out: &mut String) {
//!     ensure_sufficient_stack(|| match value {
//!         Value::Ctor(c) => c.args().iter().for_each(|a| render_into(a, out)),
//!         _ => out.push_str("leaf"),
//!     })
//! }
//! ```

/// Remaining stack below which a new segment is allocated (100 KiB).
pub const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment (1 MiB).
pub const STACK_SEGMENT: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than [`RED_ZONE`] bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}

/// WASM manages its own stack; run `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
