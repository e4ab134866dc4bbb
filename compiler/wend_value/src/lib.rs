//! Wend Value - runtime value model for the Wend runtime.
//!
//! This crate provides:
//! - `Value`: numbers, strings, and constructor applications (`Value::make`)
//! - `DataType`: declared constructor tables with dense, ordered tags
//! - `EvalError` / `EvalResult`: the runtime error taxonomy
//! - `render`: the printable form of a value, also used by `Display`
//!
//! Lists and booleans are ordinary constructor values with the fixed tags in
//! [`tags`]; `Value::as_list` and `Value::as_bool` open them for matching.

mod datatype;
mod errors;
mod value;

pub use datatype::{ConstructorDecl, DataType};
pub use errors::{
    arity_mismatch, crash, cyclic_definition, empty_list, invalid_range_bound, missing_arms,
    non_exhaustive_match, not_a_constructor, type_mismatch, undefined_extern, undefined_global,
    unknown_constructor, EvalError, EvalErrorKind, EvalResult,
};
pub use value::{render, render_num, tags, Constructor, Heap, ListView, Value};
