//! Value formatting.
//!
//! Constructors print as `tag_<tag>_<arity>(<args>)` with arguments joined
//! by `", "`. Numbers print in their shortest form with integral values
//! lacking a fractional part; strings print quoted.

pub use wend_value::{render, render_num};

use wend_value::Value;

/// The printable form of `value`, as a `Text` value.
pub fn to_string(value: &Value) -> Value {
    Value::text(render(value))
}
