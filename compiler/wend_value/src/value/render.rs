//! Printable rendering of runtime values.
//!
//! - Numeric: decimal; integral values print without a fractional part.
//! - Textual: wrapped in double quotes, contents unescaped.
//! - Constructor: `tag_<tag>_<arity>(<args>)`, arguments joined by `", "`.

use std::fmt::{self, Write};

use wend_stack::ensure_sufficient_stack;

use super::Value;

/// Render a value to a fresh string.
pub fn render(value: &Value) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_value(&mut out, value);
    out
}

/// Render a number the way a literal of the source language reads.
pub fn render_num(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        // Covers -0.0 as well.
        "0".to_string()
    } else {
        n.to_string()
    }
}

pub(super) fn write_value<W: Write>(out: &mut W, value: &Value) -> fmt::Result {
    ensure_sufficient_stack(|| match value {
        Value::Num(n) => out.write_str(&render_num(*n)),
        Value::Text(s) => write!(out, "\"{}\"", s.as_str()),
        Value::Ctor(ctor) => {
            write!(out, "tag_{}_{}(", ctor.tag(), ctor.arity())?;
            for (i, arg) in ctor.args().iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write_value(out, arg)?;
            }
            out.write_char(')')
        }
    })
}
