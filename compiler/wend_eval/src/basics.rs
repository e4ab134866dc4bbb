//! Boolean connectives and numeric parity.
//!
//! Booleans are `Bool` constructor values, so the connectives are matches
//! over the `Bool` declaration rather than truthiness tests. The right
//! operand of `and`/`or` is returned untouched when it decides the result.

use std::sync::OnceLock;

use wend_value::{DataType, EvalResult, Value};

use crate::dispatch::{dispatch_exhaustive, Arm};

static BOOL_TYPE: OnceLock<DataType> = OnceLock::new();

/// The shared `Bool` declaration, built on first use.
fn bool_type() -> &'static DataType {
    BOOL_TYPE.get_or_init(DataType::bool)
}

/// `False` if `lhs` is `False`, otherwise `rhs`.
pub fn and(lhs: &Value, rhs: &Value) -> EvalResult {
    dispatch_exhaustive(
        bool_type(),
        lhs,
        vec![
            Arm::nullary(|| Ok(Value::bool(false))),
            Arm::nullary(|| Ok(rhs.clone())),
        ],
    )
}

/// `True` if `lhs` is `True`, otherwise `rhs`.
pub fn or(lhs: &Value, rhs: &Value) -> EvalResult {
    dispatch_exhaustive(
        bool_type(),
        lhs,
        vec![
            Arm::nullary(|| Ok(rhs.clone())),
            Arm::nullary(|| Ok(Value::bool(true))),
        ],
    )
}

pub fn not(x: &Value) -> EvalResult {
    dispatch_exhaustive(
        bool_type(),
        x,
        vec![
            Arm::nullary(|| Ok(Value::bool(true))),
            Arm::nullary(|| Ok(Value::bool(false))),
        ],
    )
}

/// `True` when `n` is divisible by two.
pub fn is_even(n: &Value) -> EvalResult {
    Ok(Value::bool(n.as_num()? % 2.0 == 0.0))
}

pub fn is_odd(n: &Value) -> EvalResult {
    not(&is_even(n)?)
}
