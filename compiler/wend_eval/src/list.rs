//! List algebra derived from a single fold.
//!
//! [`walk`] is the only traversal of a list spine; everything else is
//! defined in terms of it:
//!
//! ```text
//! walk(init, f, Nil)         = init
//! walk(init, f, Cons(x, xs)) = walk(f(x, init), f, xs)
//! ```
//!
//! `f` receives the element first and the accumulator second. Building a
//! list inside the accumulator therefore reverses it, which is how
//! [`reverse`] works and why the order-preserving operations ([`map`],
//! [`keep_if`], [`drop_if`]) go through [`walk_backwards`].
//!
//! Every traversal is a loop, so spine length is bounded by memory, not by
//! the call stack. Callbacks are fallible; the first error stops the
//! traversal and is returned as is.

use wend_value::{empty_list, invalid_range_bound, EvalError, EvalResult, ListView, Value};

/// `2^53`. Below this magnitude `hi - 1.0` is exact; at `-2^53` it rounds
/// back to `hi`.
const MAX_EXACT_BOUND: f64 = 9_007_199_254_740_992.0;

/// Left fold over a list: `f(element, accumulator)` for each element in order.
#[tracing::instrument(level = "trace", skip_all)]
pub fn walk<A, F>(init: A, mut f: F, xs: &Value) -> Result<A, EvalError>
where
    F: FnMut(Value, A) -> Result<A, EvalError>,
{
    let mut acc = init;
    let mut cursor = xs.clone();
    loop {
        match cursor.as_list()? {
            ListView::Nil => return Ok(acc),
            ListView::Cons(head, tail) => {
                acc = f(head, acc)?;
                cursor = tail;
            }
        }
    }
}

/// The list in reverse order.
pub fn reverse(xs: &Value) -> EvalResult {
    walk(Value::nil(), |x, acc| Ok(Value::cons(x, acc)), xs)
}

/// [`walk`] over the reversed list, so `f` sees the last element first.
pub fn walk_backwards<A, F>(init: A, f: F, xs: &Value) -> Result<A, EvalError>
where
    F: FnMut(Value, A) -> Result<A, EvalError>,
{
    walk(init, f, &reverse(xs)?)
}

/// Apply `f` to every element, keeping order.
///
/// `f` is applied from the last element to the first.
pub fn map<F>(mut f: F, xs: &Value) -> EvalResult
where
    F: FnMut(Value) -> EvalResult,
{
    walk_backwards(Value::nil(), |x, acc| Ok(Value::cons(f(x)?, acc)), xs)
}

/// Elements for which `p` holds, in order.
pub fn keep_if<P>(mut p: P, xs: &Value) -> EvalResult
where
    P: FnMut(&Value) -> Result<bool, EvalError>,
{
    walk_backwards(
        Value::nil(),
        |x, acc| {
            if p(&x)? {
                Ok(Value::cons(x, acc))
            } else {
                Ok(acc)
            }
        },
        xs,
    )
}

/// Elements for which `p` does not hold, in order.
pub fn drop_if<P>(mut p: P, xs: &Value) -> EvalResult
where
    P: FnMut(&Value) -> Result<bool, EvalError>,
{
    keep_if(|x| p(x).map(|keep| !keep), xs)
}

/// Sum of a list of numbers; `0` for `Nil`.
pub fn sum(xs: &Value) -> EvalResult {
    walk(0.0, |a, b| Ok(a.as_num()? + b), xs).map(Value::num)
}

/// Product of a list of numbers; `1` for `Nil`.
pub fn product(xs: &Value) -> EvalResult {
    walk(1.0, |a, b| Ok(a.as_num()? * b), xs).map(Value::num)
}

/// `[lo, lo + 1, ..., hi]`, inclusive at both ends; `Nil` when `lo > hi`.
///
/// Counts down from `hi`, prepending, so the result comes out ascending
/// without a reverse. Bounds must be finite with magnitude below `2^53`,
/// otherwise the count-down would never reach `lo`.
pub fn range(lo: f64, hi: f64) -> EvalResult {
    for bound in [lo, hi] {
        if !bound.is_finite() || bound.abs() >= MAX_EXACT_BOUND {
            return Err(invalid_range_bound(bound));
        }
    }
    Ok(range_help(Value::nil(), lo, hi))
}

fn range_help(mut acc: Value, lo: f64, mut hi: f64) -> Value {
    while lo <= hi {
        acc = Value::cons(Value::num(hi), acc);
        hi -= 1.0;
    }
    acc
}

/// `n + 1` copies of `x`: one per element of `range(0, n)`.
pub fn repeat(n: f64, x: &Value) -> EvalResult {
    map(|_| Ok(x.clone()), &range(0.0, n)?)
}

/// The first element; fails on `Nil`.
pub fn first(xs: &Value) -> EvalResult {
    match xs.as_list()? {
        ListView::Nil => Err(empty("first")),
        ListView::Cons(head, _) => Ok(head),
    }
}

/// The last element; fails on `Nil`.
pub fn last(xs: &Value) -> EvalResult {
    let ListView::Cons(mut last, mut cursor) = xs.as_list()? else {
        return Err(empty("last"));
    };
    while let ListView::Cons(head, tail) = cursor.as_list()? {
        last = head;
        cursor = tail;
    }
    Ok(last)
}

/// Everything after the first element; fails on `Nil`.
pub fn rest(xs: &Value) -> EvalResult {
    match xs.as_list()? {
        ListView::Nil => Err(empty("rest")),
        ListView::Cons(_, tail) => Ok(tail),
    }
}

/// Number of elements.
pub fn length(xs: &Value) -> Result<usize, EvalError> {
    walk(0usize, |_, n| Ok(n.saturating_add(1)), xs)
}

/// `True` for `Nil`, `False` for `Cons`.
pub fn is_empty(xs: &Value) -> EvalResult {
    Ok(Value::bool(matches!(xs.as_list()?, ListView::Nil)))
}

#[cold]
fn empty(operation: &str) -> EvalError {
    tracing::debug!(operation, "list operation on empty list");
    empty_list(operation)
}
