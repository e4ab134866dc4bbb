//! Runtime values.
//!
//! Every value has one of three shapes: a number, a string, or a constructor
//! application. User-defined algebraic data types, lists, and booleans are all
//! constructor applications identified by a dense `tag`.
//!
//! # Factory Methods
//!
//! Heap-backed values can only be built through `Value::` factories. `Heap`
//! has a private constructor, so the `arity == args.len()` invariant cannot be
//! broken from outside this module:
//!
//! ```text
//! let point = Value::make(0, vec![Value::num(1.0), Value::num(2.0)]);
//! let xs = Value::cons(Value::num(1.0), Value::nil());
//! let yes = Value::bool(true);
//! ```
//!
//! # Sharing
//!
//! Values are immutable. Cloning is a reference-count bump, so lists may
//! freely share tails.

mod constructor;
mod heap;
mod render;

use std::fmt;

use smallvec::SmallVec;

use crate::errors::{type_mismatch, EvalError};

pub use constructor::Constructor;
pub use heap::Heap;
pub use render::{render, render_num};

/// Fixed tags of the built-in `List` and `Bool` types.
pub mod tags {
    /// `Nil`, the empty list.
    pub const NIL: u32 = 0;
    /// `Cons(head, tail)`.
    pub const CONS: u32 = 1;
    /// `False`.
    pub const FALSE: u32 = 0;
    /// `True`.
    pub const TRUE: u32 = 1;
}

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    /// Numeric value.
    Num(f64),
    /// Textual value.
    Text(Heap<String>),
    /// Constructor application: a tag plus its ordered fields.
    Ctor(Heap<Constructor>),
}

/// A list value opened up for matching.
#[derive(Clone, Debug, PartialEq)]
pub enum ListView {
    Nil,
    Cons(Value, Value),
}

// Factory Methods

impl Value {
    /// Lift a numeric literal.
    #[inline]
    pub fn num(n: f64) -> Self {
        Value::Num(n)
    }

    /// Lift a textual literal.
    #[inline]
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(Heap::new(s.into()))
    }

    /// Apply constructor `tag` to `args`; the arity is `args.len()`.
    #[inline]
    pub fn make(tag: u32, args: Vec<Value>) -> Self {
        Value::Ctor(Heap::new(Constructor::new(tag, args)))
    }

    /// The empty list.
    #[inline]
    pub fn nil() -> Self {
        Value::make(tags::NIL, Vec::new())
    }

    /// Prepend `head` to `tail`.
    #[inline]
    pub fn cons(head: Value, tail: Value) -> Self {
        Value::make(tags::CONS, vec![head, tail])
    }

    /// `True` or `False`.
    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::make(if b { tags::TRUE } else { tags::FALSE }, Vec::new())
    }

    /// Build a list holding `items` in iteration order.
    pub fn list_from<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: DoubleEndedIterator,
    {
        items
            .into_iter()
            .rev()
            .fold(Value::nil(), |tail, head| Value::cons(head, tail))
    }
}

// Accessors

impl Value {
    /// The constructor behind this value, if it is one.
    #[inline]
    pub fn as_ctor(&self) -> Option<&Constructor> {
        match self {
            Value::Ctor(ctor) => Some(ctor),
            Value::Num(_) | Value::Text(_) => None,
        }
    }

    /// The number behind this value.
    pub fn as_num(&self) -> Result<f64, EvalError> {
        match self {
            Value::Num(n) => Ok(*n),
            _ => Err(type_mismatch("Num", &self.type_name())),
        }
    }

    /// The string behind this value.
    pub fn as_text(&self) -> Result<&str, EvalError> {
        match self {
            Value::Text(s) => Ok(s.as_str()),
            _ => Err(type_mismatch("Text", &self.type_name())),
        }
    }

    /// Read a `Bool` constructor value.
    pub fn as_bool(&self) -> Result<bool, EvalError> {
        match self.as_ctor() {
            Some(c) if c.arity() == 0 && c.tag() == tags::FALSE => Ok(false),
            Some(c) if c.arity() == 0 && c.tag() == tags::TRUE => Ok(true),
            _ => Err(type_mismatch("Bool", &self.type_name())),
        }
    }

    /// Open a `List` constructor value into `Nil` or `Cons(head, tail)`.
    pub fn as_list(&self) -> Result<ListView, EvalError> {
        match self.as_ctor() {
            Some(c) if c.tag() == tags::NIL && c.arity() == 0 => Ok(ListView::Nil),
            Some(c) if c.tag() == tags::CONS && c.arity() == 2 => {
                let [head, tail] = c.args() else {
                    return Err(type_mismatch("List", &self.type_name()));
                };
                Ok(ListView::Cons(head.clone(), tail.clone()))
            }
            _ => Err(type_mismatch("List", &self.type_name())),
        }
    }

    /// Collect the elements of a list value, head first.
    pub fn to_vec(&self) -> Result<Vec<Value>, EvalError> {
        let mut items = Vec::new();
        let mut cursor = self.clone();
        loop {
            match cursor.as_list()? {
                ListView::Nil => return Ok(items),
                ListView::Cons(head, tail) => {
                    items.push(head);
                    cursor = tail;
                }
            }
        }
    }

    /// Short description of the value's shape for error messages.
    ///
    /// Constructors are described as `tag_<tag>_<arity>`, which is all the
    /// runtime knows about them without a type declaration.
    pub fn type_name(&self) -> String {
        match self {
            Value::Num(_) => "Num".to_string(),
            Value::Text(_) => "Text".to_string(),
            Value::Ctor(c) => format!("tag_{}_{}", c.tag(), c.arity()),
        }
    }
}

// Conversions

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::num(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::bool(b)
    }
}

// Equality

/// Structural equality: same shape, same tag, fields pairwise equal.
///
/// Walks the two values with an explicit worklist so comparing long lists
/// does not recurse once per cell.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        let mut pending: SmallVec<[(&Value, &Value); 8]> = SmallVec::new();
        pending.push((self, other));
        while let Some((a, b)) = pending.pop() {
            match (a, b) {
                (Value::Num(x), Value::Num(y)) => {
                    if x != y {
                        return false;
                    }
                }
                (Value::Text(x), Value::Text(y)) => {
                    if x.as_str() != y.as_str() {
                        return false;
                    }
                }
                (Value::Ctor(x), Value::Ctor(y)) => {
                    if x.tag() != y.tag() || x.arity() != y.arity() {
                        return false;
                    }
                    pending.extend(x.args().iter().zip(y.args()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::write_value(f, self)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::write_value(f, self)
    }
}
