//! Constructor cells: the tagged payload behind `Value::Ctor`.

use std::mem;

use super::Value;

/// One instance of an algebraic data type constructor.
///
/// `tag` identifies the constructor within its type (dense, in declaration
/// order). The arity is not stored separately: it is always `args.len()`.
pub struct Constructor {
    tag: u32,
    args: Vec<Value>,
}

impl Constructor {
    #[inline]
    pub(super) fn new(tag: u32, args: Vec<Value>) -> Self {
        Constructor { tag, args }
    }

    /// Which constructor of its type this is.
    #[inline]
    pub fn tag(&self) -> u32 {
        self.tag
    }

    /// Number of fields.
    #[inline]
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Fields in declared order.
    #[inline]
    pub fn args(&self) -> &[Value] {
        &self.args
    }
}

/// Tear down nested constructors without recursion.
///
/// The default drop glue would recurse once per cons cell, so a long list
/// would overflow the stack when its head is released. Children that are
/// still shared elsewhere are released by decrementing their count only.
impl Drop for Constructor {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.args);
        while let Some(value) = pending.pop() {
            if let Value::Ctor(heap) = value {
                if let Some(mut ctor) = heap.into_unique() {
                    pending.append(&mut ctor.args);
                }
            }
        }
    }
}
