//! Algebraic data type declarations.
//!
//! A `DataType` is the closed, ordered set of constructors of one type.
//! Tags are assigned from declaration order (`0..N-1`) when a constructor is
//! added and never change afterwards.

use rustc_hash::FxHashMap;

use crate::errors::{arity_mismatch, type_mismatch, unknown_constructor, EvalError, EvalResult};
use crate::value::Value;

/// One declared constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorDecl {
    pub name: String,
    pub tag: u32,
    pub arity: usize,
}

/// Declaration of an algebraic data type.
#[derive(Clone, Debug)]
pub struct DataType {
    name: String,
    constructors: Vec<ConstructorDecl>,
    /// Constructor name → tag.
    by_name: FxHashMap<String, u32>,
}

impl DataType {
    /// Start a declaration with no constructors.
    pub fn new(name: impl Into<String>) -> Self {
        DataType {
            name: name.into(),
            constructors: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    /// Declare the next constructor; it receives the next free tag.
    ///
    /// Redeclaring a name keeps the first declaration's tag for lookups by
    /// name, but still occupies a tag.
    #[must_use]
    pub fn with_constructor(mut self, name: impl Into<String>, arity: usize) -> Self {
        let name = name.into();
        let tag = u32::try_from(self.constructors.len()).unwrap_or(u32::MAX);
        self.by_name.entry(name.clone()).or_insert(tag);
        self.constructors.push(ConstructorDecl { name, tag, arity });
        self
    }

    /// `List = Nil | Cons(head, tail)`.
    pub fn list() -> Self {
        DataType::new("List")
            .with_constructor("Nil", 0)
            .with_constructor("Cons", 2)
    }

    /// `Bool = False | True`.
    pub fn bool() -> Self {
        DataType::new("Bool")
            .with_constructor("False", 0)
            .with_constructor("True", 0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared constructors in tag order.
    pub fn constructors(&self) -> &[ConstructorDecl] {
        &self.constructors
    }

    /// Number of declared constructors.
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    pub fn tag_of(&self, constructor: &str) -> Option<u32> {
        self.by_name.get(constructor).copied()
    }

    pub fn constructor(&self, tag: u32) -> Option<&ConstructorDecl> {
        self.constructors.get(usize::try_from(tag).ok()?)
    }

    /// Apply the constructor called `constructor` to `args`.
    pub fn construct(&self, constructor: &str, args: Vec<Value>) -> EvalResult {
        let tag = self
            .tag_of(constructor)
            .ok_or_else(|| unknown_constructor(&self.name, constructor))?;
        self.construct_tag(tag, args)
    }

    /// Apply the constructor with tag `tag` to `args`.
    pub fn construct_tag(&self, tag: u32, args: Vec<Value>) -> EvalResult {
        let decl = self
            .constructor(tag)
            .ok_or_else(|| unknown_constructor(&self.name, &format!("with tag {tag}")))?;
        if decl.arity != args.len() {
            return Err(arity_mismatch(&decl.name, decl.arity, args.len()));
        }
        Ok(Value::make(tag, args))
    }

    /// Check that `value` is an instance of this type and return its declaration.
    ///
    /// Only the outermost constructor is checked; fields are not.
    pub fn check<'a>(&'a self, value: &Value) -> Result<&'a ConstructorDecl, EvalError> {
        let Some(ctor) = value.as_ctor() else {
            return Err(type_mismatch(&self.name, &value.type_name()));
        };
        let decl = self
            .constructor(ctor.tag())
            .ok_or_else(|| unknown_constructor(&self.name, &format!("with tag {}", ctor.tag())))?;
        if decl.arity != ctor.arity() {
            return Err(arity_mismatch(&decl.name, decl.arity, ctor.arity()));
        }
        Ok(decl)
    }
}
