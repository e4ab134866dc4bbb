//! Runtime error types.
//!
//! `EvalErrorKind` carries the structured category; factory functions
//! (e.g. `empty_list()`) are the public way to build an `EvalError` and
//! populate both `kind` and `message`.
//!
//! None of these errors are recoverable inside the runtime. They are raised
//! where the violation happens and returned to the caller unchanged.

use thiserror::Error;

use crate::value::{render_num, Value};

/// Result of producing a runtime value.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    // Pattern matching
    /// The handler table has no entry for the scrutinee's tag.
    #[error("non-exhaustive match: no handler for tag {tag} ({arms} handlers supplied)")]
    NonExhaustiveMatch { tag: u32, arms: usize },
    /// A typed match does not cover its type's constructors one-to-one.
    #[error(
        "non-exhaustive match on {type_name}: expected {expected} handlers, got {got}{}",
        missing_suffix(.missing)
    )]
    MissingArms {
        type_name: String,
        expected: usize,
        got: usize,
        missing: Vec<String>,
    },
    /// Only constructor values can be matched.
    #[error("cannot match on {got}: not a constructor value")]
    NotAConstructor { got: String },

    // Construction
    #[error("{name} expects {expected} fields, got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("type {type_name} has no constructor {constructor}")]
    UnknownConstructor {
        type_name: String,
        constructor: String,
    },

    // Lists
    #[error("{operation}: empty list")]
    EmptyList { operation: String },

    /// `range` bounds must be finite and small enough to count down by one.
    #[error("invalid range bound: {bound}")]
    InvalidRangeBound { bound: String },

    // Type trust boundary
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    // Bindings
    #[error("undefined foreign function: {name}")]
    UndefinedExtern { name: String },
    #[error("undefined top-level binding: {name}")]
    UndefinedGlobal { name: String },
    #[error("definition of {name} depends on its own value")]
    CyclicDefinition { name: String },

    /// Raised by the `crash` foreign function.
    #[error("crash: {message}")]
    Crash { message: String },
}

fn missing_suffix(missing: &[String]) -> String {
    if missing.is_empty() {
        String::new()
    } else {
        format!(" (missing {})", missing.join(", "))
    }
}

/// Runtime error.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct EvalError {
    /// Structured category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory-built errors.
    pub message: String,
    /// Secondary context, innermost first.
    pub notes: Vec<String>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            notes: Vec::new(),
        }
    }

    /// Attach a context note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Whether this is a match failure (missing handler or uncovered type).
    pub fn is_match_error(&self) -> bool {
        matches!(
            self.kind,
            EvalErrorKind::NonExhaustiveMatch { .. } | EvalErrorKind::MissingArms { .. }
        )
    }

    /// Whether this came from `first`, `last`, or `rest` on an empty list.
    pub fn is_empty_list(&self) -> bool {
        matches!(self.kind, EvalErrorKind::EmptyList { .. })
    }
}

// Pattern Matching Errors

/// No handler for the scrutinee's tag.
#[cold]
pub fn non_exhaustive_match(tag: u32, arms: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonExhaustiveMatch { tag, arms })
}

/// Handler table does not line up with the declared constructors.
#[cold]
pub fn missing_arms(
    type_name: &str,
    expected: usize,
    got: usize,
    missing: Vec<String>,
) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingArms {
        type_name: type_name.to_string(),
        expected,
        got,
        missing,
    })
}

/// Scrutinee is a number or a string.
#[cold]
pub fn not_a_constructor(got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAConstructor {
        got: got.to_string(),
    })
}

// Construction Errors

/// Wrong number of fields for a constructor or handler.
#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

/// No constructor with this name or tag.
#[cold]
pub fn unknown_constructor(type_name: &str, constructor: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownConstructor {
        type_name: type_name.to_string(),
        constructor: constructor.to_string(),
    })
}

// List Errors

/// `first`, `last`, or `rest` on `Nil`.
#[cold]
pub fn empty_list(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::EmptyList {
        operation: operation.to_string(),
    })
}

/// Range bound is NaN, infinite, or beyond exact integer precision.
#[cold]
pub fn invalid_range_bound(bound: f64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidRangeBound {
        bound: render_num(bound),
    })
}

// Type Errors

/// Value does not have the shape the operation assumes.
#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

// Binding Errors

#[cold]
pub fn undefined_extern(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedExtern {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_global(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedGlobal {
        name: name.to_string(),
    })
}

#[cold]
pub fn cyclic_definition(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CyclicDefinition {
        name: name.to_string(),
    })
}

/// The program asked to halt.
#[cold]
pub fn crash(message: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Crash {
        message: message.to_string(),
    })
}
