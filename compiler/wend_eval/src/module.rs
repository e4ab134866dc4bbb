//! Top-level bindings.
//!
//! Binding happens in two passes. [`ModuleBuilder::define`] records every
//! definition without evaluating it; [`Module::get`] evaluates a definition
//! the first time it is looked up and caches the value. A definition may
//! therefore refer to names declared after it, as long as evaluating it does
//! not need its own value.

use std::cell::RefCell;
use std::fmt;

use rustc_hash::FxHashMap;
use wend_stack::ensure_sufficient_stack;
use wend_value::{cyclic_definition, undefined_global, EvalError, EvalResult, Value};

type Thunk = Box<dyn Fn(&Module) -> EvalResult>;

enum Slot {
    Pending(Thunk),
    Evaluating,
    Done(Value),
}

/// Collects definitions for a [`Module`].
pub struct ModuleBuilder {
    name: String,
    definitions: Vec<(String, Thunk)>,
}

impl ModuleBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        ModuleBuilder {
            name: name.into(),
            definitions: Vec::new(),
        }
    }

    /// Declare `name`, computed by `body` on first lookup.
    ///
    /// `body` receives the finished module so it can look up other names.
    #[must_use]
    pub fn define(
        mut self,
        name: impl Into<String>,
        body: impl Fn(&Module) -> EvalResult + 'static,
    ) -> Self {
        self.definitions.push((name.into(), Box::new(body)));
        self
    }

    /// Declare `name` bound to an already computed value.
    #[must_use]
    pub fn define_value(self, name: impl Into<String>, value: Value) -> Self {
        self.define(name, move |_| Ok(value.clone()))
    }

    /// Finish the declaration pass. A name declared twice keeps its last body.
    pub fn build(self) -> Module {
        let mut slots = FxHashMap::default();
        for (name, body) in self.definitions {
            if slots
                .insert(name.clone(), RefCell::new(Slot::Pending(body)))
                .is_some()
            {
                tracing::debug!(module = %self.name, %name, "definition replaced");
            }
        }
        Module {
            name: self.name,
            slots,
        }
    }
}

/// A set of lazily evaluated top-level definitions.
pub struct Module {
    name: String,
    slots: FxHashMap<String, RefCell<Slot>>,
}

impl Module {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value of `name`, evaluating it on first use.
    ///
    /// A failed evaluation is not cached; the next lookup runs the body again.
    pub fn get(&self, name: &str) -> EvalResult {
        let Some(slot) = self.slots.get(name) else {
            tracing::debug!(module = %self.name, name, "lookup of undefined binding");
            return Err(undefined_global(name));
        };

        let body = match slot.replace(Slot::Evaluating) {
            Slot::Pending(body) => body,
            Slot::Done(value) => {
                slot.replace(Slot::Done(value.clone()));
                return Ok(value);
            }
            Slot::Evaluating => {
                tracing::debug!(module = %self.name, name, "cyclic definition");
                return Err(cyclic_definition(name));
            }
        };

        tracing::trace!(module = %self.name, name, "evaluating definition");
        match ensure_sufficient_stack(|| body(self)) {
            Ok(value) => {
                slot.replace(Slot::Done(value.clone()));
                Ok(value)
            }
            Err(err) => {
                slot.replace(Slot::Pending(body));
                Err(err.with_note(format!("while evaluating {name}")))
            }
        }
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Whether `name` has already been evaluated.
    pub fn is_evaluated(&self, name: &str) -> bool {
        self.slots
            .get(name)
            .is_some_and(|slot| matches!(*slot.borrow(), Slot::Done(_)))
    }

    /// Declared names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.slots.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Evaluate every definition, in name order.
    pub fn evaluate_all(&self) -> Result<Vec<(String, Value)>, EvalError> {
        self.names()
            .into_iter()
            .map(|name| Ok((name.to_string(), self.get(name)?)))
            .collect()
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::list::{range, sum};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;
    use wend_value::EvalErrorKind;

    #[test]
    fn forward_references_resolve() {
        // `total` is declared before the list it sums.
        let module = ModuleBuilder::new("main")
            .define("total", |m| sum(&m.get("numbers")?))
            .define("numbers", |_| range(1.0, 4.0))
            .build();
        assert_eq!(module.get("total").unwrap(), Value::num(10.0));
    }

    #[test]
    fn definitions_are_evaluated_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let module = ModuleBuilder::new("main")
            .define("answer", move |_| {
                counter.set(counter.get() + 1);
                Ok(Value::num(42.0))
            })
            .build();

        assert!(!module.is_evaluated("answer"));
        assert_eq!(module.get("answer").unwrap(), Value::num(42.0));
        assert_eq!(module.get("answer").unwrap(), Value::num(42.0));
        assert!(module.is_evaluated("answer"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn nothing_is_evaluated_until_looked_up() {
        let module = ModuleBuilder::new("main")
            .define("boom", |_| Err(wend_value::crash("evaluated eagerly")))
            .define_value("fine", Value::num(1.0))
            .build();
        assert_eq!(module.get("fine").unwrap(), Value::num(1.0));
        assert!(!module.is_evaluated("boom"));
    }

    #[test]
    fn self_dependency_is_an_error() {
        let module = ModuleBuilder::new("main")
            .define("a", |m| m.get("b"))
            .define("b", |m| m.get("a"))
            .build();
        let err = module.get("a").unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::CyclicDefinition {
                name: "a".to_string()
            }
        );
        assert_eq!(
            err.notes,
            vec!["while evaluating b".to_string(), "while evaluating a".to_string()]
        );
        // The failure is not cached as a value.
        assert!(!module.is_evaluated("a"));
        assert!(module.get("a").is_err());
    }

    #[test]
    fn undefined_names_fail() {
        let module = ModuleBuilder::new("main")
            .define("a", |m| m.get("missing"))
            .build();
        let err = module.get("a").unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::UndefinedGlobal {
                name: "missing".to_string()
            }
        );
        assert!(!module.is_defined("missing"));
    }

    #[test]
    fn later_definition_wins() {
        let module = ModuleBuilder::new("main")
            .define_value("x", Value::num(1.0))
            .define_value("x", Value::num(2.0))
            .build();
        assert_eq!(module.len(), 1);
        assert_eq!(module.get("x").unwrap(), Value::num(2.0));
    }

    #[test]
    fn evaluate_all_in_name_order() {
        let module = ModuleBuilder::new("main")
            .define("b", |m| Ok(Value::num(m.get("a")?.as_num()? + 1.0)))
            .define_value("a", Value::num(1.0))
            .build();
        assert_eq!(module.names(), vec!["a", "b"]);
        assert_eq!(
            module.evaluate_all().unwrap(),
            vec![
                ("a".to_string(), Value::num(1.0)),
                ("b".to_string(), Value::num(2.0)),
            ]
        );
    }
}
