//! Structural pattern-match dispatch.
//!
//! A match is a scrutinee plus one handler ("arm") per constructor, indexed
//! by tag. Dispatch picks the arm for the scrutinee's tag, binds the
//! constructor's fields to the arm's parameters positionally, and runs that
//! arm once. No other arm runs.
//!
//! Two entry points:
//! - [`dispatch`]: untyped. Fails only when the selected tag has no arm.
//! - [`dispatch_exhaustive`]: checks the arm table against a `DataType`
//!   declaration up front, so a short table fails even if the missing arm
//!   would not have been selected.
//!
//! Numbers and strings are never coerced into a tag; matching on one is a
//! `NotAConstructor` error.

use wend_value::{
    arity_mismatch, missing_arms, non_exhaustive_match, not_a_constructor, DataType, EvalError,
    Value,
};

type ArmResult<R> = Result<R, EvalError>;

/// One match arm. The variant fixes how many fields it binds.
pub enum Arm<'a, R> {
    Nullary(Box<dyn FnOnce() -> ArmResult<R> + 'a>),
    Unary(Box<dyn FnOnce(Value) -> ArmResult<R> + 'a>),
    Binary(Box<dyn FnOnce(Value, Value) -> ArmResult<R> + 'a>),
    Ternary(Box<dyn FnOnce(Value, Value, Value) -> ArmResult<R> + 'a>),
    /// Escape hatch for constructors with more than three fields. The
    /// fields arrive in declared order; use the fixed-arity variants when
    /// they fit.
    Fields(usize, Box<dyn FnOnce(Vec<Value>) -> ArmResult<R> + 'a>),
}

impl<'a, R> Arm<'a, R> {
    pub fn nullary(f: impl FnOnce() -> ArmResult<R> + 'a) -> Self {
        Arm::Nullary(Box::new(f))
    }

    pub fn unary(f: impl FnOnce(Value) -> ArmResult<R> + 'a) -> Self {
        Arm::Unary(Box::new(f))
    }

    pub fn binary(f: impl FnOnce(Value, Value) -> ArmResult<R> + 'a) -> Self {
        Arm::Binary(Box::new(f))
    }

    pub fn ternary(f: impl FnOnce(Value, Value, Value) -> ArmResult<R> + 'a) -> Self {
        Arm::Ternary(Box::new(f))
    }

    pub fn fields(arity: usize, f: impl FnOnce(Vec<Value>) -> ArmResult<R> + 'a) -> Self {
        Arm::Fields(arity, Box::new(f))
    }

    /// Number of fields this arm binds.
    pub fn arity(&self) -> usize {
        match self {
            Arm::Nullary(_) => 0,
            Arm::Unary(_) => 1,
            Arm::Binary(_) => 2,
            Arm::Ternary(_) => 3,
            Arm::Fields(n, _) => *n,
        }
    }

    /// Bind `args` positionally and run the arm.
    fn invoke(self, tag: u32, args: &[Value]) -> ArmResult<R> {
        match (self, args) {
            (Arm::Nullary(f), []) => f(),
            (Arm::Unary(f), [a]) => f(a.clone()),
            (Arm::Binary(f), [a, b]) => f(a.clone(), b.clone()),
            (Arm::Ternary(f), [a, b, c]) => f(a.clone(), b.clone(), c.clone()),
            (Arm::Fields(n, f), args) if n == args.len() => f(args.to_vec()),
            (arm, args) => Err(arity_mismatch(
                &format!("handler for tag {tag}"),
                args.len(),
                arm.arity(),
            )),
        }
    }
}

/// Run the arm selected by `scrutinee`'s tag.
///
/// Fails with a match error when `arms` has no entry for the tag, and with
/// `NotAConstructor` when the scrutinee is a number or string.
#[tracing::instrument(level = "trace", skip_all)]
pub fn dispatch<R>(scrutinee: &Value, mut arms: Vec<Arm<'_, R>>) -> ArmResult<R> {
    let Some(ctor) = scrutinee.as_ctor() else {
        tracing::debug!(got = %scrutinee.type_name(), "match on non-constructor");
        return Err(not_a_constructor(&scrutinee.type_name()));
    };
    let tag = ctor.tag();
    tracing::trace!(tag, arity = ctor.arity(), arms = arms.len(), "dispatch");

    let index = match usize::try_from(tag) {
        Ok(index) if index < arms.len() => index,
        _ => {
            tracing::debug!(tag, arms = arms.len(), "no handler for tag");
            return Err(non_exhaustive_match(tag, arms.len()));
        }
    };
    // The remaining arms are dropped without running.
    let arm = arms.swap_remove(index);
    arm.invoke(tag, ctor.args())
}

/// Dispatch with the arm table checked against `ty` first.
///
/// The table must have exactly one arm per declared constructor, each
/// binding the declared number of fields, and the scrutinee must be an
/// instance of `ty`.
pub fn dispatch_exhaustive<R>(
    ty: &DataType,
    scrutinee: &Value,
    arms: Vec<Arm<'_, R>>,
) -> ArmResult<R> {
    if arms.len() != ty.len() {
        let missing = ty
            .constructors()
            .iter()
            .skip(arms.len())
            .map(|decl| format!("{} (tag {})", decl.name, decl.tag))
            .collect();
        tracing::debug!(
            ty = ty.name(),
            expected = ty.len(),
            got = arms.len(),
            "arm table does not cover type"
        );
        return Err(missing_arms(ty.name(), ty.len(), arms.len(), missing));
    }
    for (decl, arm) in ty.constructors().iter().zip(&arms) {
        if decl.arity != arm.arity() {
            return Err(arity_mismatch(&decl.name, decl.arity, arm.arity()));
        }
    }
    if scrutinee.as_ctor().is_none() {
        return Err(not_a_constructor(&scrutinee.type_name()));
    }
    ty.check(scrutinee)?;
    dispatch(scrutinee, arms)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use wend_value::EvalErrorKind;

    fn list(items: &[f64]) -> Value {
        Value::list_from(items.iter().copied().map(Value::num))
    }

    #[test]
    fn selects_arm_by_tag_and_binds_fields() {
        let h0_calls = Cell::new(0);
        let h1_calls = Cell::new(0);
        let scrutinee = Value::cons(Value::num(7.0), Value::nil());

        let result = dispatch(
            &scrutinee,
            vec![
                Arm::nullary(|| {
                    h0_calls.set(h0_calls.get() + 1);
                    Ok(None)
                }),
                Arm::binary(|head, tail| {
                    h1_calls.set(h1_calls.get() + 1);
                    Ok(Some((head, tail)))
                }),
            ],
        )
        .unwrap();

        assert_eq!(result, Some((Value::num(7.0), Value::nil())));
        assert_eq!(h0_calls.get(), 0);
        assert_eq!(h1_calls.get(), 1);
    }

    #[test]
    fn short_table_is_a_match_error() {
        let err = dispatch(
            &Value::bool(true),
            vec![Arm::nullary(|| Ok("false branch"))],
        )
        .unwrap_err();
        assert!(err.is_match_error());
        assert_eq!(err.kind, EvalErrorKind::NonExhaustiveMatch { tag: 1, arms: 1 });
    }

    #[test]
    fn short_table_is_fine_when_the_tag_is_covered() {
        let result = dispatch(&Value::bool(false), vec![Arm::nullary(|| Ok(0))]);
        assert_eq!(result.unwrap(), 0);
    }

    #[test]
    fn primitives_are_rejected() {
        let err = dispatch(
            &Value::num(1.0),
            vec![Arm::nullary(|| Ok(0)), Arm::nullary(|| Ok(1))],
        )
        .unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::NotAConstructor {
                got: "Num".to_string()
            }
        );

        let err = dispatch(&Value::text(""), vec![Arm::nullary(|| Ok(0))]).unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::NotAConstructor { .. }));
    }

    #[test]
    fn arm_arity_must_match_constructor() {
        let err = dispatch(
            &list(&[1.0]),
            vec![Arm::nullary(|| Ok(0)), Arm::unary(|_| Ok(1))],
        )
        .unwrap_err();
        assert_eq!(err.message, "handler for tag 1 expects 2 fields, got 1");
    }

    #[test]
    fn ternary_and_field_arms() {
        let triple = Value::make(0, vec![Value::num(1.0), Value::num(2.0), Value::num(3.0)]);
        let sum = dispatch(
            &triple,
            vec![Arm::ternary(|a, b, c| {
                Ok(a.as_num()? + b.as_num()? + c.as_num()?)
            })],
        )
        .unwrap();
        assert_eq!(sum, 6.0);

        let wide = Value::make(1, (0..5).map(|i| Value::num(f64::from(i))).collect());
        let count = dispatch(
            &wide,
            vec![Arm::nullary(|| Ok(0)), Arm::fields(5, |fields| Ok(fields.len()))],
        )
        .unwrap();
        assert_eq!(count, 5);
    }

    #[test]
    fn arm_errors_propagate() {
        let err = dispatch(
            &Value::nil(),
            vec![
                Arm::nullary(|| Err(wend_value::empty_list("first"))),
                Arm::binary(|h, _| Ok(h)),
            ],
        )
        .unwrap_err();
        assert!(err.is_empty_list());
    }

    // Typed dispatch

    fn shape() -> DataType {
        DataType::new("Shape")
            .with_constructor("Circle", 1)
            .with_constructor("Rect", 2)
    }

    fn area(value: &Value) -> Result<f64, EvalError> {
        dispatch_exhaustive(
            &shape(),
            value,
            vec![
                Arm::unary(|r| Ok(3.0 * r.as_num()? * r.as_num()?)),
                Arm::binary(|w, h| Ok(w.as_num()? * h.as_num()?)),
            ],
        )
    }

    #[test]
    fn exhaustive_dispatch_on_user_type() {
        let rect = shape()
            .construct("Rect", vec![Value::num(2.0), Value::num(3.0)])
            .unwrap();
        assert_eq!(area(&rect).unwrap(), 6.0);
        let circle = shape().construct("Circle", vec![Value::num(1.0)]).unwrap();
        assert_eq!(area(&circle).unwrap(), 3.0);
    }

    #[test]
    fn exhaustive_dispatch_rejects_short_table_up_front() {
        // Tag 0 would be covered, but the table is still incomplete.
        let circle = Value::make(0, vec![Value::num(1.0)]);
        let err =
            dispatch_exhaustive(&shape(), &circle, vec![Arm::unary(|_| Ok(()))]).unwrap_err();
        assert!(err.is_match_error());
        assert_eq!(
            err.message,
            "non-exhaustive match on Shape: expected 2 handlers, got 1 (missing Rect (tag 1))"
        );
    }

    #[test]
    fn exhaustive_dispatch_checks_arm_arity() {
        let circle = Value::make(0, vec![Value::num(1.0)]);
        let err = dispatch_exhaustive(
            &shape(),
            &circle,
            vec![Arm::unary(|_| Ok(())), Arm::unary(|_| Ok(()))],
        )
        .unwrap_err();
        assert_eq!(err.message, "Rect expects 2 fields, got 1");
    }

    #[test]
    fn exhaustive_dispatch_rejects_foreign_values() {
        let arms = || vec![Arm::unary(|_| Ok(())), Arm::binary(|_, _| Ok(()))];
        let err = dispatch_exhaustive(&shape(), &Value::make(5, Vec::new()), arms()).unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::UnknownConstructor { .. }));
        let err = dispatch_exhaustive(&shape(), &Value::num(1.0), arms()).unwrap_err();
        assert!(matches!(err.kind, EvalErrorKind::NotAConstructor { .. }));
    }
}
