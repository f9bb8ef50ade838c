/*! The bidirectional type checker: `infer` and `check`.

`infer` computes a term's type; `check` verifies a term against an
expected type. The two are mutually recursive — `check`'s fallback case
delegates to `infer` and compares, and `infer`'s `App` case delegates to
`check` for the argument — which is the usual shape of a bidirectional
checker and is what lets this checker get away without ever guessing a
lambda's domain: a `Lam` can only be checked, never inferred (see
[`TypeError::NeedsAnnotation`]).

Both judgements take the typing [`Context`] as an explicit parameter
rather than reading and restoring shared mutable state: entering a binder
computes an *extended* `Context` and passes it to the recursive call,
and exiting is just that call returning, at which point the caller's
original `Context` — never mutated — is already back in hand.
*/

use ustr::Ustr;

use crate::context::Context;
use crate::normalize::Normalizer;
use crate::subst::subst;
use crate::term::{Term, TermData};
use crate::value::ValueData;

/// Everything that can go wrong while checking a term, one variant per
/// failing rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// A `Var(x)` with `x` not bound in the context.
    #[error("unbound variable `{name}`")]
    UnboundVariable {
        /// The variable that could not be resolved.
        name: Ustr,
    },

    /// A term used in a type position whose inferred type is not a universe.
    #[error("`{term}` is used as a type but does not infer to a universe")]
    NotAType {
        /// The term that was expected to be a type.
        term: Term,
    },

    /// The head of an application does not infer to a `Pi`.
    #[error("`{term}` is applied as a function but does not infer to a Pi type")]
    NotAFunction {
        /// The applied term.
        term: Term,
    },

    /// An argument fails to check against the function's domain.
    #[error("argument `{argument}` does not check against the expected domain `{expected}`")]
    ArgTypeMismatch {
        /// The argument term.
        argument: Term,
        /// The domain it was checked against.
        expected: Term,
    },

    /// An inferred type is not definitionally equal to the expected type.
    #[error("expected type `{expected}`, found `{actual}`")]
    TypeMismatch {
        /// The type that was expected.
        expected: Term,
        /// The type that was actually inferred.
        actual: Term,
    },

    /// `Universe(n)` checked against `Universe(m)` with `n >= m`.
    #[error("`Type_{level}` does not check against `{against}`")]
    UniverseLevelError {
        /// The level of the universe being checked.
        level: u32,
        /// The type it was checked against.
        against: Term,
    },

    /// `Universe(_)` checked against a type that is not itself a universe.
    #[error("`Type_{level}` checked against non-universe type `{against}`")]
    UniverseMustBeTypedByUniverse {
        /// The level of the universe being checked.
        level: u32,
        /// The non-universe type it was checked against.
        against: Term,
    },

    /// A lambda checked against a non-`Pi` type.
    #[error("lambda `{term}` checked against non-Pi type `{against}`")]
    LambdaNotPi {
        /// The lambda term.
        term: Term,
        /// The non-Pi type it was checked against.
        against: Term,
    },

    /// `infer` was called on a `Lam`; lambdas must be checked, not inferred.
    #[error("cannot infer the type of `{term}`; lambdas must be checked against an expected Pi type")]
    NeedsAnnotation {
        /// The lambda term.
        term: Term,
    },

    /// The supplied expected type is itself ill-typed.
    #[error("`{term}` is not a valid type")]
    InvalidType {
        /// The purported type that failed its own well-formedness check.
        term: Term,
    },
}

/// Bidirectionally type-checks terms against a typing context.
pub struct Checker {
    context: Context,
    normalizer: Normalizer,
}

impl Checker {
    /// A checker with an empty context.
    pub fn new() -> Self {
        Self { context: Context::new(), normalizer: Normalizer::new() }
    }

    /// Extends this checker's base context with a free variable's
    /// declared type. Used by embedding callers to seed assumptions
    /// before checking a term.
    pub fn context_extend(&mut self, name: impl Into<Ustr>, ty: Term) {
        self.context = self.context.clone().extend(name.into(), ty);
    }

    /// The context this checker currently checks against.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Infers the type of `term` under this checker's context.
    pub fn infer(&self, term: &Term) -> Result<Term, TypeError> {
        self.infer_in(&self.context, term)
    }

    /// Checks `term` against expected type `ty` under this checker's
    /// context.
    pub fn check(&self, term: &Term, ty: &Term) -> Result<bool, TypeError> {
        self.check_in(&self.context, term, ty)
    }

    fn infer_in(&self, ctx: &Context, term: &Term) -> Result<Term, TypeError> {
        match &**term {
            TermData::Var(x) => ctx
                .lookup(*x)
                .cloned()
                .ok_or(TypeError::UnboundVariable { name: *x }),
            TermData::Universe(n) => Ok(Term::universe(n + 1)),
            TermData::Pi(x, a, b) => {
                let i = self.require_universe(ctx, a)?;
                let extended = ctx.clone().extend(*x, a.clone());
                let j = self.require_universe(&extended, b)?;
                Ok(Term::universe(i.max(j)))
            }
            TermData::Lam(..) => Err(TypeError::NeedsAnnotation { term: term.clone() }),
            TermData::App(f, a) => {
                let f_ty = self.infer_in(ctx, f)?;
                let (y, domain, codomain) = self
                    .as_pi(&f_ty)
                    .ok_or_else(|| TypeError::NotAFunction { term: f.clone() })?;
                self.check_in(ctx, a, &domain)
                    .map_err(|_| TypeError::ArgTypeMismatch { argument: a.clone(), expected: domain.clone() })?;
                Ok(subst(&codomain, y, a))
            }
        }
    }

    fn check_in(&self, ctx: &Context, term: &Term, ty: &Term) -> Result<bool, TypeError> {
        self.require_universe(ctx, ty).map_err(|_| TypeError::InvalidType { term: ty.clone() })?;

        match &**term {
            TermData::Universe(n) => match &**ty {
                TermData::Universe(m) if n < m => Ok(true),
                TermData::Universe(_) => Err(TypeError::UniverseLevelError { level: *n, against: ty.clone() }),
                _ => Err(TypeError::UniverseMustBeTypedByUniverse { level: *n, against: ty.clone() }),
            },
            TermData::Lam(x, a, body) => {
                let (y, domain, codomain) = self
                    .as_pi(ty)
                    .ok_or_else(|| TypeError::LambdaNotPi { term: term.clone(), against: ty.clone() })?;
                if !self.is_equal_terms(a, &domain) {
                    // `LambdaNotPi` is reserved for `ty` not being a `Pi`
                    // at all; a domain that disagrees with an actual `Pi`
                    // is a definitional-equality failure instead.
                    return Err(TypeError::TypeMismatch { expected: domain.clone(), actual: a.clone() });
                }
                let extended = ctx.clone().extend(*x, a.clone());
                let expected_body_ty = subst(&codomain, y, &Term::var(*x));
                self.check_in(&extended, body, &expected_body_ty)
            }
            _ => {
                let inferred = self.infer_in(ctx, term)?;
                if self.is_equal_terms(&inferred, ty) {
                    Ok(true)
                } else {
                    Err(TypeError::TypeMismatch { expected: ty.clone(), actual: inferred })
                }
            }
        }
    }

    /// Infers `term`'s type and requires it to normalize to a universe,
    /// returning the universe's level.
    fn require_universe(&self, ctx: &Context, term: &Term) -> Result<u32, TypeError> {
        let ty = self.infer_in(ctx, term)?;
        self.normalizer
            .normalize(&ty)
            .as_universe_level()
            .ok_or_else(|| TypeError::NotAType { term: term.clone() })
    }

    /// If `ty` normalizes to (a neutral headed by) a `Pi`, its parts.
    fn as_pi(&self, ty: &Term) -> Option<(Ustr, Term, Term)> {
        let value = self.normalizer.normalize(ty);
        match &*value {
            ValueData::Neutral(head, args) if args.is_empty() => match &**head {
                TermData::Pi(y, a, b) => Some((*y, a.clone(), b.clone())),
                _ => None,
            },
            _ => None,
        }
    }

    /// Definitional equality of two terms, via normalization.
    fn is_equal_terms(&self, a: &Term, b: &Term) -> bool {
        let va = self.normalizer.normalize(a);
        let vb = self.normalizer.normalize(b);
        self.normalizer.is_equal(&va, &vb)
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_universe_successor() {
        let checker = Checker::new();
        assert_eq!(checker.infer(&Term::universe(0)).unwrap(), Term::universe(1));
    }

    #[test]
    fn unbound_variable_fails_to_infer() {
        let checker = Checker::new();
        assert_eq!(
            checker.infer(&Term::var("x")).unwrap_err(),
            TypeError::UnboundVariable { name: Ustr::from("x") }
        );
    }

    #[test]
    fn bound_variable_infers_its_declared_type() {
        let mut checker = Checker::new();
        checker.context_extend("x", Term::universe(0));
        assert_eq!(checker.infer(&Term::var("x")).unwrap(), Term::universe(0));
    }

    #[test]
    fn lambda_cannot_be_inferred() {
        let checker = Checker::new();
        let lam = Term::lam("x", Term::universe(0), Term::var("x"));
        assert_eq!(checker.infer(&lam).unwrap_err(), TypeError::NeedsAnnotation { term: lam });
    }

    #[test]
    fn identity_lambda_checks_against_its_pi_type() {
        let checker = Checker::new();
        let lam = Term::lam("x", Term::universe(0), Term::var("x"));
        let ty = Term::pi("x", Term::universe(0), Term::universe(0));
        assert_eq!(checker.check(&lam, &ty), Ok(true));
    }

    #[test]
    fn pi_type_infers_to_the_max_universe_of_its_parts() {
        let checker = Checker::new();
        let pi = Term::pi("x", Term::universe(0), Term::universe(2));
        assert_eq!(checker.infer(&pi).unwrap(), Term::universe(3));
    }

    #[test]
    fn application_substitutes_the_argument_into_the_codomain() {
        let mut checker = Checker::new();
        checker.context_extend("A", Term::universe(0));
        checker.context_extend("a", Term::var("A"));
        checker.context_extend("f", Term::pi("x", Term::var("A"), Term::var("A")));
        let applied = Term::app(Term::var("f"), Term::var("a"));
        assert_eq!(checker.infer(&applied).unwrap(), Term::var("A"));
    }

    #[test]
    fn application_with_ill_typed_argument_fails() {
        let mut checker = Checker::new();
        checker.context_extend("A", Term::universe(0));
        checker.context_extend("a", Term::var("A"));
        checker.context_extend("f", Term::pi("x", Term::var("A"), Term::var("A")));
        let applied = Term::app(Term::var("f"), Term::universe(0));
        assert!(matches!(checker.infer(&applied), Err(TypeError::ArgTypeMismatch { .. })));
    }

    #[test]
    fn universe_checked_against_a_strictly_higher_universe_succeeds() {
        let checker = Checker::new();
        assert_eq!(checker.check(&Term::universe(0), &Term::universe(1)), Ok(true));
    }

    #[test]
    fn universe_checked_against_an_equal_or_lower_universe_fails() {
        let checker = Checker::new();
        assert_eq!(
            checker.check(&Term::universe(1), &Term::universe(0)),
            Err(TypeError::UniverseLevelError { level: 1, against: Term::universe(0) })
        );
    }

    #[test]
    fn applying_a_non_function_fails() {
        let mut checker = Checker::new();
        checker.context_extend("x", Term::universe(0));
        let applied = Term::app(Term::var("x"), Term::universe(0));
        assert!(matches!(checker.infer(&applied), Err(TypeError::NotAFunction { .. })));
    }
}
