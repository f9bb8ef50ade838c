//! Property-based tests for the universal properties, run against
//! arbitrary (not necessarily well-typed) generated terms where the
//! property in question does not require well-typedness, and against
//! small hand-parameterized typed families where it does.
//!
//! Gated behind the `property-tests` feature, matching the way this
//! codebase's own proptest-dependent crates keep the dependency optional.
#![cfg(feature = "property-tests")]

use mltt::check::TypeError;
use mltt::{Checker, Normalizer, Term};
use proptest::prelude::*;

const NAMES: &[&str] = &["a", "b", "c", "x", "y"];

fn name_strategy() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(NAMES)
}

/// A depth-bounded generator for arbitrary terms. Not every generated term
/// is well-scoped (variables may be free) or well-typed — that is the
/// point for the properties that only need evaluation, which never fails
/// regardless of typing.
fn term_strategy() -> impl Strategy<Value = Term> {
    let leaf = prop_oneof![
        name_strategy().prop_map(Term::var),
        (0u32..4).prop_map(Term::universe),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (name_strategy(), inner.clone(), inner.clone())
                .prop_map(|(x, a, b)| Term::pi(x, a, b)),
            (name_strategy(), inner.clone(), inner.clone())
                .prop_map(|(x, a, t)| Term::lam(x, a, t)),
            (inner.clone(), inner).prop_map(|(f, a)| Term::app(f, a)),
        ]
    })
}

proptest! {
    /// Property 1: universe successor.
    #[test]
    fn universe_successor(n in 0u32..10_000) {
        let checker = Checker::new();
        prop_assert_eq!(checker.infer(&Term::universe(n)).unwrap(), Term::universe(n + 1));
    }

    /// Property 2: universe hierarchy.
    #[test]
    fn universe_hierarchy(n in 0u32..50, m in 0u32..50) {
        let checker = Checker::new();
        let result = checker.check(&Term::universe(n), &Term::universe(m));
        if n < m {
            prop_assert_eq!(result, Ok(true));
        } else {
            let is_universe_level_error = matches!(result, Err(TypeError::UniverseLevelError { .. }));
            prop_assert!(is_universe_level_error);
        }
    }

    /// Property 3: the identity function is well-typed at every universe.
    #[test]
    fn identity_function_is_well_typed(n in 0u32..20) {
        let checker = Checker::new();
        let u_n = Term::universe(n);
        let term = Term::lam("A", u_n.clone(), Term::lam("x", Term::var("A"), Term::var("x")));
        let ty = Term::pi("A", u_n, Term::pi("x", Term::var("A"), Term::var("A")));
        prop_assert_eq!(checker.check(&term, &ty), Ok(true));
    }

    /// Property 4: normalize then reify then normalize again is a no-op,
    /// up to definitional equality.
    #[test]
    fn normalization_is_idempotent(t in term_strategy()) {
        let n = Normalizer::new();
        let v1 = n.normalize(&t);
        let reified = n.reify(&v1);
        let v2 = n.normalize(&reified);
        prop_assert!(n.is_equal(&v1, &v2));
    }

    /// Property 5: definitional equality is reflexive.
    #[test]
    fn equality_is_reflexive(t in term_strategy()) {
        let n = Normalizer::new();
        let v = n.normalize(&t);
        prop_assert!(n.is_equal(&v, &v));
    }

    /// Property 6: definitional equality is symmetric.
    #[test]
    fn equality_is_symmetric(t1 in term_strategy(), t2 in term_strategy()) {
        let n = Normalizer::new();
        let v1 = n.normalize(&t1);
        let v2 = n.normalize(&t2);
        prop_assert_eq!(n.is_equal(&v1, &v2), n.is_equal(&v2, &v1));
    }

    /// Property 7: the context a checker started with is exactly the
    /// context it has after any infer/check call, successful or not —
    /// there is no restore step to forget, because nothing mutates it.
    #[test]
    fn context_is_unchanged_by_infer_or_check(t in term_strategy()) {
        let mut checker = Checker::new();
        checker.context_extend("A", Term::universe(0));
        let before = checker.context().clone();
        let _ = checker.infer(&t);
        let _ = checker.check(&t, &Term::universe(0));
        prop_assert!(checker.context() == &before);
    }

    /// Property 8: substitution soundness, instantiated over a small
    /// family of telescopes `A : Type_n`, `x : A`, `B := A` (a type not
    /// depending on `x`) and `a : A` drawn from the context. `B[a/x]`
    /// must still check against some universe.
    #[test]
    fn substitution_preserves_well_typedness(n in 0u32..10) {
        let mut checker = Checker::new();
        checker.context_extend("A", Term::universe(n));
        checker.context_extend("a", Term::var("A"));
        let b = Term::var("A");
        let substituted = mltt::subst(&b, "x".into(), &Term::var("a"));
        // B[a/x] must itself still be a type, i.e. its inferred type must
        // normalize to a universe.
        let ty_of_substituted = checker.infer(&substituted).unwrap();
        let normalizer = Normalizer::new();
        prop_assert!(normalizer.normalize(&ty_of_substituted).as_universe_level().is_some());
    }

    /// Property 9: a lambda's type is never inferable, only checkable.
    #[test]
    fn lambda_is_never_inferable(t in term_strategy()) {
        let lam = Term::lam("x", Term::universe(0), t);
        let checker = Checker::new();
        let needs_annotation = matches!(checker.infer(&lam), Err(TypeError::NeedsAnnotation { .. }));
        prop_assert!(needs_annotation);
    }
}
