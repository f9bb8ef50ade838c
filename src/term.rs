/*! Syntax of terms.

A [`Term`] is one of exactly five shapes: a variable, a universe, a dependent
function type (Π), a dependent function (λ), or an application. There is no
sixth constructor and there never will be one — the type checker in
[`crate::check`] is written as an exhaustive match over [`TermData`], so
adding a constructor here is a breaking change to every consumer, not an
extension point.

Terms are reference-counted so that sharing a subterm across many contexts
(for instance, the domain type `A` of a `Pi` is also installed, unmodified,
as the type of the bound variable in the context used to check the
codomain) is a pointer copy rather than a deep clone.
*/

use std::fmt;
use std::rc::Rc;

use ustr::Ustr;

use crate::pretty::{D, binop, lam_doc, pi_doc, t};

/// The inner, matchable representation of a [`Term`].
///
/// Pattern-match on `&*term` (or use the [`std::ops::Deref`] impl on
/// [`Term`] directly) to get at this.
#[derive(Debug, PartialEq, Eq)]
pub enum TermData {
    /// A reference to a name bound in the context or by an enclosing binder.
    Var(Ustr),
    /// `Type_n`, for `n` a non-negative integer with no cumulativity.
    Universe(u32),
    /// `Pi(x, A, B)`: the type of functions taking `x : A` to a `B` that may
    /// mention `x`. `x` is bound in `B` only, not in `A`.
    Pi(Ustr, Term, Term),
    /// `Lam(x, A, t)`: the function taking `x : A` to `t`. `x` is bound in
    /// `t` only. The domain annotation `A` is mandatory; there is no way to
    /// construct an unannotated lambda in this syntax.
    Lam(Ustr, Term, Term),
    /// `App(f, a)`: the application of `f` to `a`.
    App(Term, Term),
}

/// Terms of the theory: variables, universes, dependent function types and
/// functions, and application. See [`TermData`] for the five shapes.
///
/// Cloning a `Term` is a reference count bump, not a deep copy. Equality is
/// syntactic (structural), *not* α-equivalence — see
/// [`crate::normalize::Normalizer::is_equal`] for the latter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term(Rc<TermData>);

impl std::ops::Deref for Term {
    type Target = TermData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Term {
    /// Smart constructor for [`Term`], [`TermData::Var`] case.
    pub fn var(name: impl Into<Ustr>) -> Self {
        Term(Rc::new(TermData::Var(name.into())))
    }

    /// Smart constructor for [`Term`], [`TermData::Universe`] case.
    pub fn universe(level: u32) -> Self {
        Term(Rc::new(TermData::Universe(level)))
    }

    /// Smart constructor for [`Term`], [`TermData::Pi`] case.
    pub fn pi(binder: impl Into<Ustr>, domain: Term, codomain: Term) -> Self {
        Term(Rc::new(TermData::Pi(binder.into(), domain, codomain)))
    }

    /// Smart constructor for [`Term`], [`TermData::Lam`] case.
    pub fn lam(binder: impl Into<Ustr>, domain: Term, body: Term) -> Self {
        Term(Rc::new(TermData::Lam(binder.into(), domain, body)))
    }

    /// Smart constructor for [`Term`], [`TermData::App`] case.
    pub fn app(function: Term, argument: Term) -> Self {
        Term(Rc::new(TermData::App(function, argument)))
    }

    /// Collects the set of names that occur free (not under a binder for
    /// that name) in this term, in order of first occurrence.
    ///
    /// Used by [`crate::subst::subst`] to decide whether a binder must be
    /// α-renamed to avoid capturing a substituted value.
    pub fn free_vars(&self) -> indexmap::IndexSet<Ustr> {
        let mut seen = indexmap::IndexSet::new();
        self.collect_free_vars(&mut seen);
        seen
    }

    fn collect_free_vars(&self, seen: &mut indexmap::IndexSet<Ustr>) {
        match &**self {
            TermData::Var(x) => {
                seen.insert(*x);
            }
            TermData::Universe(_) => {}
            TermData::Pi(x, domain, codomain) => {
                domain.collect_free_vars(seen);
                collect_free_vars_under_binder(codomain, *x, seen);
            }
            TermData::Lam(x, domain, body) => {
                domain.collect_free_vars(seen);
                collect_free_vars_under_binder(body, *x, seen);
            }
            TermData::App(f, a) => {
                f.collect_free_vars(seen);
                a.collect_free_vars(seen);
            }
        }
    }

    fn to_doc(&self) -> D<'static> {
        match &**self {
            TermData::Var(x) => t(x.to_string()),
            TermData::Universe(n) => t(format!("Type_{n}")),
            TermData::Pi(x, a, b) => pi_doc(x.to_string(), a.to_doc(), b.to_doc()),
            TermData::Lam(x, a, t_) => lam_doc(x.to_string(), a.to_doc(), t_.to_doc()),
            TermData::App(f, a) => {
                let f_doc = match &**f {
                    TermData::Lam(..) => f.to_doc().parens(),
                    _ => f.to_doc(),
                };
                let a_doc = match &**a {
                    TermData::App(..) | TermData::Lam(..) | TermData::Pi(..) => a.to_doc().parens(),
                    _ => a.to_doc(),
                };
                binop("", f_doc, a_doc)
            }
        }
    }
}

/// Free variables of `term`, excluding `binder`, merged into `seen`.
///
/// A variable bound by `binder` shadows any occurrence of the same name
/// further out, so it is never free in `term` as seen from the enclosing
/// scope — even though the recursive call into `term` may otherwise find it.
fn collect_free_vars_under_binder(term: &Term, binder: Ustr, seen: &mut indexmap::IndexSet<Ustr>) {
    let inner = term.free_vars();
    seen.extend(inner.into_iter().filter(|name| *name != binder));
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_doc().pretty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms_match_canonical_spelling() {
        assert_eq!(Term::universe(0).to_string(), "Type_0");
        assert_eq!(Term::var("x").to_string(), "x");
        assert_eq!(
            Term::pi("x", Term::universe(0), Term::var("x")).to_string(),
            "Π(x : Type_0).x"
        );
        assert_eq!(
            Term::lam("x", Term::universe(0), Term::var("x")).to_string(),
            "λ(x : Type_0).x"
        );
        assert_eq!(Term::app(Term::var("f"), Term::var("a")).to_string(), "f a");
    }

    #[test]
    fn app_of_lambda_head_is_parenthesized() {
        let lam = Term::lam("x", Term::universe(0), Term::var("x"));
        let applied = Term::app(lam, Term::var("a"));
        assert_eq!(applied.to_string(), "(λ(x : Type_0).x) a");
    }

    #[test]
    fn free_vars_respects_binders() {
        let t = Term::lam("x", Term::universe(0), Term::app(Term::var("x"), Term::var("y")));
        let free = t.free_vars();
        assert!(!free.contains(&Ustr::from("x")));
        assert!(free.contains(&Ustr::from("y")));
    }

    #[test]
    fn free_vars_of_pi_excludes_binder_from_codomain_only() {
        let t = Term::pi("x", Term::var("x"), Term::var("x"));
        let free = t.free_vars();
        // `x` occurs free in the domain position even though it is the binder name.
        assert!(free.contains(&Ustr::from("x")));
    }

    #[test]
    fn structural_equality_is_not_alpha_equivalence() {
        let a = Term::lam("x", Term::universe(0), Term::var("x"));
        let b = Term::lam("y", Term::universe(0), Term::var("y"));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
