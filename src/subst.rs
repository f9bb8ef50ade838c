/*! Capture-avoiding substitution on syntax.

`subst(term, x, v)` computes `term[x := v]`: the term obtained from `term`
by replacing every free occurrence of `x` with `v`. This is a purely
syntactic operation on [`crate::term::Term`] — unlike [`crate::eval`], which
sidesteps substitution entirely by carrying a [`crate::env::Env`] of already
-evaluated values, `subst` is what the checker reaches for when it needs to
specialize a `Pi`'s codomain to a concrete argument (see
[`crate::check::Checker::infer`]'s `App` rule) without first evaluating
anything.

A substitution that walks under a binder without checking whether the
binder's name is free in `v` can capture: naively substituting `a` for `x`
in `λy. x` when `v` happens to be `y` would turn a term that mentions the
context's `y` into one that (incorrectly) binds it. This implementation
renames the binder to a fresh name whenever that would happen, which is the
fix for exactly that bug.
*/

use ustr::Ustr;

use crate::term::{Term, TermData};

/// Computes `term[x := v]`, renaming bound names in `term` as needed to
/// avoid capturing a free variable of `v`.
pub fn subst(term: &Term, x: Ustr, v: &Term) -> Term {
    match &**term {
        TermData::Var(y) => {
            if *y == x {
                v.clone()
            } else {
                term.clone()
            }
        }
        TermData::Universe(_) => term.clone(),
        TermData::Pi(y, domain, codomain) => {
            let domain = subst(domain, x, v);
            let (y, codomain) = subst_under_binder(codomain, *y, x, v);
            Term::pi(y, domain, codomain)
        }
        TermData::Lam(y, domain, body) => {
            let domain = subst(domain, x, v);
            let (y, body) = subst_under_binder(body, *y, x, v);
            Term::lam(y, domain, body)
        }
        TermData::App(f, a) => Term::app(subst(f, x, v), subst(a, x, v)),
    }
}

/// Substitutes `x := v` inside `body`, where `body` sits under a binder
/// named `binder`. Returns the binder name the caller must reconstruct
/// its `Pi`/`Lam` with — `binder` itself, unless it had to be renamed to
/// avoid capture — together with the substituted body. Handles the three
/// cases: the binder shadows `x` (nothing to do inside `body`), the
/// binder would capture a free variable of `v` (rename it first), or
/// neither (recurse as usual).
fn subst_under_binder(body: &Term, binder: Ustr, x: Ustr, v: &Term) -> (Ustr, Term) {
    if binder == x {
        return (binder, body.clone());
    }
    if v.free_vars().contains(&binder) {
        let mut avoid = body.free_vars();
        avoid.extend(v.free_vars());
        avoid.insert(x);
        let fresh = fresh_name(binder, &avoid);
        let renamed = subst(body, binder, &Term::var(fresh));
        (fresh, subst(&renamed, x, v))
    } else {
        (binder, subst(body, x, v))
    }
}

/// Mints a name derived from `base` that does not occur in `avoid`, by
/// appending primes until it is unused.
fn fresh_name(base: Ustr, avoid: &indexmap::IndexSet<Ustr>) -> Ustr {
    let mut candidate = base.to_string();
    while avoid.contains(&Ustr::from(candidate.as_str())) {
        candidate.push('\'');
    }
    Ustr::from(candidate.as_str())
}
