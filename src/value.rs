/*! Semantic values produced by the [`crate::eval::Evaluator`].

Where [`crate::term::Term`] is syntax, [`Value`] is the domain that
normalization-by-evaluation computes in. The two domains look similar —
both have a universe and a variable case — but values additionally have a
[`ValueData::Closure`] (an unevaluated body paired with the environment to
evaluate it in) and a [`ValueData::Neutral`] (a stuck computation: a head
that cannot reduce further, applied to a spine of already-evaluated
arguments).

There is deliberately no `Pi` value constructor. A `Pi` term evaluates to a
neutral whose head is the `Pi` term itself (see
[`crate::eval::Evaluator::eval`]); this keeps the value domain to exactly
four shapes instead of five, at the cost of neutrals needing to carry
arbitrary terms as heads, not just variables.
*/

use std::rc::Rc;

use ustr::Ustr;

use crate::env::Env;
use crate::term::Term;

/// The inner, matchable representation of a [`Value`].
pub enum ValueData {
    /// `Type_n`.
    Universe(u32),
    /// A free variable with no arguments applied to it yet. Distinct from
    /// [`ValueData::Neutral`] so that a bare variable doesn't need to
    /// allocate an empty argument spine.
    Var(Ustr),
    /// An unevaluated λ, kept as its domain annotation and body together
    /// with the environment it closes over. The domain is carried
    /// unevaluated purely so that [`crate::normalize::Normalizer::reify`]
    /// can reconstruct a faithful `Lam` annotation; it plays no role in
    /// evaluation or in [`crate::normalize::Normalizer::is_equal`].
    Closure(Env, Ustr, Term, Term),
    /// A stuck application: a rigid `head_term` (a bare variable, or a
    /// `Pi` term standing for a normalized Pi type) applied to a flat
    /// spine of already-evaluated `args`. Applying a further argument to
    /// an existing `Neutral` appends to this spine rather than nesting —
    /// see [`crate::eval::Evaluator::eval`].
    Neutral(Term, Vec<Value>),
}

/// Values of the theory: universes, free variables, closures, and
/// neutrals. See [`ValueData`] for the four shapes.
///
/// Cloning a `Value` is a reference count bump. There is no `PartialEq`
/// impl: deciding whether two values are equal requires evaluating closure
/// bodies under a fresh variable, which needs access to the
/// [`crate::eval::Evaluator`] — see
/// [`crate::normalize::Normalizer::is_equal`].
#[derive(Clone)]
pub struct Value(Rc<ValueData>);

impl std::ops::Deref for Value {
    type Target = ValueData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Value {
    /// Smart constructor for [`Value`], [`ValueData::Universe`] case.
    pub fn universe(level: u32) -> Self {
        Value(Rc::new(ValueData::Universe(level)))
    }

    /// Smart constructor for [`Value`], [`ValueData::Var`] case.
    pub fn var(name: impl Into<Ustr>) -> Self {
        Value(Rc::new(ValueData::Var(name.into())))
    }

    /// Smart constructor for [`Value`], [`ValueData::Closure`] case.
    pub fn closure(env: Env, binder: Ustr, domain: Term, body: Term) -> Self {
        Value(Rc::new(ValueData::Closure(env, binder, domain, body)))
    }

    /// Smart constructor for [`Value`], [`ValueData::Neutral`] case.
    pub fn neutral(head_term: Term, args: Vec<Value>) -> Self {
        Value(Rc::new(ValueData::Neutral(head_term, args)))
    }

    /// If this value is a universe, its level.
    pub fn as_universe_level(&self) -> Option<u32> {
        match &*self.0 {
            ValueData::Universe(n) => Some(*n),
            _ => None,
        }
    }
}
