/*! Normalization-by-evaluation: the `Normalizer` drives [`crate::eval`] to
decide definitional equality and, optionally, to read values back out as
terms in normal form.

Deciding whether two values are equal never compares syntax directly —
`λx. x` and `λy. y` are the same value even though they are different
[`crate::term::Term`]s. Instead [`Normalizer::is_equal`] applies both sides
to the *same* fresh variable and compares the results, which is what makes
equality definitional rather than structural.
*/

use std::cell::Cell;

use ustr::Ustr;

use crate::env::Env;
use crate::eval::Evaluator;
use crate::term::Term;
use crate::value::{Value, ValueData};

/// Drives evaluation to decide definitional equality and to read values
/// back out as terms.
///
/// Like [`Evaluator`], a `Normalizer` carries no mutable state — the
/// `Cell` inside is purely a counter for minting syntactically-fresh names
/// during read-back and plays no role in any judgement.
#[derive(Default)]
pub struct Normalizer {
    evaluator: Evaluator,
    fresh_counter: Cell<u64>,
}

impl Normalizer {
    /// A fresh normalizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The evaluator this normalizer drives.
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Evaluates `term` to a value under the empty environment.
    pub fn normalize(&self, term: &Term) -> Value {
        self.evaluator.eval(term, &Env::new())
    }

    /// Mints a name derived from `base` that does not occur in `avoid`.
    pub fn fresh(&self, base: Ustr, avoid: &indexmap::IndexSet<Ustr>) -> Ustr {
        let mut candidate = base;
        while avoid.contains(&candidate) {
            let n = self.fresh_counter.get();
            self.fresh_counter.set(n + 1);
            candidate = Ustr::from(&format!("{base}_{n}"));
        }
        candidate
    }

    /// Reads a value back out as a term in normal form (quoting).
    ///
    /// A `Closure` is read back by applying it to a fresh free variable and
    /// reifying the result as the body of a `Lam`; the domain annotation is
    /// carried through unevaluated, since it plays no role in the value's
    /// identity.
    pub fn reify(&self, value: &Value) -> Term {
        match &**value {
            ValueData::Universe(n) => Term::universe(*n),
            ValueData::Var(x) => Term::var(*x),
            ValueData::Closure(env, x, domain, body) => {
                let fresh = self.fresh(*x, &body.free_vars());
                let extended = env.clone().extend(*x, Value::var(fresh));
                let applied = self.evaluator.eval(body, &extended);
                Term::lam(fresh, domain.clone(), self.reify(&applied))
            }
            ValueData::Neutral(head, args) => args
                .iter()
                .fold(head.clone(), |f, arg| Term::app(f, self.reify(arg))),
        }
    }

    /// Decides definitional equality of two values, per the rules:
    /// two universes are equal iff their levels match; two free variables
    /// are equal iff their names match; two closures are equal iff,
    /// applied to the same fresh variable, their bodies are equal; two
    /// neutrals are equal iff their heads are syntactically equal and
    /// their spines are pairwise equal; anything else is unequal,
    /// including two values built from different shapes.
    pub fn is_equal(&self, a: &Value, b: &Value) -> bool {
        match (&**a, &**b) {
            (ValueData::Universe(m), ValueData::Universe(n)) => m == n,
            (ValueData::Var(x), ValueData::Var(y)) => x == y,
            (ValueData::Closure(env_a, x_a, _, body_a), ValueData::Closure(env_b, x_b, _, body_b)) => {
                let avoid = body_a.free_vars().into_iter().chain(body_b.free_vars()).collect();
                let fresh = self.fresh(*x_a, &avoid);
                let va = self.evaluator.eval(body_a, &env_a.clone().extend(*x_a, Value::var(fresh)));
                let vb = self.evaluator.eval(body_b, &env_b.clone().extend(*x_b, Value::var(fresh)));
                self.is_equal(&va, &vb)
            }
            (ValueData::Neutral(head_a, args_a), ValueData::Neutral(head_b, args_b)) => {
                head_a == head_b
                    && args_a.len() == args_b.len()
                    && args_a.iter().zip(args_b).all(|(x, y)| self.is_equal(x, y))
            }
            _ => false,
        }
    }
}
