/*! The evaluator: maps a term plus an environment to a value.

This is the `eval` half of normalization-by-evaluation. It performs
β-reduction eagerly whenever the head of an application is a closure, and
otherwise builds up a [`crate::value::ValueData::Neutral`] with a flat
argument spine: applying an already-stuck value never wraps it in another
layer of `Neutral`, it just appends the new argument to the existing one.
It never fails: every one of the five term shapes has a defined evaluation
rule, so a malformed [`crate::term::Term`] cannot exist (the enum is
exhaustively matched) and an open term (one with free variables not bound
in `env`) simply evaluates its `Var` case to a free
[`crate::value::Value::var`] rather than erroring.
*/

use crate::env::Env;
use crate::term::{Term, TermData};
use crate::value::{Value, ValueData};

/// Evaluates terms to values under an explicit environment.
///
/// `Evaluator` carries no state of its own — every method takes the
/// environment it needs as a parameter — so one instance may be shared
/// freely, including across threads.
#[derive(Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    /// Evaluates `term` under `env`, performing β-reduction wherever the
    /// head of an application is a closure.
    pub fn eval(&self, term: &Term, env: &Env) -> Value {
        match &**term {
            TermData::Var(x) => env.lookup(*x).cloned().unwrap_or_else(|| Value::var(*x)),
            TermData::Universe(n) => Value::universe(*n),
            TermData::Lam(x, domain, body) => {
                Value::closure(env.clone(), *x, domain.clone(), body.clone())
            }
            TermData::Pi(..) => Value::neutral(term.clone(), Vec::new()),
            TermData::App(f, a) => {
                let fv = self.eval(f, env);
                let av = self.eval(a, env);
                self.apply(fv, av)
            }
        }
    }

    /// Applies an already-evaluated function `fv` to an already-evaluated
    /// argument `av`. If `fv` is stuck, `av` is appended to its spine
    /// rather than `fv` being re-wrapped — a chain `f a b c` becomes one
    /// `Neutral` with a three-element spine, not three nested ones.
    fn apply(&self, fv: Value, av: Value) -> Value {
        match &*fv {
            ValueData::Closure(env, x, _domain, body) => {
                let extended = env.clone().extend(*x, av);
                self.eval(body, &extended)
            }
            ValueData::Var(x) => Value::neutral(Term::var(*x), vec![av]),
            ValueData::Neutral(head, args) => {
                let mut args = args.clone();
                args.push(av);
                Value::neutral(head.clone(), args)
            }
            ValueData::Universe(_) => {
                debug_assert!(false, "applying a Universe value; the type checker should reject this before evaluation");
                Value::neutral(Term::universe(0), vec![av])
            }
        }
    }
}
