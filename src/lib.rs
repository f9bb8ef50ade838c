/*! A type checker and evaluator for a predicative fragment of Martin-Löf
Type Theory with dependent function (Π) types.

The crate is organized around normalization-by-evaluation (NbE), the same
technique this codebase's other dependent-type-theory module uses: syntax
([`term::Term`]) is evaluated into a semantic domain ([`value::Value`]) by
[`eval::Evaluator`], and [`normalize::Normalizer`] drives that evaluator to
decide definitional equality and, optionally, to read values back out as
terms in normal form. [`check::Checker`] implements the bidirectional
`infer`/`check` judgements on top of all of the above, threading an
explicit, immutable [`context::Context`] rather than mutating and
restoring shared state.

There is exactly one universe hierarchy, predicative (no cumulativity),
and exactly five term constructors — variable, universe, Π, λ, application.
This crate has no parser, no pretty-printer beyond `Display`, and no REPL:
it is a core to be embedded by something that owns source syntax and
surface concerns.

```
use mltt::{Checker, Term};

let mut checker = Checker::new();
checker.context_extend("Nat", Term::universe(0));
// `Nat` was declared as an inhabitant of `Type_0`, so inferring its own
// type just looks up that declaration.
let ty = checker.infer(&Term::var("Nat")).unwrap();
assert_eq!(ty, Term::universe(0));
```
*/
#![warn(missing_docs)]

pub mod check;
pub mod context;
pub mod env;
pub mod eval;
pub mod normalize;
mod pretty;
pub mod scope;
pub mod subst;
pub mod term;
pub mod value;

pub use check::{Checker, TypeError};
pub use context::Context;
pub use env::Env;
pub use eval::Evaluator;
pub use normalize::Normalizer;
pub use scope::Scope;
pub use subst::subst;
pub use term::{Term, TermData};
pub use value::{Value, ValueData};
