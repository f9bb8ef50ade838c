//! The evaluation environment ρ: an ordered association of names to the
//! values they currently denote.

use crate::scope::Scope;
use crate::value::Value;

/// ρ, the environment used by [`crate::eval::Evaluator::eval`].
///
/// Same value semantics as [`crate::context::Context`]: extending an
/// environment never mutates the parent. See [`crate::scope::Scope`].
pub type Env = Scope<Value>;

impl Env {
    /// The empty environment.
    pub fn new() -> Self {
        Self::empty()
    }
}
