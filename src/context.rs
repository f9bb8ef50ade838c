//! The typing context Γ: an ordered association of free-variable names to
//! their declared types.

use crate::scope::Scope;
use crate::term::Term;

/// Γ, the typing context used by [`crate::check::Checker`].
///
/// A `Context` maps names to the `Term` that is their declared type. See
/// [`crate::scope::Scope`] for the sharing and shadowing semantics.
pub type Context = Scope<Term>;

impl Context {
    /// The empty context.
    pub fn new() -> Self {
        Self::empty()
    }

    /// A human-readable rendering of the context, oldest binding first,
    /// e.g. `"A : Type_0, x : A"`. Shadowed bindings are included; this is
    /// for diagnostics only and has no bearing on any judgement.
    pub fn render(&self) -> String {
        self.iter()
            .map(|(name, ty)| format!("{name} : {ty}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
