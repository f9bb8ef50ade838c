/*! A cheaply cloneable, insertion-ordered association from name to value.

This backs both [`crate::context::Context`] (name → declared type) and
[`crate::env::Env`] (name → value). The two need the same value semantics —
non-destructive extension, most-recent-binding-wins lookup — so they share
one implementation rather than duplicating it, the way this codebase
factors its other small generic containers (e.g. a insertion-ordered
field map) out from the specific syntax trees that use them.

Extension is copy-on-write via [`Rc::make_mut`]: if no other [`Scope`] is
sharing the backing store, `extend` mutates it in place; if one is, it
clones first. Either way, the caller holding the original `Scope` never
observes the mutation — extending a context can never reach back and
mutate its parent.
*/

use std::rc::Rc;

use ustr::Ustr;

/// An ordered, non-destructively extensible association from [`Ustr`] to
/// `T`. See the module documentation for the sharing discipline.
#[derive(Clone, Debug)]
pub struct Scope<T>(Rc<Vec<(Ustr, T)>>);

impl<T> Scope<T> {
    /// The empty scope.
    pub fn empty() -> Self {
        Scope(Rc::new(Vec::new()))
    }

    /// Looks up `name`, returning the *most recently inserted* binding for
    /// it, if any. Earlier bindings of the same name are shadowed but not
    /// removed (see [`Scope::iter`]).
    pub fn lookup(&self, name: Ustr) -> Option<&T> {
        self.0.iter().rev().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Whether `name` has any binding in scope.
    pub fn has(&self, name: Ustr) -> bool {
        self.lookup(name).is_some()
    }

    /// Iterates over all bindings in insertion order, including bindings
    /// that have since been shadowed by a later `extend` of the same name.
    pub fn iter(&self) -> impl Iterator<Item = &(Ustr, T)> {
        self.0.iter()
    }

    /// The number of bindings, counting shadowed ones.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this scope has no bindings at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Clone> Scope<T> {
    /// Returns a new scope with `name` bound to `val`, on top of whatever
    /// was already in `self`. Does not mutate `self`.
    pub fn extend(mut self, name: Ustr, val: T) -> Self {
        Rc::make_mut(&mut self.0).push((name, val));
        self
    }
}

impl<T: PartialEq> PartialEq for Scope<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl<T: Eq> Eq for Scope<T> {}

impl<T> Default for Scope<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_does_not_mutate_parent() {
        let base: Scope<i32> = Scope::empty().extend(Ustr::from("x"), 1);
        let extended = base.clone().extend(Ustr::from("y"), 2);
        assert!(base.has(Ustr::from("x")));
        assert!(!base.has(Ustr::from("y")));
        assert!(extended.has(Ustr::from("x")));
        assert!(extended.has(Ustr::from("y")));
    }

    #[test]
    fn shadowing_keeps_both_bindings_but_lookup_finds_the_newest() {
        let scope: Scope<i32> =
            Scope::empty().extend(Ustr::from("x"), 1).extend(Ustr::from("x"), 2);
        assert_eq!(scope.lookup(Ustr::from("x")), Some(&2));
        assert_eq!(scope.len(), 2);
    }
}
