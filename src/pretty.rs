//! Helper functions for writing the `Display` impls in [`crate::term`].
//!
//! A thin wrapper around [`pretty::RcDoc`] with a shorter name and an
//! `Add` impl so docs can be concatenated with `+`, matching the canonical
//! spellings pinned by the crate's external interface (`Π(x : A).B`,
//! `λ(x : A).t`, `f a`).

use pretty::RcDoc;
use std::{borrow::Cow, fmt, ops};

/// A wrapper around `RcDoc` with a shorter name.
#[derive(Clone)]
pub struct D<'a>(RcDoc<'a, ()>);

impl<'a> ops::Add for D<'a> {
    type Output = D<'a>;

    fn add(self, rhs: Self) -> Self::Output {
        D(self.0.append(rhs.0))
    }
}

/// Creates a text doc.
pub fn t<'a, U: Into<Cow<'a, str>>>(data: U) -> D<'a> {
    D(RcDoc::text(data))
}

/// Creates a binary operator doc: `left op right`, with no separating
/// space when `op` is empty (used for application, `f a`).
pub fn binop<'a>(op: &'a str, left: D<'a>, right: D<'a>) -> D<'a> {
    if op.is_empty() {
        left + t(" ") + right
    } else {
        left + t(format!(" {op} ")) + right
    }
}

/// Creates the doc for `Π(binder : domain).codomain`.
pub fn pi_doc<'a>(binder: String, domain: D<'a>, codomain: D<'a>) -> D<'a> {
    t(format!("Π({binder} : ")) + domain + t(").") + codomain
}

/// Creates the doc for `λ(binder : domain).body`.
pub fn lam_doc<'a>(binder: String, domain: D<'a>, body: D<'a>) -> D<'a> {
    t(format!("λ({binder} : ")) + domain + t(").") + body
}

impl<'a> D<'a> {
    /// Surrounds this document with parentheses.
    pub fn parens(self) -> D<'a> {
        t("(") + self + t(")")
    }

    /// Renders the document to a single-line string.
    ///
    /// Terms in this theory are small enough that line-width-sensitive
    /// layout (as used elsewhere in this codebase's pretty-printers) is not
    /// needed; a width of infinity-ish keeps everything on one line.
    pub fn pretty(&self) -> impl fmt::Display + use<'_, 'a> {
        self.0.pretty(usize::MAX)
    }
}
