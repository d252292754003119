//! Canonical total order over atoms
//!
//! Nodes sort before links; then by type name; then nodes by name and links
//! by their outgoing sets, compared element-wise with shorter prefixes
//! first. The order depends only on structure, never on insertion history
//! or addresses, which is what makes store dumps reproducible.

use crate::atom::{Atom, Handle};
use std::cmp::Ordering;
use std::ptr;

pub fn canonical_cmp(a: &Atom, b: &Atom) -> Ordering {
    if ptr::eq(a, b) {
        return Ordering::Equal;
    }
    a.kind()
        .cmp(&b.kind())
        .then_with(|| a.type_name().cmp(b.type_name()))
        .then_with(|| match (a.name(), b.name()) {
            (Some(x), Some(y)) => x.cmp(y),
            _ => cmp_outgoing(a.outgoing(), b.outgoing()),
        })
}

fn cmp_outgoing(a: &[Handle], b: &[Handle]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match canonical_cmp(x, y) {
            Ordering::Equal => continue,
            unequal => return unequal,
        }
    }
    a.len().cmp(&b.len())
}

/// Sort handles into canonical order in place
pub fn sort_canonical(atoms: &mut [Handle]) {
    atoms.sort_by(|a, b| canonical_cmp(a, b));
}
