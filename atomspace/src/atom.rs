//! Atom model: typed nodes and links
//!
//! Atoms are immutable values shared through [`Handle`]s. A node is a type
//! plus a name; a link is a type plus an ordered outgoing set of child
//! atoms. Equality is structural, and every atom caches its [`Signature`]
//! so that lookups in a store never have to walk the tree.

use crate::error::{AtomSpaceError, Result};
use crate::order::canonical_cmp;
use crate::printer::AtomPrinter;
use crate::signature::Signature;
use crate::types::{AtomKind, AtomType};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Shared reference to an atom
pub type Handle = Arc<Atom>;

#[derive(Clone)]
pub struct Atom {
    atom_type: AtomType,
    body: AtomBody,
    signature: Signature,
}

#[derive(Clone)]
enum AtomBody {
    Node(String),
    Link(Vec<Handle>),
}

impl Atom {
    /// Create a node. Fails if `atom_type` is a link type.
    pub fn node(atom_type: AtomType, name: impl Into<String>) -> Result<Self> {
        if !atom_type.is_node() {
            return Err(AtomSpaceError::kind_mismatch(
                atom_type.name(),
                atom_type.kind(),
                AtomKind::Node,
            ));
        }
        let name = name.into();
        let signature = Signature::of_node(&atom_type, &name);
        Ok(Atom {
            atom_type,
            body: AtomBody::Node(name),
            signature,
        })
    }

    /// Create a link. Fails if `atom_type` is a node type. Unordered link
    /// types sort their outgoing set into canonical order.
    pub fn link(atom_type: AtomType, mut outgoing: Vec<Handle>) -> Result<Self> {
        if !atom_type.is_link() {
            return Err(AtomSpaceError::kind_mismatch(
                atom_type.name(),
                atom_type.kind(),
                AtomKind::Link,
            ));
        }
        if atom_type.is_unordered() {
            outgoing.sort_by(|a, b| canonical_cmp(a, b));
        }
        let signature = Signature::of_link(&atom_type, &outgoing);
        Ok(Atom {
            atom_type,
            body: AtomBody::Link(outgoing),
            signature,
        })
    }

    /// Same link over a structurally equal outgoing set (e.g. the store's
    /// canonical copies of the children).
    pub(crate) fn with_outgoing(&self, outgoing: Vec<Handle>) -> Atom {
        debug_assert_eq!(outgoing.len(), self.arity());
        Atom {
            atom_type: self.atom_type.clone(),
            body: AtomBody::Link(outgoing),
            signature: self.signature,
        }
    }

    pub fn atom_type(&self) -> &AtomType {
        &self.atom_type
    }

    pub fn type_name(&self) -> &str {
        self.atom_type.name()
    }

    pub fn kind(&self) -> AtomKind {
        self.atom_type.kind()
    }

    pub fn is_node(&self) -> bool {
        matches!(self.body, AtomBody::Node(_))
    }

    pub fn is_link(&self) -> bool {
        matches!(self.body, AtomBody::Link(_))
    }

    /// Node name, `None` for links
    pub fn name(&self) -> Option<&str> {
        match &self.body {
            AtomBody::Node(name) => Some(name),
            AtomBody::Link(_) => None,
        }
    }

    /// Outgoing set; empty for nodes
    pub fn outgoing(&self) -> &[Handle] {
        match &self.body {
            AtomBody::Node(_) => &[],
            AtomBody::Link(outgoing) => outgoing,
        }
    }

    pub fn arity(&self) -> usize {
        self.outgoing().len()
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Number of atoms in this tree, counting shared children once per use
    pub fn size(&self) -> usize {
        1 + self.outgoing().iter().map(|child| child.size()).sum::<usize>()
    }

    /// Convert to a pretty-printed string with indentation
    pub fn to_pretty_string(&self, indent: usize) -> String {
        AtomPrinter::pretty(indent).print(self)
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        if self.signature != other.signature || self.atom_type != other.atom_type {
            return false;
        }
        match (&self.body, &other.body) {
            (AtomBody::Node(a), AtomBody::Node(b)) => a == b,
            (AtomBody::Link(a), AtomBody::Link(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|(x, y)| Arc::ptr_eq(x, y) || x == y)
            }
            _ => false,
        }
    }
}

impl Eq for Atom {}

impl Hash for Atom {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(self.signature.as_bytes());
    }
}

impl PartialOrd for Atom {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Atom {
    fn cmp(&self, other: &Self) -> Ordering {
        canonical_cmp(self, other)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", AtomPrinter::compact().print(self))
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atom({})", self)
    }
}
