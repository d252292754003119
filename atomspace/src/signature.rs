//! Structural signatures for atoms
//!
//! A signature is a SHA-256 digest over a tagged, length-delimited encoding
//! of an atom's structure. Link signatures are computed from the signatures
//! of their children, so they never walk the whole subtree. Equal atoms
//! always have equal signatures, independent of which store holds them.

use crate::atom::Handle;
use crate::types::AtomType;
use sha2::{Digest, Sha256};
use std::fmt;

/// 32-byte structural digest of an atom
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature([u8; 32]);

impl Signature {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First 8 hex characters
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }

    pub fn of_node(atom_type: &AtomType, name: &str) -> Self {
        let mut hasher = SignatureHasher::new();
        hasher.write_u8(b'N');
        hasher.write_string(atom_type.name());
        hasher.write_string(name);
        hasher.finalize()
    }

    pub fn of_link(atom_type: &AtomType, outgoing: &[Handle]) -> Self {
        let mut hasher = SignatureHasher::new();
        hasher.write_u8(b'L');
        hasher.write_string(atom_type.name());
        hasher.write_u64(outgoing.len() as u64);
        for child in outgoing {
            hasher.write_bytes(child.signature().as_bytes());
        }
        hasher.finalize()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.short())
    }
}

struct SignatureHasher {
    hasher: Sha256,
}

impl SignatureHasher {
    fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    fn finalize(self) -> Signature {
        Signature(self.hasher.finalize().into())
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    fn write_u8(&mut self, byte: u8) {
        self.hasher.update([byte]);
    }

    fn write_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    // Length prefix keeps names containing NUL unambiguous
    fn write_string(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use std::sync::Arc;

    #[test]
    fn test_signature_consistency() {
        let concept = AtomType::node("ConceptNode");
        assert_eq!(
            Signature::of_node(&concept, "cat"),
            Signature::of_node(&concept, "cat")
        );
        assert_ne!(
            Signature::of_node(&concept, "cat"),
            Signature::of_node(&concept, "dog")
        );
        assert_ne!(
            Signature::of_node(&concept, "cat"),
            Signature::of_node(&AtomType::node("PredicateNode"), "cat")
        );
    }

    #[test]
    fn test_node_and_link_never_collide_on_layout() {
        let child = Arc::new(Atom::node(AtomType::node("ConceptNode"), "a").unwrap());
        let link = Signature::of_link(&AtomType::link("ListLink"), &[child]);
        let node = Signature::of_node(&AtomType::node("ListLink"), "a");
        assert_ne!(link, node);
    }

    #[test]
    fn test_short_signature() {
        let signature = Signature::of_node(&AtomType::node("ConceptNode"), "x");
        assert_eq!(signature.short().len(), 8);
        assert!(signature.to_hex().starts_with(&signature.short()));
        assert_eq!(signature.to_hex().len(), 64);
    }
}
