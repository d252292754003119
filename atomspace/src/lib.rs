//! In-memory hypergraph store for typed atoms
//!
//! Atoms are either nodes (a type and a name) or links (a type and an
//! ordered list of child atoms). An [`AtomSpace`] keeps one canonical
//! instance per distinct structure and tracks incoming sets so links can be
//! found from their children.

pub mod atom;
pub mod error;
pub mod global;
pub mod order;
pub mod printer;
pub mod signature;
pub mod store;
pub mod types;

pub use atom::{Atom, Handle};
pub use error::{AtomSpaceError, Result};
pub use order::{canonical_cmp, sort_canonical};
pub use printer::{
    escape_name, serialize_atom, serialize_store, write_store, AtomPrinter, DumpOptions,
    PrintConfig, PrintStyle,
};
pub use signature::Signature;
pub use store::AtomSpace;
pub use types::{is_type_name, AtomKind, AtomType, TypeInfo, TypeRegistry};
