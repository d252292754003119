//! The AtomSpace: a deduplicating, content-addressed atom store
//!
//! Atoms are keyed by their [`Signature`]. Interning an atom that is
//! already present returns the existing canonical instance, so each
//! distinct structure exists at most once per store. Links only ever point
//! at canonical members of the same store: children coming from another
//! store (or never stored at all) are copied in before the link itself.

use crate::atom::{Atom, Handle};
use crate::error::Result;
use crate::order::sort_canonical;
use crate::signature::Signature;
use crate::types::TypeRegistry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Default)]
struct AtomTable {
    atoms: HashMap<Signature, Handle>,
    /// child signature -> signatures of the links containing it
    incoming: HashMap<Signature, HashSet<Signature>>,
}

impl AtomTable {
    fn intern(&mut self, atom: Handle) -> Handle {
        if let Some(existing) = self.atoms.get(atom.signature()) {
            assert!(
                **existing == *atom,
                "signature collision between {} and {}",
                existing,
                atom
            );
            return existing.clone();
        }

        let atom = if atom.is_link() {
            self.adopt_outgoing(atom)
        } else {
            atom
        };

        let signature = *atom.signature();
        for child in atom.outgoing() {
            self.incoming
                .entry(*child.signature())
                .or_default()
                .insert(signature);
        }
        self.atoms.insert(signature, atom.clone());
        atom
    }

    /// Rebuild `link` over this table's canonical children, copying in any
    /// child that is missing. Returns `link` unchanged when every child is
    /// already the canonical instance.
    fn adopt_outgoing(&mut self, link: Handle) -> Handle {
        let mut rebuilt: Option<Vec<Handle>> = None;
        for (index, child) in link.outgoing().iter().enumerate() {
            let canonical = match self.atoms.get(child.signature()) {
                Some(existing) if Arc::ptr_eq(existing, child) => continue,
                Some(existing) => existing.clone(),
                None => self.intern(child.clone()),
            };
            if Arc::ptr_eq(&canonical, child) {
                continue;
            }
            rebuilt.get_or_insert_with(|| link.outgoing().to_vec())[index] = canonical;
        }
        match rebuilt {
            Some(outgoing) => Arc::new(link.with_outgoing(outgoing)),
            None => link,
        }
    }

    fn incoming_of(&self, signature: &Signature) -> Vec<Handle> {
        self.incoming
            .get(signature)
            .map(|parents| {
                parents
                    .iter()
                    .filter_map(|parent| self.atoms.get(parent).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn extract(&mut self, atom: &Handle, recursive: bool) -> bool {
        let signature = *atom.signature();
        let parents = self.incoming_of(&signature);
        if !parents.is_empty() {
            if !recursive {
                return false;
            }
            for parent in &parents {
                self.extract(parent, true);
            }
        }

        self.atoms.remove(&signature);
        self.incoming.remove(&signature);
        for child in atom.outgoing() {
            if let Some(parents) = self.incoming.get_mut(child.signature()) {
                parents.remove(&signature);
                if parents.is_empty() {
                    self.incoming.remove(child.signature());
                }
            }
        }
        true
    }
}

/// In-memory atom store
pub struct AtomSpace {
    id: Uuid,
    name: Option<String>,
    types: Arc<TypeRegistry>,
    table: RwLock<AtomTable>,
}

impl Default for AtomSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl AtomSpace {
    /// An empty store using the built-in type registry
    pub fn new() -> Self {
        Self::with_types(Arc::new(TypeRegistry::builtin()))
    }

    /// An empty store resolving type names through `types`
    pub fn with_types(types: Arc<TypeRegistry>) -> Self {
        let space = AtomSpace {
            id: Uuid::new_v4(),
            name: None,
            types,
            table: RwLock::new(AtomTable::default()),
        };
        debug!(space = %space.id, "Created atomspace");
        space
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn shared_types(&self) -> Arc<TypeRegistry> {
        self.types.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, AtomTable> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AtomTable> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the canonical instance of `atom`, inserting it if needed.
    ///
    /// Children that are not canonical members of this store are copied in
    /// first, so the result never references atoms owned elsewhere. The
    /// lookup and the insert happen under one write lock.
    pub fn intern(&self, atom: impl Into<Handle>) -> Handle {
        self.write().intern(atom.into())
    }

    /// Alias of [`intern`](Self::intern)
    pub fn add_atom(&self, atom: impl Into<Handle>) -> Handle {
        self.intern(atom)
    }

    /// Resolve `type_name` and intern the node
    pub fn add_node(&self, type_name: &str, name: impl Into<String>) -> Result<Handle> {
        let atom_type = self.types.get(type_name)?.atom_type().clone();
        Ok(self.intern(Atom::node(atom_type, name)?))
    }

    /// Resolve `type_name` and intern the link
    pub fn add_link(&self, type_name: &str, outgoing: Vec<Handle>) -> Result<Handle> {
        let atom_type = self.types.get(type_name)?.atom_type().clone();
        Ok(self.intern(Atom::link(atom_type, outgoing)?))
    }

    /// Canonical instance structurally equal to `atom`, if present
    pub fn get_atom(&self, atom: &Atom) -> Option<Handle> {
        self.read().atoms.get(atom.signature()).cloned()
    }

    pub fn get_node(&self, type_name: &str, name: &str) -> Option<Handle> {
        let atom_type = self.types.resolve(type_name)?.atom_type().clone();
        let probe = Atom::node(atom_type, name).ok()?;
        self.get_atom(&probe)
    }

    pub fn get_link(&self, type_name: &str, outgoing: Vec<Handle>) -> Option<Handle> {
        let atom_type = self.types.resolve(type_name)?.atom_type().clone();
        let probe = Atom::link(atom_type, outgoing).ok()?;
        self.get_atom(&probe)
    }

    pub fn contains(&self, atom: &Atom) -> bool {
        self.read().atoms.contains_key(atom.signature())
    }

    /// Number of distinct canonical atoms, children included
    pub fn count(&self) -> usize {
        self.read().atoms.len()
    }

    pub fn len(&self) -> usize {
        self.count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// All canonical atoms in no particular order
    pub fn enumerate(&self) -> Vec<Handle> {
        self.read().atoms.values().cloned().collect()
    }

    /// All canonical atoms in canonical order
    pub fn sorted_atoms(&self) -> Vec<Handle> {
        let mut atoms = self.enumerate();
        sort_canonical(&mut atoms);
        atoms
    }

    /// Atoms with an empty incoming set, in canonical order
    pub fn roots(&self) -> Vec<Handle> {
        let table = self.read();
        let mut roots: Vec<Handle> = table
            .atoms
            .iter()
            .filter(|(signature, _)| {
                table
                    .incoming
                    .get(*signature)
                    .map_or(true, |parents| parents.is_empty())
            })
            .map(|(_, atom)| atom.clone())
            .collect();
        drop(table);
        sort_canonical(&mut roots);
        roots
    }

    /// Atoms of the given type, optionally including its subtypes
    pub fn atoms_by_type(&self, type_name: &str, include_subtypes: bool) -> Result<Vec<Handle>> {
        let info = self.types.get(type_name)?;
        let wanted = info.name();
        let mut atoms: Vec<Handle> = self
            .read()
            .atoms
            .values()
            .filter(|atom| {
                if include_subtypes {
                    self.types.is_a(atom.type_name(), wanted)
                } else {
                    atom.type_name() == wanted
                }
            })
            .cloned()
            .collect();
        sort_canonical(&mut atoms);
        Ok(atoms)
    }

    /// Links in this store that contain `atom`, in canonical order
    pub fn incoming_set(&self, atom: &Atom) -> Vec<Handle> {
        let mut incoming = self.read().incoming_of(atom.signature());
        sort_canonical(&mut incoming);
        incoming
    }

    /// Links of exactly `type_name` that contain `atom`
    pub fn incoming_by_type(&self, atom: &Atom, type_name: &str) -> Result<Vec<Handle>> {
        let wanted = self.types.get(type_name)?.name().to_string();
        Ok(self
            .incoming_set(atom)
            .into_iter()
            .filter(|link| link.type_name() == wanted)
            .collect())
    }

    /// Remove `atom` from the store.
    ///
    /// Without `recursive`, an atom that is still referenced by a link is
    /// left in place and `false` is returned. With `recursive`, the links
    /// pointing at it are removed first. Children of removed links stay in
    /// the store. Removing an atom that is not present succeeds.
    pub fn extract(&self, atom: &Atom, recursive: bool) -> bool {
        let mut table = self.write();
        let Some(canonical) = table.atoms.get(atom.signature()).cloned() else {
            return true;
        };
        let removed = table.extract(&canonical, recursive);
        if !removed {
            warn!(space = %self.id, atom = %canonical, "Refusing to extract atom with non-empty incoming set");
        }
        removed
    }

    /// Release every atom
    pub fn clear(&self) {
        let mut table = self.write();
        let released = table.atoms.len();
        table.atoms.clear();
        table.incoming.clear();
        debug!(space = %self.id, released, "Cleared atomspace");
    }
}

impl fmt::Debug for AtomSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomSpace")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("count", &self.count())
            .finish()
    }
}
