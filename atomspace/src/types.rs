//! Atom types and the type registry
//!
//! Every atom carries an [`AtomType`]: a named tag that knows whether it
//! describes nodes or links. The [`TypeRegistry`] resolves type names,
//! including the short aliases (`Concept` for `ConceptNode`, `List` for
//! `ListLink`), and records the single-inheritance hierarchy rooted at
//! `Node` and `Link`.

use crate::error::{AtomSpaceError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Whether an atom is a leaf (node) or has an outgoing set (link)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtomKind {
    Node,
    Link,
}

impl fmt::Display for AtomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomKind::Node => write!(f, "node"),
            AtomKind::Link => write!(f, "link"),
        }
    }
}

/// A named atom type.
///
/// Two types are equal when they have the same name and kind. The
/// `unordered` flag is derived from the registry and does not take part in
/// comparisons.
#[derive(Debug, Clone)]
pub struct AtomType {
    name: Arc<str>,
    kind: AtomKind,
    unordered: bool,
}

impl AtomType {
    pub fn node(name: &str) -> Self {
        AtomType {
            name: Arc::from(name),
            kind: AtomKind::Node,
            unordered: false,
        }
    }

    pub fn link(name: &str) -> Self {
        AtomType {
            name: Arc::from(name),
            kind: AtomKind::Link,
            unordered: false,
        }
    }

    /// A link type whose outgoing set is kept in canonical order
    pub fn unordered_link(name: &str) -> Self {
        AtomType {
            unordered: true,
            ..AtomType::link(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AtomKind {
        self.kind
    }

    pub fn is_node(&self) -> bool {
        self.kind == AtomKind::Node
    }

    pub fn is_link(&self) -> bool {
        self.kind == AtomKind::Link
    }

    pub fn is_unordered(&self) -> bool {
        self.unordered
    }
}

impl PartialEq for AtomType {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.name == other.name
    }
}

impl Eq for AtomType {}

impl Hash for AtomType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.kind.hash(state);
    }
}

impl PartialOrd for AtomType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AtomType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name).then(self.kind.cmp(&other.kind))
    }
}

impl fmt::Display for AtomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Registry entry for one atom type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    atom_type: AtomType,
    parent: Option<Arc<str>>,
}

impl TypeInfo {
    pub fn atom_type(&self) -> &AtomType {
        &self.atom_type
    }

    pub fn name(&self) -> &str {
        self.atom_type.name()
    }

    pub fn kind(&self) -> AtomKind {
        self.atom_type.kind()
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

/// Built-in types as `(name, parent)`. Parents precede their children; the
/// kind and the unordered flag are inherited from the parent.
const BUILTIN_TYPES: &[(&str, &str)] = &[
    // Nodes
    ("ConceptNode", "Node"),
    ("PredicateNode", "Node"),
    ("SchemaNode", "Node"),
    ("GroundedSchemaNode", "SchemaNode"),
    ("GroundedPredicateNode", "PredicateNode"),
    ("NumberNode", "Node"),
    ("TypeNode", "Node"),
    ("VariableNode", "Node"),
    ("GlobNode", "Node"),
    ("AnchorNode", "Node"),
    // Ordered links
    ("OrderedLink", "Link"),
    ("ListLink", "OrderedLink"),
    ("EvaluationLink", "OrderedLink"),
    ("ExecutionLink", "OrderedLink"),
    ("InheritanceLink", "OrderedLink"),
    ("MemberLink", "OrderedLink"),
    ("SubsetLink", "OrderedLink"),
    ("ContextLink", "OrderedLink"),
    ("NotLink", "OrderedLink"),
    ("ImplicationLink", "OrderedLink"),
    ("VariableListLink", "OrderedLink"),
    ("TypedVariableLink", "OrderedLink"),
    ("LambdaLink", "OrderedLink"),
    ("BindLink", "LambdaLink"),
    ("GetLink", "LambdaLink"),
    ("PutLink", "OrderedLink"),
    ("StateLink", "OrderedLink"),
    ("DefineLink", "OrderedLink"),
    // Unordered links
    ("UnorderedLink", "Link"),
    ("SetLink", "UnorderedLink"),
    ("AndLink", "UnorderedLink"),
    ("OrLink", "UnorderedLink"),
    ("SimilarityLink", "UnorderedLink"),
];

/// Name server for atom types
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: HashMap<String, TypeInfo>,
    aliases: HashMap<String, String>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TypeRegistry {
    /// A registry holding only the `Node` and `Link` roots
    pub fn empty() -> Self {
        let mut registry = TypeRegistry {
            types: HashMap::new(),
            aliases: HashMap::new(),
        };
        registry.insert(AtomType::node("Node"), None);
        registry.insert(AtomType::link("Link"), None);
        registry
    }

    /// A registry with the standard node and link types
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for (name, parent) in BUILTIN_TYPES {
            let parent_type = registry.types[*parent].atom_type.clone();
            let atom_type = AtomType {
                name: Arc::from(*name),
                ..parent_type
            };
            registry.insert(atom_type, Some(*parent));
        }
        registry
    }

    fn insert(&mut self, atom_type: AtomType, parent: Option<&str>) {
        let name = atom_type.name().to_string();
        if let Some(short) = short_alias(&name) {
            self.aliases.entry(short.to_string()).or_insert_with(|| name.clone());
        }
        self.types.insert(
            name,
            TypeInfo {
                atom_type,
                parent: parent.map(Arc::from),
            },
        );
    }

    /// Register a node type under an existing node parent
    pub fn register_node(&mut self, name: &str, parent: &str) -> Result<AtomType> {
        self.register(name, parent, AtomKind::Node)
    }

    /// Register a link type under an existing link parent. Children of
    /// `UnorderedLink` are unordered.
    pub fn register_link(&mut self, name: &str, parent: &str) -> Result<AtomType> {
        self.register(name, parent, AtomKind::Link)
    }

    fn register(&mut self, name: &str, parent: &str, kind: AtomKind) -> Result<AtomType> {
        let parent_type = match self.types.get(parent) {
            Some(info) if info.kind() == kind => info.atom_type.clone(),
            _ => return Err(AtomSpaceError::unknown_parent(name, parent)),
        };

        if let Some(existing) = self.types.get(name) {
            if existing.kind() == kind && existing.parent() == Some(parent) {
                return Ok(existing.atom_type.clone());
            }
            return Err(AtomSpaceError::type_conflict(name));
        }

        if !is_type_name(name) {
            return Err(AtomSpaceError::unknown_type(name));
        }

        let atom_type = AtomType {
            name: Arc::from(name),
            ..parent_type
        };
        self.insert(atom_type.clone(), Some(parent));
        Ok(atom_type)
    }

    /// Look up a type by full name or short alias
    pub fn resolve(&self, name: &str) -> Option<&TypeInfo> {
        self.types.get(name).or_else(|| {
            self.aliases
                .get(name)
                .and_then(|full| self.types.get(full))
        })
    }

    /// Like [`resolve`](Self::resolve) but failing with `UnknownType`
    pub fn get(&self, name: &str) -> Result<&TypeInfo> {
        self.resolve(name)
            .ok_or_else(|| AtomSpaceError::unknown_type(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// True if `name` is `ancestor` or inherits from it
    pub fn is_a(&self, name: &str, ancestor: &str) -> bool {
        let Some(ancestor) = self.resolve(ancestor).map(|info| info.name().to_string()) else {
            return false;
        };
        let mut current = self.resolve(name);
        while let Some(info) = current {
            if info.name() == ancestor {
                return true;
            }
            current = info.parent().and_then(|parent| self.types.get(parent));
        }
        false
    }

    /// `name` and every registered type inheriting from it, sorted by name
    pub fn subtypes_of(&self, name: &str) -> Vec<&TypeInfo> {
        let mut found: Vec<&TypeInfo> = self
            .types
            .values()
            .filter(|info| self.is_a(info.name(), name))
            .collect();
        found.sort_by(|a, b| a.name().cmp(b.name()));
        found
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn short_alias(name: &str) -> Option<&str> {
    name.strip_suffix("Node")
        .or_else(|| name.strip_suffix("Link"))
        .filter(|short| !short.is_empty())
}

/// Type names start with an ASCII letter and continue with ASCII
/// alphanumerics or underscores.
pub fn is_type_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
