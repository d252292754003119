use serde::{Deserialize, Serialize};

/// Parser and loader settings (`[loader]` table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Reject type names the registry does not know. When off, unknown
    /// types are accepted and their kind is taken from the expression shape.
    pub strict_types: bool,
    /// Treat `;` as the start of a line comment
    pub allow_comments: bool,
    /// Deepest link nesting accepted in one expression. Parsing, committing
    /// and printing all recurse once per level, so this bounds stack use.
    pub max_depth: usize,
}

pub const DEFAULT_MAX_DEPTH: usize = 256;

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            strict_types: true,
            allow_comments: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
