//! Atomese s-expression support for the AtomSpace
//!
//! - [`parser`]: grammar for `(ConceptNode "name")` / `(ListLink ...)` text
//! - [`loader`]: bulk loading of files and strings into a store
//! - [`commands`]: the `cog-*` command interpreter

pub mod commands;
pub mod config;
pub mod error;
pub mod lexer;
pub mod loader;
pub mod parser;
pub mod span;

pub use commands::{CommandError, Commands};
pub use config::{LoaderConfig, DEFAULT_MAX_DEPTH};
pub use error::ParseError;
pub use loader::{load_file, load_str, LoadError, LoadReport, Loader};
pub use parser::{parse_atom, PendingAtom, SexprParser};
pub use span::{ByteOffset, LineMap, Position, Span};
