//! Bulk loading of Atomese files into an AtomSpace
//!
//! Input is consumed one top-level expression at a time. Each expression is
//! validated completely and then committed, so when loading stops on an
//! error every earlier expression is in the store and nothing of the failing
//! one is.

use crate::config::LoaderConfig;
use crate::error::ParseError;
use crate::parser::SexprParser;
use crate::span::{LineMap, Position};
use atomspace::{AtomSpace, AtomSpaceError};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

pub type Result<T> = std::result::Result<T, LoadError>;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {origin}: {source}")]
    Io {
        origin: String,
        #[source]
        source: io::Error,
    },

    #[error("{origin}:{position}: {source}")]
    Parse {
        origin: String,
        position: Position,
        #[source]
        source: ParseError,
    },

    #[error("{origin}:{position}: {source}")]
    Invariant {
        origin: String,
        position: Position,
        #[source]
        source: AtomSpaceError,
    },

    #[error("Loading {origin} was cancelled after {expressions} expressions")]
    Cancelled { origin: String, expressions: usize },
}

impl LoadError {
    /// The parse failure behind this error, if any
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            LoadError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn origin(&self) -> &str {
        match self {
            LoadError::Io { origin, .. }
            | LoadError::Parse { origin, .. }
            | LoadError::Invariant { origin, .. }
            | LoadError::Cancelled { origin, .. } => origin,
        }
    }
}

/// Summary of one successful load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Top-level expressions committed
    pub expressions: usize,
    pub atoms_before: usize,
    pub atoms_after: usize,
    pub bytes: usize,
    pub elapsed: Duration,
}

impl LoadReport {
    /// Atoms that were not in the store before the load
    pub fn atoms_added(&self) -> usize {
        self.atoms_after.saturating_sub(self.atoms_before)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Loader {
    config: LoaderConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Loader {
            config,
            cancel: None,
        }
    }

    /// Stop at the next top-level expression once `flag` is set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn load_file(&self, path: impl AsRef<Path>, space: &AtomSpace) -> Result<LoadReport> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let bytes = fs::read(path).map_err(|source| LoadError::Io {
            origin: origin.clone(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|error| LoadError::Io {
            origin: origin.clone(),
            source: io::Error::new(io::ErrorKind::InvalidData, error),
        })?;
        self.load_text(&text, &origin, space)
    }

    pub fn load_reader<R: Read>(&self, mut reader: R, space: &AtomSpace) -> Result<LoadReport> {
        let origin = "<reader>".to_string();
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| LoadError::Io {
                origin: origin.clone(),
                source,
            })?;
        self.load_text(&text, &origin, space)
    }

    pub fn load_str(&self, text: &str, space: &AtomSpace) -> Result<LoadReport> {
        self.load_text(text, "<string>", space)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::Relaxed))
    }

    fn load_text(&self, text: &str, origin: &str, space: &AtomSpace) -> Result<LoadReport> {
        let started = Instant::now();
        let atoms_before = space.count();
        let mut parser = SexprParser::with_config(text, space.types(), self.config);
        let mut expressions = 0;

        loop {
            if self.is_cancelled() {
                warn!(origin, expressions, "Load cancelled");
                return Err(LoadError::Cancelled {
                    origin: origin.to_string(),
                    expressions,
                });
            }

            let expr = match parser.next_expr() {
                Ok(Some(expr)) => expr,
                Ok(None) => break,
                Err(ParseError::Atom { offset, source }) => {
                    return Err(LoadError::Invariant {
                        origin: origin.to_string(),
                        position: LineMap::new(text).position(offset),
                        source,
                    });
                }
                Err(source) => {
                    let position = LineMap::new(text).position(source.offset());
                    return Err(LoadError::Parse {
                        origin: origin.to_string(),
                        position,
                        source,
                    });
                }
            };

            let atom = expr.commit(space).map_err(|source| LoadError::Invariant {
                origin: origin.to_string(),
                position: LineMap::new(text).position(expr.span().start),
                source,
            })?;
            expressions += 1;
            debug!(atom = %atom.signature().short(), size = expr.size(), "Committed expression");
        }

        let report = LoadReport {
            expressions,
            atoms_before,
            atoms_after: space.count(),
            bytes: text.len(),
            elapsed: started.elapsed(),
        };
        info!(
            space = %space.id(),
            origin,
            expressions,
            added = report.atoms_added(),
            elapsed = ?report.elapsed,
            "Loaded atoms"
        );
        Ok(report)
    }
}

/// Load the file at `path` into `space` with the default settings
pub fn load_file(path: impl AsRef<Path>, space: &AtomSpace) -> Result<LoadReport> {
    Loader::default().load_file(path, space)
}

/// Load Atomese text into `space` with the default settings
pub fn load_str(text: &str, space: &AtomSpace) -> Result<LoadReport> {
    Loader::default().load_str(text, space)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_str_counts() {
        let space = AtomSpace::new();
        let report = load_str(
            "(ConceptNode \"a\")\n(ListLink (ConceptNode \"a\") (ConceptNode \"b\"))\n(ConceptNode \"a\")",
            &space,
        )
        .unwrap();
        assert_eq!(report.expressions, 3);
        assert_eq!(report.atoms_before, 0);
        assert_eq!(report.atoms_after, 3);
        assert_eq!(report.atoms_added(), 3);
    }

    #[test]
    fn test_parse_error_position() {
        let space = AtomSpace::new();
        let error = load_str("(ConceptNode \"a\")\n  (Bogus \"b\")", &space).unwrap_err();
        match &error {
            LoadError::Parse {
                position, source, ..
            } => {
                assert_eq!(*position, Position::new(1, 3));
                assert!(matches!(source, ParseError::UnknownType { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(error.to_string(), "<string>:2:4: Unknown atom type `Bogus` at byte 21");
        assert_eq!(space.count(), 1);
    }

    #[test]
    fn test_kind_mismatch_is_invariant_error() {
        let space = AtomSpace::new();
        let error = load_str("(ConceptNode \"a\")\n(ListLink \"b\")", &space).unwrap_err();
        match &error {
            LoadError::Invariant {
                position, source, ..
            } => {
                assert_eq!(*position, Position::new(1, 10));
                assert!(matches!(source, AtomSpaceError::KindMismatch { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(error.parse_error().is_none());
        assert_eq!(space.count(), 1);
    }

    #[test]
    fn test_cancellation() {
        let space = AtomSpace::new();
        let flag = Arc::new(AtomicBool::new(true));
        let loader = Loader::default().with_cancel_flag(flag.clone());
        assert!(matches!(
            loader.load_str("(ConceptNode \"a\")", &space),
            Err(LoadError::Cancelled { expressions: 0, .. })
        ));
        assert!(space.is_empty());

        flag.store(false, Ordering::Relaxed);
        loader.load_str("(ConceptNode \"a\")", &space).unwrap();
        assert_eq!(space.count(), 1);
    }

    #[test]
    fn test_load_reader() {
        let space = AtomSpace::new();
        let input: &[u8] = b"(PredicateNode \"p\")";
        let report = Loader::default().load_reader(input, &space).unwrap();
        assert_eq!(report.bytes, input.len());
        assert!(space.get_node("PredicateNode", "p").is_some());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let space = AtomSpace::new();
        let error = load_file("/definitely/not/here.scm", &space).unwrap_err();
        assert!(matches!(error, LoadError::Io { .. }));
        assert_eq!(error.origin(), "/definitely/not/here.scm");
    }
}
