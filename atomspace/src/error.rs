//! AtomSpace error types

use crate::types::AtomKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AtomSpaceError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AtomSpaceError {
    #[error("Unknown atom type: {name}")]
    UnknownType { name: String },

    #[error("`{type_name}` is a {actual} type, but was used as a {expected}")]
    KindMismatch {
        type_name: String,
        actual: AtomKind,
        expected: AtomKind,
    },

    #[error("Type `{name}` is already registered with a different definition")]
    TypeConflict { name: String },

    #[error("Cannot register `{name}`: parent type `{parent}` is unknown or of the wrong kind")]
    UnknownParent { name: String, parent: String },
}

impl AtomSpaceError {
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    pub fn kind_mismatch(type_name: impl Into<String>, actual: AtomKind, expected: AtomKind) -> Self {
        Self::KindMismatch {
            type_name: type_name.into(),
            actual,
            expected,
        }
    }

    pub fn type_conflict(name: impl Into<String>) -> Self {
        Self::TypeConflict { name: name.into() }
    }

    pub fn unknown_parent(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::UnknownParent {
            name: name.into(),
            parent: parent.into(),
        }
    }
}
