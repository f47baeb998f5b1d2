//! Error types for paths and tree operations.

use std::fmt;

use crate::Path;

/// Errors related to path parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A path component is not a valid identifier or numeric segment.
    InvalidComponent {
        component: String,
        position: usize,
        message: String,
    },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::InvalidComponent {
                component,
                position,
                message,
            } => write!(
                f,
                "invalid path component '{}' at position {}: {}",
                component, position, message
            ),
        }
    }
}

impl std::error::Error for PathError {}

/// Errors from structural tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// No node exists at the addressed path.
    NotFound { path: Path },

    /// A mount would introduce a second child with the same local id.
    DuplicateChild { path: Path, local_id: String },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::NotFound { path } => write!(f, "no node at path '{}'", path),
            TreeError::DuplicateChild { path, local_id } => write!(
                f,
                "node at path '{}' already has a child '{}'",
                path, local_id
            ),
        }
    }
}

impl std::error::Error for TreeError {}
