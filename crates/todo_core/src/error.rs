//! Error types for store operations

use std::fmt;

use thiserror::Error;

/// Which kind of entity a name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSubject {
    List,
    Todo,
}

impl fmt::Display for NameSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => f.write_str("list"),
            Self::Todo => f.write_str("todo"),
        }
    }
}

/// A name was rejected before anything was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The {0} name must be between 1 and 100 characters.")]
    InvalidLength(NameSubject),

    #[error("List name must be unique.")]
    DuplicateName,
}

/// A list or todo id did not resolve to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NotFoundError {
    #[error("The specified list was not found.")]
    ListNotFound,

    #[error("The specified todo was not found.")]
    TodoNotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

impl TodoError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T, E = TodoError> = std::result::Result<T, E>;
