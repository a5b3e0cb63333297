//! Todo core - session-scoped lists of todos
//!
//! Provides the [`Store`] of [`TodoList`]s and [`Todo`]s: validated names,
//! identity-stable addressing and derived completion state. Nothing in this
//! crate performs I/O; the caller owns the `Store` and decides where it lives.

mod error;
mod list;
mod store;
mod todo;
mod view;

pub use error::{NameSubject, NotFoundError, Result, TodoError, ValidationError};
pub use list::{ListId, TodoList};
pub use store::{Store, MAX_NAME_LENGTH, MIN_NAME_LENGTH};
pub use todo::{Todo, TodoId};
pub use view::{sorted_view, Completable};
