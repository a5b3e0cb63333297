//! # Session Manager
//!
//! Carries the per-browser-session state of the todo service: the
//! [`todo_core::Store`] and the one-shot status messages shown after a
//! redirect. Every request mutates its session through
//! [`SessionManager::with_session`], which applies the change as a single
//! read-modify-write unit.

pub mod error;
pub mod manager;
pub mod storage;
pub mod structs;

// Re-exports
pub use error::SessionError;
pub use manager::SessionManager;
pub use storage::{MemorySessionStorage, SessionStorage};
pub use structs::{Flash, Session};
