//! TodoList - a named, ordered collection of todos
//!
//! Todos keep their insertion order regardless of completion state.
//! Display ordering belongs to [`crate::sorted_view`].

use serde::{Deserialize, Serialize};

use crate::error::{NameSubject, NotFoundError, Result};
use crate::store::{next_id, validate_name};
use crate::todo::{Todo, TodoId};

/// Identifier of a list, unique within its store
pub type ListId = u64;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
    #[serde(default)]
    pub todos: Vec<Todo>,
}

impl TodoList {
    pub(crate) fn new(id: ListId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            todos: Vec::new(),
        }
    }

    pub fn get_todo(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn todos_count(&self) -> usize {
        self.todos.len()
    }

    /// Number of todos not yet completed
    pub fn todos_remaining_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }

    /// A list is complete when it has at least one todo and none remain
    pub fn is_complete(&self) -> bool {
        self.todos_count() > 0 && self.todos_remaining_count() == 0
    }

    pub(crate) fn add_todo(&mut self, name: &str) -> Result<&Todo> {
        let name = validate_name(name, NameSubject::Todo)?;
        let id = next_id(self.todos.iter().map(|t| t.id));
        self.todos.push(Todo::new(id, name));
        Ok(&self.todos[self.todos.len() - 1])
    }

    pub(crate) fn delete_todo(&mut self, id: TodoId) -> Result<Todo> {
        let position = self
            .todos
            .iter()
            .position(|t| t.id == id)
            .ok_or(NotFoundError::TodoNotFound)?;
        Ok(self.todos.remove(position))
    }

    pub(crate) fn set_todo_completed(&mut self, id: TodoId, completed: bool) -> Result<&Todo> {
        let todo = self
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(NotFoundError::TodoNotFound)?;
        todo.completed = completed;
        Ok(&*todo)
    }

    pub(crate) fn complete_all(&mut self) {
        for todo in &mut self.todos {
            todo.completed = true;
        }
    }
}
