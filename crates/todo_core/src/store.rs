//! Store - every list owned by one session
//!
//! All operations validate and look up before they write, so a failed call
//! leaves the store exactly as it was.

use serde::{Deserialize, Serialize};

use crate::error::{NameSubject, NotFoundError, Result, ValidationError};
use crate::list::{ListId, TodoList};
use crate::todo::{Todo, TodoId};

pub const MIN_NAME_LENGTH: usize = 1;
pub const MAX_NAME_LENGTH: usize = 100;

/// Next id for a container: one past the largest id currently present.
///
/// Computed from current contents, so deleting the highest entry frees its
/// id for the next insert.
pub(crate) fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().unwrap_or(0) + 1
}

/// Trim `raw` and check its length in characters.
pub(crate) fn validate_name(raw: &str, subject: NameSubject) -> Result<&str, ValidationError> {
    let name = raw.trim();
    let length = name.chars().count();
    if (MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
        Ok(name)
    } else {
        Err(ValidationError::InvalidLength(subject))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Store {
    #[serde(default)]
    lists: Vec<TodoList>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists in insertion order
    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn get_list(&self, id: ListId) -> Result<&TodoList> {
        self.lists
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| NotFoundError::ListNotFound.into())
    }

    fn get_list_mut(&mut self, id: ListId) -> Result<&mut TodoList> {
        self.lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| NotFoundError::ListNotFound.into())
    }

    /// Names are compared exactly (case-sensitive). `except` skips the list
    /// being renamed.
    fn ensure_unique_name(&self, name: &str, except: Option<ListId>) -> Result<(), ValidationError> {
        let taken = self
            .lists
            .iter()
            .any(|l| Some(l.id) != except && l.name == name);
        if taken {
            Err(ValidationError::DuplicateName)
        } else {
            Ok(())
        }
    }

    pub fn create_list(&mut self, name: &str) -> Result<&TodoList> {
        let name = validate_name(name, NameSubject::List)?;
        self.ensure_unique_name(name, None)?;

        let id = next_id(self.lists.iter().map(|l| l.id));
        self.lists.push(TodoList::new(id, name));
        Ok(&self.lists[self.lists.len() - 1])
    }

    pub fn rename_list(&mut self, id: ListId, new_name: &str) -> Result<&TodoList> {
        self.get_list(id)?;
        let name = validate_name(new_name, NameSubject::List)?;
        self.ensure_unique_name(name, Some(id))?;

        let list = self.get_list_mut(id)?;
        list.name = name.to_string();
        Ok(&*list)
    }

    /// Removes the list and returns it
    pub fn delete_list(&mut self, id: ListId) -> Result<TodoList> {
        let position = self
            .lists
            .iter()
            .position(|l| l.id == id)
            .ok_or(NotFoundError::ListNotFound)?;
        Ok(self.lists.remove(position))
    }

    pub fn complete_all_todos(&mut self, id: ListId) -> Result<&TodoList> {
        let list = self.get_list_mut(id)?;
        list.complete_all();
        Ok(&*list)
    }

    pub fn add_todo(&mut self, list_id: ListId, name: &str) -> Result<&Todo> {
        self.get_list_mut(list_id)?.add_todo(name)
    }

    /// Removes the todo and returns it
    pub fn delete_todo(&mut self, list_id: ListId, todo_id: TodoId) -> Result<Todo> {
        self.get_list_mut(list_id)?.delete_todo(todo_id)
    }

    pub fn set_todo_completed(
        &mut self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> Result<&Todo> {
        self.get_list_mut(list_id)?
            .set_todo_completed(todo_id, completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TodoError;

    fn store_with(names: &[&str]) -> Store {
        let mut store = Store::new();
        for name in names {
            store.create_list(name).unwrap();
        }
        store
    }

    #[test]
    fn test_create_list_assigns_sequential_ids() {
        let store = store_with(&["Work", "Home"]);
        let ids: Vec<_> = store.lists().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(store.lists().iter().all(|l| l.todos.is_empty()));
    }

    #[test]
    fn test_create_list_stores_trimmed_name() {
        let mut store = Store::new();
        let list = store.create_list("  Errands \n").unwrap();
        assert_eq!(list.name, "Errands");
    }

    #[test]
    fn test_duplicate_list_name_is_rejected_without_change() {
        let mut store = store_with(&["Work"]);
        let before = store.clone();

        let err = store.create_list("Work").unwrap_err();
        assert_eq!(err, TodoError::Validation(ValidationError::DuplicateName));
        assert_eq!(store, before);
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive_and_trimmed() {
        let mut store = store_with(&["Work"]);
        assert!(store.create_list("work").is_ok());
        assert_eq!(
            store.create_list(" Work ").unwrap_err(),
            ValidationError::DuplicateName.into()
        );
    }

    #[test]
    fn test_list_name_length_bounds() {
        let invalid = TodoError::from(ValidationError::InvalidLength(NameSubject::List));
        let mut store = Store::new();

        assert_eq!(store.create_list("").unwrap_err(), invalid);
        assert_eq!(store.create_list(" ").unwrap_err(), invalid);
        assert_eq!(store.create_list(&"x".repeat(101)).unwrap_err(), invalid);
        assert!(store.is_empty());

        assert!(store.create_list("a").is_ok());
        assert!(store.create_list(&"y".repeat(100)).is_ok());
    }

    #[test]
    fn test_name_length_counts_characters() {
        let mut store = Store::new();
        // 100 two-byte characters
        assert!(store.create_list(&"é".repeat(100)).is_ok());
        assert!(store.create_list(&"ü".repeat(101)).is_err());
    }

    #[test]
    fn test_ids_never_collide_after_delete() {
        let mut store = Store::new();
        let a = store.create_list("A").unwrap().id;
        let b = store.create_list("B").unwrap().id;
        store.delete_list(a).unwrap();

        let c = store.create_list("C").unwrap().id;
        assert_eq!(c, b + 1);
        assert!(store.lists().iter().filter(|l| l.id == c).count() == 1);
    }

    #[test]
    fn test_deleting_highest_list_frees_its_id() {
        // Id policy is max+1 over current contents: the id of a deleted
        // highest entry is handed out again.
        let mut store = store_with(&["A", "B", "C"]);
        store.delete_list(3).unwrap();

        let d = store.create_list("D").unwrap();
        assert_eq!(d.id, 3);
    }

    #[test]
    fn test_rename_to_own_name_succeeds() {
        let mut store = store_with(&["Work"]);
        let list = store.rename_list(1, "Work").unwrap();
        assert_eq!(list.name, "Work");
    }

    #[test]
    fn test_rename_to_other_list_name_fails() {
        let mut store = store_with(&["Work", "Home"]);
        let before = store.clone();

        assert_eq!(
            store.rename_list(1, "Home").unwrap_err(),
            ValidationError::DuplicateName.into()
        );
        assert_eq!(store, before);
    }

    #[test]
    fn test_rename_validates_length_and_existence() {
        let mut store = store_with(&["Work"]);
        assert_eq!(
            store.rename_list(1, "   ").unwrap_err(),
            ValidationError::InvalidLength(NameSubject::List).into()
        );
        assert_eq!(
            store.rename_list(42, "Other").unwrap_err(),
            NotFoundError::ListNotFound.into()
        );

        let list = store.rename_list(1, " Office ").unwrap();
        assert_eq!(list.name, "Office");
        assert_eq!(list.id, 1);
    }

    #[test]
    fn test_delete_missing_list_reports_not_found() {
        let mut store = store_with(&["Work"]);
        assert_eq!(
            store.delete_list(7).unwrap_err(),
            NotFoundError::ListNotFound.into()
        );
        assert_eq!(store.lists().len(), 1);
    }

    #[test]
    fn test_complete_all_todos_makes_list_complete() {
        let mut store = store_with(&["Work"]);
        store.add_todo(1, "write report").unwrap();
        store.add_todo(1, "send email").unwrap();
        store.set_todo_completed(1, 1, true).unwrap();
        assert!(!store.get_list(1).unwrap().is_complete());

        let list = store.complete_all_todos(1).unwrap();
        assert!(list.is_complete());
        assert!(list.todos.iter().all(|t| t.completed));
    }

    #[test]
    fn test_complete_all_on_empty_list_stays_incomplete() {
        let mut store = store_with(&["Work"]);
        assert!(!store.complete_all_todos(1).unwrap().is_complete());
    }

    #[test]
    fn test_add_todo_validates_length() {
        let mut store = store_with(&["Work"]);
        let invalid = TodoError::from(ValidationError::InvalidLength(NameSubject::Todo));

        assert_eq!(store.add_todo(1, "  ").unwrap_err(), invalid);
        assert_eq!(store.add_todo(1, &"t".repeat(101)).unwrap_err(), invalid);
        assert_eq!(store.get_list(1).unwrap().todos_count(), 0);

        let todo = store.add_todo(1, " call mom ").unwrap();
        assert_eq!(todo.name, "call mom");
        assert!(!todo.completed);
    }

    #[test]
    fn test_not_found_operations_leave_store_untouched() {
        let mut store = store_with(&["Work"]);
        store.add_todo(1, "write report").unwrap();
        let before = store.clone();

        assert_eq!(
            store.add_todo(99, "x").unwrap_err(),
            NotFoundError::ListNotFound.into()
        );
        assert_eq!(
            store.delete_todo(1, 99).unwrap_err(),
            NotFoundError::TodoNotFound.into()
        );
        assert_eq!(
            store.delete_todo(99, 1).unwrap_err(),
            NotFoundError::ListNotFound.into()
        );
        assert_eq!(
            store.set_todo_completed(99, 1, true).unwrap_err(),
            NotFoundError::ListNotFound.into()
        );
        assert_eq!(
            store.set_todo_completed(1, 99, true).unwrap_err(),
            NotFoundError::TodoNotFound.into()
        );
        assert_eq!(
            store.complete_all_todos(99).unwrap_err(),
            NotFoundError::ListNotFound.into()
        );
        assert_eq!(store, before);
    }

    #[test]
    fn test_todo_ids_are_scoped_per_list() {
        let mut store = store_with(&["Work", "Home"]);
        assert_eq!(store.add_todo(1, "a").unwrap().id, 1);
        assert_eq!(store.add_todo(2, "b").unwrap().id, 1);
        assert_eq!(store.add_todo(1, "c").unwrap().id, 2);
    }

    #[test]
    fn test_set_todo_completed_toggles_both_ways() {
        let mut store = store_with(&["Work"]);
        store.add_todo(1, "a").unwrap();

        assert!(store.set_todo_completed(1, 1, true).unwrap().completed);
        assert!(!store.set_todo_completed(1, 1, false).unwrap().completed);
    }

    #[test]
    fn test_delete_todo_returns_removed_entry() {
        let mut store = store_with(&["Work"]);
        store.add_todo(1, "a").unwrap();
        store.add_todo(1, "b").unwrap();

        let removed = store.delete_todo(1, 1).unwrap();
        assert_eq!(removed.name, "a");
        assert_eq!(store.get_list(1).unwrap().todos[0].name, "b");
    }

    #[test]
    fn test_store_serializes_as_blob() {
        let mut store = store_with(&["Work"]);
        store.add_todo(1, "a").unwrap();

        let blob = serde_json::to_string(&store).unwrap();
        let restored: Store = serde_json::from_str(&blob).unwrap();
        assert_eq!(restored, store);

        let empty: Store = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }
}
