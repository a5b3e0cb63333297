//! View DTOs handed to the client in place of rendered pages
//!
//! Lists and todos always appear in `sorted_view` order here; the stored
//! order is never changed by rendering.
use serde::{Deserialize, Serialize};
use session_manager::Flash;
use todo_core::{sorted_view, ListId, Todo, TodoId, TodoList};

/// DTO representing a single todo
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TodoDTO {
    pub id: TodoId,
    pub name: String,
    pub completed: bool,
}

impl From<&Todo> for TodoDTO {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            name: todo.name.clone(),
            completed: todo.completed,
        }
    }
}

/// DTO representing a list on the overview page
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ListSummaryDTO {
    pub id: ListId,
    pub name: String,
    pub todos_count: usize,
    pub todos_remaining_count: usize,
    pub complete: bool,
}

impl From<&TodoList> for ListSummaryDTO {
    fn from(list: &TodoList) -> Self {
        Self {
            id: list.id,
            name: list.name.clone(),
            todos_count: list.todos_count(),
            todos_remaining_count: list.todos_remaining_count(),
            complete: list.is_complete(),
        }
    }
}

/// DTO representing a list with its todos
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ListDetailDTO {
    pub id: ListId,
    pub name: String,
    pub todos_count: usize,
    pub todos_remaining_count: usize,
    pub complete: bool,
    pub todos: Vec<TodoDTO>,
}

impl From<&TodoList> for ListDetailDTO {
    fn from(list: &TodoList) -> Self {
        Self {
            id: list.id,
            name: list.name.clone(),
            todos_count: list.todos_count(),
            todos_remaining_count: list.todos_remaining_count(),
            complete: list.is_complete(),
            todos: sorted_view(&list.todos)
                .into_iter()
                .map(TodoDTO::from)
                .collect(),
        }
    }
}

/// GET /lists
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ListsPageDTO {
    pub lists: Vec<ListSummaryDTO>,
    pub flash: Flash,
}

impl ListsPageDTO {
    pub fn new(lists: &[TodoList], flash: Flash) -> Self {
        Self {
            lists: sorted_view(lists)
                .into_iter()
                .map(ListSummaryDTO::from)
                .collect(),
            flash,
        }
    }
}

/// GET /lists/{id}
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ListPageDTO {
    pub list: ListDetailDTO,
    pub flash: Flash,
}

/// A rejected list name, echoed back with the reason
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ListFormDTO {
    pub flash: Flash,
    pub list_name: String,
    /// The list being renamed, absent when creating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListSummaryDTO>,
}

/// A rejected todo name, echoed back with the list it was meant for
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TodoFormDTO {
    pub flash: Flash,
    pub todo: String,
    pub list: ListDetailDTO,
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::Store;

    #[test]
    fn test_detail_orders_todos_for_display_only() {
        let mut store = Store::new();
        store.create_list("Week").unwrap();
        store.add_todo(1, "A").unwrap();
        store.add_todo(1, "B").unwrap();
        store.set_todo_completed(1, 1, true).unwrap();

        let list = store.get_list(1).unwrap();
        let detail = ListDetailDTO::from(list);
        let names: Vec<_> = detail.todos.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(detail.todos_remaining_count, 1);
        assert!(!detail.complete);
        assert_eq!(list.todos[0].name, "A");
    }

    #[test]
    fn test_empty_flash_serializes_as_empty_object() {
        let page = ListsPageDTO::new(&[], Flash::default());
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json, serde_json::json!({ "lists": [], "flash": {} }));
    }
}
