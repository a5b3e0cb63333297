//! Display ordering for lists and todos

use crate::list::TodoList;
use crate::todo::Todo;

pub trait Completable {
    fn is_complete(&self) -> bool;
}

impl Completable for Todo {
    fn is_complete(&self) -> bool {
        self.completed
    }
}

impl Completable for TodoList {
    fn is_complete(&self) -> bool {
        TodoList::is_complete(self)
    }
}

/// Incomplete items first, then complete ones, each group in its original
/// relative order. The input slice is left as is.
pub fn sorted_view<T: Completable>(items: &[T]) -> Vec<&T> {
    let (complete, mut ordered): (Vec<&T>, Vec<&T>) =
        items.iter().partition(|item| item.is_complete());
    ordered.extend(complete);
    ordered
}
