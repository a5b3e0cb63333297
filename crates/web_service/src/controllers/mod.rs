pub mod list_controller;
pub mod navigation;
pub mod system_controller;
pub mod todo_controller;
