//! HTML rendering
//!
//! Pages and fragments are compiled from `templates/` by askama. Content is
//! HTML-escaped on output.

use crate::error::{Result, TodoError};
use crate::storage::Todo;
use askama::Template;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    todos: &'a [Todo],
}

#[derive(Template)]
#[template(path = "todo_list.html")]
struct TodoListTemplate<'a> {
    todos: &'a [Todo],
}

#[derive(Template)]
#[template(path = "todo_item.html")]
struct TodoItemTemplate<'a> {
    todo: &'a Todo,
}

/// Render the full home page
pub fn render_page(todos: &[Todo]) -> Result<String> {
    IndexTemplate { todos }
        .render()
        .map_err(|e| TodoError::Render(e.to_string()).into())
}

/// Render the to-do list fragment returned by add
pub fn render_list(todos: &[Todo]) -> Result<String> {
    TodoListTemplate { todos }
        .render()
        .map_err(|e| TodoError::Render(e.to_string()).into())
}

/// Render a single `<li>` row, the fragment returned by edit
pub fn render_item(todo: &Todo) -> Result<String> {
    TodoItemTemplate { todo }
        .render()
        .map_err(|e| TodoError::Render(e.to_string()).into())
}
