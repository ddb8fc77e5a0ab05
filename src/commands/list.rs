use crate::config::Config;
use crate::error::Result;
use crate::storage::{open_sqlite, Todo};
use colored::Colorize;
use prettytable::{format, Table};

const MAX_CONTENT_WIDTH: usize = 60;

/// Print stored to-dos, optionally only those of one session
pub fn list_todos(config: &Config, session: Option<&str>) -> Result<()> {
    let todos = load_todos(config, session)?;

    if todos.is_empty() {
        println!("{}", "No to-dos found.".yellow());
        return Ok(());
    }

    println!();
    build_table(&todos).printstd();
    println!("{} row(s)", todos.len());
    Ok(())
}

fn load_todos(config: &Config, session: Option<&str>) -> Result<Vec<Todo>> {
    let storage = open_sqlite(&config.storage)?;
    match session {
        Some(key) => storage.list_session(key),
        None => storage.list_all(),
    }
}

fn build_table(todos: &[Todo]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "ID".bold(),
        "Session".bold(),
        "Content".bold()
    ]);

    for todo in todos {
        let session = if todo.session_key.is_empty() {
            "-".to_string()
        } else {
            todo.session_key.chars().take(8).collect()
        };
        table.add_row(prettytable::row![
            todo.id,
            session.cyan(),
            truncate(&todo.content, MAX_CONTENT_WIDTH)
        ]);
    }
    table
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
