//! Table output for task lists and lane totals using comfy-table.
//!
//! Status cells are colored when the terminal allows it; `NO_COLOR` and
//! `TERM=dumb` fall back to plain icons.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::cli::output::{short_id, truncate};
use crate::domain::models::{StatusCounts, Task, TaskStatus};

pub struct TableFormatter {
    use_colors: bool,
    max_width: Option<u16>,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self { use_colors, max_width }
    }

    pub fn format_tasks(&self, tasks: &[Task]) -> String {
        let mut table = self.create_base_table();

        table.set_header(header(&["ID", "Title", "Status", "E/S/I", "Score", "Due"]));

        for task in tasks {
            let title = if task.is_focus_task {
                format!("* {}", truncate(&task.title, 38))
            } else {
                truncate(&task.title, 40)
            };

            table.add_row(vec![
                Cell::new(short_id(&task.id)),
                Cell::new(title),
                self.status_cell(task.status),
                Cell::new(ratings_text(task)),
                Cell::new(task.score.map_or_else(|| "-".to_string(), |s| format!("{s:.2}"))),
                Cell::new(task.due_date.map_or_else(|| "-".to_string(), |d| d.to_string())),
            ]);
        }

        table.to_string()
    }

    /// Checklist view for subtasks.
    pub fn format_subtasks(&self, subtasks: &[Task]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["#", "ID", "Done", "Title"]));

        for subtask in subtasks {
            let done = if subtask.status == TaskStatus::Completed { "[x]" } else { "[ ]" };
            table.add_row(vec![
                Cell::new(subtask.position),
                Cell::new(short_id(&subtask.id)),
                Cell::new(done),
                Cell::new(truncate(&subtask.title, 50)),
            ]);
        }

        table.to_string()
    }

    pub fn format_counts(&self, counts: &StatusCounts) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Status", "Tasks"]));

        for status in TaskStatus::ALL {
            table.add_row(vec![self.status_cell(status), Cell::new(counts.get(status))]);
        }
        table.add_row(vec![
            Cell::new("total").add_attribute(Attribute::Bold),
            Cell::new(counts.total()).add_attribute(Attribute::Bold),
        ]);

        table.to_string()
    }

    fn status_cell(&self, status: TaskStatus) -> Cell {
        if self.use_colors {
            Cell::new(status.as_str()).fg(status_color(status))
        } else {
            Cell::new(format!("{} {}", status_icon(status), status))
        }
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|t| Cell::new(t).add_attribute(Attribute::Bold))
        .collect()
}

fn ratings_text(task: &Task) -> String {
    let show = |r: Option<i32>| r.map_or_else(|| "-".to_string(), |v| v.to_string());
    format!("{}/{}/{}", show(task.energy), show(task.simplicity), show(task.impact))
}

fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}

fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Unrated => Color::White,
        TaskStatus::Rated => Color::Cyan,
        TaskStatus::Parked => Color::Yellow,
        TaskStatus::Completed => Color::Green,
    }
}

fn status_icon(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Unrated => "○",
        TaskStatus::Rated => "●",
        TaskStatus::Parked => "⊘",
        TaskStatus::Completed => "✓",
    }
}
