//! Output formatting for CLI commands.

use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text in the reference file formats.
    #[default]
    Text,
    /// Human-readable table format.
    Table,
    /// JSON format.
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => OutputFormat::Json,
            "table" => OutputFormat::Table,
            _ => OutputFormat::Text,
        }
    }
}

/// Render rows as a table.
pub fn render_table<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return "No items found.".dimmed().to_string();
    }
    Table::new(rows).to_string()
}

/// Print a single item as pretty JSON.
pub fn print_json<T: Serialize>(data: &T) {
    println!("{}", format_json(data));
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "Success:".green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "Info:".blue().bold(), message);
}

fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}
