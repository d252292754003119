//! Utility functions and helpers for the CLI

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while files are loading
pub struct ProgressIndicator {
    bar: ProgressBar,
}

impl ProgressIndicator {
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            bar.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(format!("{} {}", "✓".green(), message));
    }

    pub fn finish_error(&self, message: &str) {
        self.bar.finish_with_message(format!("{} {}", "✗".red(), message));
    }
}

/// Format duration in human-readable format
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let nanos = duration.subsec_nanos();

    if total_secs >= 60 {
        format!("{}m {}s", total_secs / 60, total_secs % 60)
    } else if total_secs > 0 {
        format!("{}.{:03}s", total_secs, nanos / 1_000_000)
    } else if nanos >= 1_000_000 {
        format!("{:.1}ms", nanos as f64 / 1_000_000.0)
    } else if nanos >= 1_000 {
        format!("{:.1}μs", nanos as f64 / 1_000.0)
    } else {
        format!("{}ns", nanos)
    }
}

/// Print an error message with consistent styling
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Print a success message with consistent styling
pub fn print_success(message: &str) {
    eprintln!("{} {}", "Success:".green().bold(), message);
}

/// Print an info message with consistent styling
pub fn print_info(message: &str) {
    eprintln!("{} {}", "Info:".blue().bold(), message);
}

/// Create a table-like output
#[derive(Default)]
pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(mut self, headers: Vec<&str>) -> Self {
        self.headers = headers.iter().map(|s| s.to_string()).collect();
        self.column_widths = headers.iter().map(|s| s.chars().count()).collect();
        self
    }

    pub fn row(mut self, values: Vec<String>) -> Self {
        for (i, value) in values.iter().enumerate() {
            let width = value.chars().count();
            if i < self.column_widths.len() {
                self.column_widths[i] = self.column_widths[i].max(width);
            } else {
                self.column_widths.push(width);
            }
        }
        self.rows.push(values);
        self
    }

    /// Render without colors
    pub fn render(&self) -> String {
        let mut output = String::new();
        if !self.headers.is_empty() {
            output.push_str(&self.render_line(&self.headers));
            let separator: Vec<String> = self
                .column_widths
                .iter()
                .map(|&width| "─".repeat(width))
                .collect();
            output.push_str(&self.render_line(&separator));
        }
        for row in &self.rows {
            output.push_str(&self.render_line(row));
        }
        output
    }

    fn render_line(&self, cells: &[String]) -> String {
        let line = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = self.column_widths.get(i).copied().unwrap_or(0);
                let padding = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(padding))
            })
            .collect::<Vec<_>>()
            .join("  ");
        format!("{}\n", line.trim_end())
    }

    pub fn print(self) {
        print!("{}", self.render());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
        assert_eq!(format_duration(Duration::from_nanos(1_500)), "1.5μs");
        assert_eq!(format_duration(Duration::from_micros(1_500)), "1.5ms");
        assert_eq!(format_duration(Duration::from_secs(1)), "1.000s");
        assert_eq!(format_duration(Duration::from_secs(65)), "1m 5s");
    }

    #[test]
    fn test_table_builder() {
        let table = TableBuilder::new()
            .headers(vec!["Type", "Count"])
            .row(vec!["ConceptNode".to_string(), "12".to_string()])
            .row(vec!["ListLink".to_string(), "3".to_string()]);

        assert_eq!(
            table.render(),
            "Type         Count\n───────────  ─────\nConceptNode  12\nListLink     3\n"
        );
    }
}
