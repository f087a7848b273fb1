//! Output formatting and styling module.
//!
//! All console output of a run goes through here: colored status lines, the
//! progress bar over the file snapshot, and the closing summary table. None
//! of it is part of the organizing logic.

use crate::file_organizer::MovedFile;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::path::Path;

/// Manages all CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// ```no_run
    /// use dlsort::output::OutputFormatter;
    /// OutputFormatter::success("Organized 3 files");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints the banner shown at the start of a run.
    pub fn run_header(base_path: &Path) {
        println!("{}", "dlsort".bold());
        Self::info(&format!(
            "Run time: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        Self::info(&format!("Scanning: {}", base_path.display()));
    }

    /// Creates a progress bar for the file snapshot.
    ///
    /// ```no_run
    /// use dlsort::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(100);
    /// pb.inc(1);
    /// pb.finish_and_clear();
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        let pb = ProgressBar::new(total);
        pb.set_style(style);
        pb
    }

    /// Formats the line reported for one moved file.
    ///
    /// Mentions the saved name only when it differs from the original.
    pub fn moved_line(moved: &MovedFile) -> String {
        let original = moved
            .original_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        let line = format!("{} → {}/", original, moved.category.dir_name());
        if moved.was_renamed() {
            let saved = moved
                .new_path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            format!("{} {} {}", line, "saved as:".yellow(), saved)
        } else {
            line
        }
    }

    /// Prints a summary table with file counts by category.
    ///
    /// ```no_run
    /// use dlsort::output::OutputFormatter;
    /// use std::collections::HashMap;
    ///
    /// let mut counts = HashMap::new();
    /// counts.insert("Documents".to_string(), 15);
    /// counts.insert("Images".to_string(), 8);
    /// OutputFormatter::summary_table(&counts, 23);
    /// ```
    pub fn summary_table(category_counts: &HashMap<String, usize>, total_files: usize) {
        Self::header("SUMMARY");

        let mut categories: Vec<_> = category_counts.iter().collect();
        categories.sort_by_key(|&(name, _)| name);

        // At least as wide as "Category"
        let width = categories
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max(8);

        println!("{:<width$} | {}", "Category".bold(), "Files".bold());
        println!("{}", "-".repeat(width + 10));

        for (category, count) in &categories {
            println!(
                "{:<width$} | {} {}",
                category,
                count.to_string().green(),
                plural_files(**count)
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total_files.to_string().green().bold(),
            plural_files(total_files)
        );
    }
}

fn plural_files(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}
