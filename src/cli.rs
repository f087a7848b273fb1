//! Command-line interface module for dlsort.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Directory scanning and entry filtering
//! - Organization orchestration and reporting

use crate::config::{CompiledFilters, FilterConfig};
use crate::file_category::categorize_path;
use crate::file_organizer::{FileOrganizer, MovedFile, OrganizeError};
use crate::output::OutputFormatter;
use clap::Parser;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Sort a downloads folder into category subfolders by file extension.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Directory to organize [default: your downloads folder]
    pub path: Option<PathBuf>,

    /// Filter configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only print the summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Directory to organize, falling back to the user's downloads folder.
    pub fn target_dir(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_downloads_dir)
    }
}

/// The user's downloads directory, or `~/Downloads` if the platform has none.
pub fn default_downloads_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("Downloads"))
}

/// Outcome of one organization run.
#[derive(Debug, Default)]
pub struct OrganizeReport {
    /// Files that were moved, in processing order.
    pub moved: Vec<MovedFile>,
    /// Files that could not be moved, with the reason.
    pub failed: Vec<(PathBuf, String)>,
    /// Entries left in place: directories, hidden or excluded files.
    pub skipped: usize,
}

impl OrganizeReport {
    /// Number of files moved.
    pub fn total_moved(&self) -> usize {
        self.moved.len()
    }

    /// True if no file failed to move.
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of moved files per category directory name.
    pub fn category_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for moved in &self.moved {
            *counts.entry(moved.category.dir_name().to_string()).or_insert(0) += 1;
        }
        counts
    }
}

/// Organizes `dir_path` with the default configuration lookup.
///
/// # Examples
///
/// ```no_run
/// use dlsort::cli::run_cli;
/// use std::path::Path;
///
/// match run_cli(Path::new("/home/me/Downloads")) {
///     Ok(report) => println!("Moved {} files", report.total_moved()),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(dir_path: &Path) -> Result<OrganizeReport, OrganizeError> {
    run_cli_with_config(dir_path, None, false)
}

/// Organizes `dir_path` with an optional configuration file.
///
/// Fails before touching anything if the directory is missing or the
/// configuration is invalid. A file that cannot be moved is recorded in the
/// report and the run carries on with the next one.
pub fn run_cli_with_config(
    dir_path: &Path,
    config_path: Option<&Path>,
    quiet: bool,
) -> Result<OrganizeReport, OrganizeError> {
    if !dir_path.is_dir() {
        return Err(OrganizeError::MissingDirectory {
            path: dir_path.to_path_buf(),
        });
    }

    let filters = FilterConfig::load(config_path)?.compile()?;
    organize_directory(dir_path, &filters, quiet)
}

/// Moves every eligible file directly inside `base_path` into its category folder.
pub fn organize_directory(
    base_path: &Path,
    filters: &CompiledFilters,
    quiet: bool,
) -> Result<OrganizeReport, OrganizeError> {
    if !quiet {
        OutputFormatter::run_header(base_path);
    }

    let (files, skipped) = collect_files(base_path, filters)?;
    let mut report = OrganizeReport {
        skipped,
        ..Default::default()
    };

    let pb = OutputFormatter::create_progress_bar(files.len() as u64);
    for file_path in &files {
        let category = categorize_path(file_path);
        match FileOrganizer::move_to_category(base_path, file_path, category) {
            Ok(moved) => {
                if !quiet {
                    pb.suspend(|| println!("  {}", OutputFormatter::moved_line(&moved)));
                }
                report.moved.push(moved);
            }
            Err(e) => {
                pb.suspend(|| OutputFormatter::error(&e.to_string()));
                report.failed.push((file_path.clone(), e.to_string()));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    print_report(base_path, &report);
    Ok(report)
}

/// Snapshots the regular files directly inside `base_path`, sorted by name.
///
/// Returns the files to organize and the number of entries skipped.
fn collect_files(
    base_path: &Path,
    filters: &CompiledFilters,
) -> Result<(Vec<PathBuf>, usize), OrganizeError> {
    let entries = fs::read_dir(base_path).map_err(|e| OrganizeError::DirectoryReadFailed {
        path: base_path.to_path_buf(),
        source: e,
    })?;

    let own_executable = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.canonicalize().ok());

    let mut files = Vec::new();
    let mut skipped = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        // Follows symlinks; a link to a file is organized and moved as a link
        let is_file = path.is_file();

        if !is_file || !filters.should_include(&path) || is_same_file(&path, own_executable.as_deref())
        {
            skipped += 1;
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok((files, skipped))
}

fn is_same_file(path: &Path, other: Option<&Path>) -> bool {
    match other {
        Some(other) => path.canonicalize().is_ok_and(|p| p == other),
        None => false,
    }
}

fn print_report(base_path: &Path, report: &OrganizeReport) {
    if report.total_moved() == 0 && report.failed.is_empty() {
        OutputFormatter::success("Nothing to organize. The folder is already clean!");
        return;
    }

    if report.total_moved() > 0 {
        OutputFormatter::summary_table(&report.category_counts(), report.total_moved());
        OutputFormatter::success(&format!(
            "Organized {} file(s) in {}",
            report.total_moved(),
            base_path.display()
        ));
    }

    if !report.is_complete_success() {
        OutputFormatter::warning(&format!(
            "{} file(s) could not be organized. Please review errors above.",
            report.failed.len()
        ));
    }
}
