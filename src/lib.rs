//! dlsort - sort a downloads folder by file type
//!
//! This library classifies files by extension, moves them into category
//! subdirectories without overwriting anything, and applies optional
//! exclusion rules loaded from a TOML configuration file.

pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod output;

pub use config::{CompiledFilters, ConfigError, FilterConfig};
pub use file_category::{Category, category_for_extension};
pub use file_organizer::{FileOrganizer, MovedFile, OrganizeError, OrganizeResult};

pub use cli::{OrganizeReport, run_cli, run_cli_with_config};
