//! Core operations.
//!
//! This module contains the business logic for sweep commands,
//! separated from CLI argument parsing and output rendering.

pub mod build;
pub mod clean;

pub use build::build;
pub use clean::clean;

use std::path::Path;

/// Display `path` relative to the project root where possible.
fn display_relative(path: &Path, project_root: &Path) -> String {
    path.strip_prefix(project_root)
        .unwrap_or(path)
        .display()
        .to_string()
}
