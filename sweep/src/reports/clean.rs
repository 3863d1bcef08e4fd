//! Clean command report data structures.

use super::output::{Output, Report};

/// Report data from a sweep of the output directory.
#[derive(Debug)]
pub struct CleanReport {
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Output directory, relative to the project.
    pub output_dir: String,
    /// Number of output files the rebuild still produces.
    pub tracked: usize,
    /// Removed files, in removal order.
    pub removed: Vec<String>,
    /// Pruned directories, deepest first.
    pub pruned: Vec<String>,
    /// Paths that could not be removed, with the reason.
    pub failures: Vec<String>,
}

impl CleanReport {
    /// Whether anything was removed (or would be removed in a dry run).
    pub fn has_removals(&self) -> bool {
        !self.removed.is_empty() || !self.pruned.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

impl Report for CleanReport {
    fn render(&self, out: &mut dyn Output) {
        for failure in &self.failures {
            out.warning(&format!("could not remove {}", failure));
        }

        if !self.has_removals() {
            if !self.has_failures() {
                out.preformatted(&format!(
                    "Nothing to clean in {} ({} tracked outputs).",
                    self.output_dir, self.tracked
                ));
            }
            return;
        }

        if !self.removed.is_empty() {
            out.section(if self.dry_run { "Would remove" } else { "Removed" });
            for path in &self.removed {
                out.removed_item(path);
            }
        }

        if !self.pruned.is_empty() {
            out.newline();
            out.section(if self.dry_run {
                "Would prune"
            } else {
                "Pruned"
            });
            for dir in &self.pruned {
                out.removed_item(&format!("{}/", dir));
            }
        }
    }
}
