//! Build command report data structures.

use super::output::{Output, Report};

/// Report data from mirroring the source tree.
#[derive(Debug)]
pub struct BuildReport {
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Output directory, relative to the project.
    pub output_dir: String,
    /// Newly created output files.
    pub created: Vec<String>,
    /// Output files rewritten with new content.
    pub updated: Vec<String>,
    /// Outputs left alone because they were current.
    pub unchanged: usize,
}

impl BuildReport {
    pub fn written(&self) -> usize {
        self.created.len() + self.updated.len()
    }
}

impl Report for BuildReport {
    fn render(&self, out: &mut dyn Output) {
        if self.written() == 0 {
            out.preformatted(&format!("{} is up to date.", self.output_dir));
            return;
        }

        out.section(if self.dry_run { "Would write" } else { "Wrote" });
        for path in &self.created {
            out.added_item(path);
        }
        for path in &self.updated {
            out.list_item(&format!("~ {}", path));
        }

        out.newline();
        out.preformatted(&format!(
            "{} created, {} updated, {} unchanged",
            self.created.len(),
            self.updated.len(),
            self.unchanged
        ));
    }
}
