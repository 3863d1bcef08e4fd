use std::path::PathBuf;

use sweep_core::BuildEvent;

/// Output paths grouped by what the build did with them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub created: Vec<PathBuf>,
    pub updated: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub identical: Vec<PathBuf>,
}

impl BuildSummary {
    pub(crate) fn record(&mut self, event: BuildEvent) {
        match event {
            BuildEvent::Created(p) => self.created.push(p),
            BuildEvent::Updated(p) => self.updated.push(p),
            BuildEvent::Skipped(p) => self.skipped.push(p),
            BuildEvent::Identical(p) => self.identical.push(p),
        }
    }

    /// Number of files created or rewritten.
    pub fn written(&self) -> usize {
        self.created.len() + self.updated.len()
    }

    /// Number of output files the build accounts for.
    pub fn total(&self) -> usize {
        self.written() + self.skipped.len() + self.identical.len()
    }
}
