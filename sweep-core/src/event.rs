//! Build and clean lifecycle events.

use std::path::{Path, PathBuf};

/// An output path reported by the build pipeline.
///
/// Every variant means the path should exist after a correct build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    /// The output file did not exist and was created.
    Created(PathBuf),
    /// The output file existed with different content and was rewritten.
    Updated(PathBuf),
    /// The output file is newer than its source and was not looked at.
    Skipped(PathBuf),
    /// The output file was re-rendered and found byte-identical.
    Identical(PathBuf),
}

impl BuildEvent {
    /// The output path this event refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Created(p) | Self::Updated(p) | Self::Skipped(p) | Self::Identical(p) => p,
        }
    }

    /// Short verb used in log lines.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Created(_) => "create",
            Self::Updated(_) => "update",
            Self::Skipped(_) => "skip",
            Self::Identical(_) => "identical",
        }
    }
}

/// Receives build events from a pipeline run.
///
/// Listeners may be called from whichever thread runs the build, so
/// implementations must be `Send + Sync`.
pub trait BuildListener: Send + Sync {
    fn on_event(&self, event: &BuildEvent);
}

impl<F> BuildListener for F
where
    F: Fn(&BuildEvent) + Send + Sync,
{
    fn on_event(&self, event: &BuildEvent) {
        self(event)
    }
}

/// A change made (or, in a dry run, planned) while cleaning the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanEvent {
    /// A file was removed.
    Removed(PathBuf),
    /// An empty directory was removed.
    Pruned(PathBuf),
}

/// Receives clean events.
pub trait CleanListener {
    fn on_event(&self, event: &CleanEvent);
}

impl<F> CleanListener for F
where
    F: Fn(&CleanEvent),
{
    fn on_event(&self, event: &CleanEvent) {
        self(event)
    }
}
