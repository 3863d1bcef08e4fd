//! Accumulates the paths a build reports as produced.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use eyre::Result;
use sweep_core::{BuildEvent, BuildListener, WriteOptions};
use tracing::subscriber::NoSubscriber;

/// Build options for the rebuild that feeds [`track_build`].
///
/// The rebuild must discover the full output set without writing anything,
/// and must not force re-rendering so the set reflects what exists today.
pub const SILENT_REBUILD: WriteOptions = WriteOptions {
    dry_run: true,
    force: false,
};

/// The set of output paths reported by a build.
///
/// Append-only; safe to feed from a concurrent pipeline.
#[derive(Debug, Default)]
pub struct TrackedPaths {
    paths: Mutex<HashSet<PathBuf>>,
}

impl TrackedPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a path. Recording the same path twice is a no-op.
    pub fn record(&self, path: impl Into<PathBuf>) {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into());
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freeze the accumulator into a plain set.
    pub fn into_set(self) -> HashSet<PathBuf> {
        self.paths
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl BuildListener for TrackedPaths {
    fn on_event(&self, event: &BuildEvent) {
        self.record(event.path());
    }
}

/// Run `rebuild` with a fresh accumulator and return what it tracked.
///
/// Logging is silenced for the duration of the rebuild; the previous
/// subscriber is back in place once this returns.
pub fn track_build<F>(rebuild: F) -> Result<HashSet<PathBuf>>
where
    F: FnOnce(&dyn BuildListener) -> Result<()>,
{
    let tracked = TrackedPaths::new();
    tracing::subscriber::with_default(NoSubscriber::default(), || rebuild(&tracked))?;
    tracing::debug!("rebuild tracked {} output files", tracked.len());
    Ok(tracked.into_set())
}
