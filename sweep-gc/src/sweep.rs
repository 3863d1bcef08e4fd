//! The full sweep: silent rebuild, reconcile, prune.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use eyre::{Context, Result};
use sweep_core::{BuildListener, CleanListener};

use crate::{ExclusionRules, RemovalFailure, prune_empty, reconcile, track_build};

/// Removal policy for one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepOptions {
    /// Also remove files the build tracked.
    pub force: bool,
    /// Report what would be removed without touching the disk.
    pub dry_run: bool,
}

/// Everything a sweep removed (or would remove).
#[derive(Debug, Default)]
pub struct SweepOutcome {
    /// Number of output files the rebuild accounted for.
    pub tracked: usize,
    pub removed: BTreeSet<PathBuf>,
    pub pruned: BTreeSet<PathBuf>,
    pub failures: Vec<RemovalFailure>,
}

impl SweepOutcome {
    pub fn is_clean(&self) -> bool {
        self.removed.is_empty() && self.pruned.is_empty()
    }
}

/// Run a sweep over `output_root`.
///
/// `rebuild` must drive the build pipeline with [`SILENT_REBUILD`] options,
/// reporting every output path to the listener it is given. The phases run
/// strictly in order: the rebuild completes before any file is examined,
/// and all file removals complete before directories are pruned.
///
/// A missing output directory has nothing to clean and yields an empty
/// outcome.
///
/// [`SILENT_REBUILD`]: crate::SILENT_REBUILD
pub fn sweep<F>(
    output_root: &Path,
    rules: &ExclusionRules,
    opts: SweepOptions,
    rebuild: F,
    listener: &dyn CleanListener,
) -> Result<SweepOutcome>
where
    F: FnOnce(&dyn BuildListener) -> Result<()>,
{
    let tracked = track_build(rebuild).wrap_err("silent rebuild failed")?;

    if !output_root.is_dir() {
        tracing::info!("{} does not exist, nothing to clean", output_root.display());
        return Ok(SweepOutcome {
            tracked: tracked.len(),
            ..Default::default()
        });
    }

    let reconciled = reconcile(output_root, rules, &tracked, opts, listener)?;
    let pruned = prune_empty(
        output_root,
        rules,
        &reconciled.removed,
        opts.dry_run,
        listener,
    );

    let mut failures = reconciled.failures;
    failures.extend(pruned.failures);

    Ok(SweepOutcome {
        tracked: tracked.len(),
        removed: reconciled.removed,
        pruned: pruned.pruned,
        failures,
    })
}
