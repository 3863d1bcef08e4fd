//! Removal of output files the build did not produce.

use std::{
    collections::{BTreeSet, HashSet},
    fs::{self, ReadDir},
    io,
    path::{Path, PathBuf},
};

use eyre::{Context, Result};
use sweep_core::{CleanEvent, CleanListener};

use crate::{EntryKind, ExclusionRules, SweepOptions};

/// A path that could not be removed or listed.
#[derive(Debug)]
pub struct RemovalFailure {
    pub path: PathBuf,
    pub error: io::Error,
}

/// Result of a reconcile walk.
#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    /// Files removed, or that would be removed in a dry run.
    pub removed: BTreeSet<PathBuf>,
    /// Files or directories that failed; the walk continued past them.
    pub failures: Vec<RemovalFailure>,
}

/// Walk `output_root` top-down and remove every file that is not excluded
/// and not in `tracked`. With `force`, tracked files are removed too.
///
/// Excluded directories are never entered. Each removal is reported to
/// `listener`, in dry runs as well.
///
/// # Errors
///
/// Returns an error only if `output_root` itself cannot be listed. Failures
/// further down are collected in [`ReconcileOutcome::failures`].
pub fn reconcile(
    output_root: &Path,
    rules: &ExclusionRules,
    tracked: &HashSet<PathBuf>,
    opts: SweepOptions,
    listener: &dyn CleanListener,
) -> Result<ReconcileOutcome> {
    let entries = fs::read_dir(output_root)
        .wrap_err_with(|| format!("failed to read '{}'", output_root.display()))?;

    let mut reconciler = Reconciler {
        output_root,
        rules,
        tracked,
        opts,
        listener,
        outcome: ReconcileOutcome::default(),
    };
    reconciler.visit(output_root, Path::new(""), entries);
    Ok(reconciler.outcome)
}

struct Reconciler<'a> {
    output_root: &'a Path,
    rules: &'a ExclusionRules,
    tracked: &'a HashSet<PathBuf>,
    opts: SweepOptions,
    listener: &'a dyn CleanListener,
    outcome: ReconcileOutcome,
}

impl Reconciler<'_> {
    fn visit(&mut self, dir: &Path, relative_dir: &Path, entries: ReadDir) {
        let mut found = BTreeSet::new();
        let mut subdirs = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    self.fail(dir.to_path_buf(), error);
                    continue;
                }
            };
            let relative = relative_dir.join(entry.file_name());
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());

            if is_dir {
                subdirs.push(relative);
            } else if !self.rules.is_excluded(&relative, EntryKind::File) {
                found.insert(entry.path());
            }
        }

        let (tracked_here, untracked): (Vec<_>, Vec<_>) =
            found.into_iter().partition(|p| self.tracked.contains(p));

        for path in untracked {
            self.remove(path);
        }
        if self.opts.force {
            for path in tracked_here {
                self.remove(path);
            }
        }

        subdirs.retain(|sub| {
            let excluded = self.rules.is_excluded(sub, EntryKind::Dir);
            if excluded {
                tracing::debug!("skipping excluded directory {}", sub.display());
            }
            !excluded
        });
        subdirs.sort();

        for sub in subdirs {
            let path = self.output_root.join(&sub);
            match fs::read_dir(&path) {
                Ok(entries) => self.visit(&path, &sub, entries),
                Err(error) => self.fail(path, error),
            }
        }
    }

    fn remove(&mut self, path: PathBuf) {
        if !self.opts.dry_run {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!("{} already gone", path.display());
                }
                Err(error) => {
                    self.fail(path, error);
                    return;
                }
            }
        }

        tracing::info!("   remove {}", path.display());
        self.listener.on_event(&CleanEvent::Removed(path.clone()));
        self.outcome.removed.insert(path);
    }

    fn fail(&mut self, path: PathBuf, error: io::Error) {
        tracing::warn!("cannot clean {}: {}", path.display(), error);
        self.outcome.failures.push(RemovalFailure { path, error });
    }
}
