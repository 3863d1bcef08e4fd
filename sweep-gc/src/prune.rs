//! Removal of directories left empty after reconciling.

use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};

use sweep_core::{CleanEvent, CleanListener};

use crate::{EntryKind, ExclusionRules, RemovalFailure};

/// Result of a prune pass.
#[derive(Debug, Default)]
pub struct PruneOutcome {
    /// Directories removed, or that would be removed in a dry run.
    pub pruned: BTreeSet<PathBuf>,
    pub failures: Vec<RemovalFailure>,
}

/// Remove every empty directory below `output_root`, deepest first, so
/// nested empty trees collapse completely. The root itself is kept, and
/// excluded directories are neither entered nor removed.
///
/// Must run after all file removals. A dry run changes nothing on disk and
/// treats the files in `removed` as already gone, so it reports the same
/// directories a real run would prune.
pub fn prune_empty(
    output_root: &Path,
    rules: &ExclusionRules,
    removed: &BTreeSet<PathBuf>,
    dry_run: bool,
    listener: &dyn CleanListener,
) -> PruneOutcome {
    let mut pruner = Pruner {
        output_root,
        rules,
        removed,
        dry_run,
        listener,
        outcome: PruneOutcome::default(),
    };
    pruner.visit(output_root, Path::new(""));
    pruner.outcome
}

struct Pruner<'a> {
    output_root: &'a Path,
    rules: &'a ExclusionRules,
    removed: &'a BTreeSet<PathBuf>,
    dry_run: bool,
    listener: &'a dyn CleanListener,
    outcome: PruneOutcome,
}

impl Pruner<'_> {
    /// Prune below `dir` and report whether `dir` is now (or, in a dry run,
    /// would be) empty.
    fn visit(&mut self, dir: &Path, relative_dir: &Path) -> bool {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return true,
            Err(error) => {
                self.fail(dir.to_path_buf(), error);
                return false;
            }
        };

        let mut empty = true;
        let mut subdirs = Vec::new();
        for entry in entries {
            let Ok(entry) = entry else {
                empty = false;
                continue;
            };
            let relative = relative_dir.join(entry.file_name());

            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                if self.rules.is_excluded(&relative, EntryKind::Dir) {
                    empty = false;
                } else {
                    subdirs.push(relative);
                }
            } else if !(self.dry_run && self.removed.contains(&entry.path())) {
                empty = false;
            }
        }
        subdirs.sort();

        for sub in subdirs {
            let path = self.output_root.join(&sub);
            let now_empty = self.visit(&path, &sub);
            if !self.prune(path, now_empty) {
                empty = false;
            }
        }
        empty
    }

    /// Remove `dir`, returning whether it is gone afterwards.
    fn prune(&mut self, dir: PathBuf, empty: bool) -> bool {
        if self.dry_run {
            if empty {
                self.record(dir);
            }
            return empty;
        }

        match fs::remove_dir(&dir) {
            Ok(()) => {
                self.record(dir);
                true
            }
            Err(e) if e.kind() == io::ErrorKind::DirectoryNotEmpty => false,
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(error) => {
                self.fail(dir, error);
                false
            }
        }
    }

    fn record(&mut self, dir: PathBuf) {
        tracing::info!("    prune {}", dir.display());
        self.listener.on_event(&CleanEvent::Pruned(dir.clone()));
        self.outcome.pruned.insert(dir);
    }

    fn fail(&mut self, dir: PathBuf, error: io::Error) {
        tracing::warn!("cannot prune {}: {}", dir.display(), error);
        self.outcome.failures.push(RemovalFailure { path: dir, error });
    }
}
