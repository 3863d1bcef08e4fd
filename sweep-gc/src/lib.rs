//! Garbage collection for generated output trees.
//!
//! A sweep runs in three strictly sequential phases:
//!
//! 1. a silent rebuild fills a [`TrackedPaths`] accumulator with every path
//!    the build says should exist ([`track_build`]),
//! 2. the [`reconcile`] walk removes files on disk that were not tracked
//!    (and tracked ones too when forced), skipping anything matched by the
//!    [`ExclusionRules`],
//! 3. [`prune_empty`] removes directories left empty by step 2.
//!
//! [`sweep`] runs all three. The output tree must not be modified by
//! anything else while a sweep runs; nothing here locks it.

mod prune;
mod reconcile;
mod rules;
mod sweep;
mod tracker;

pub use prune::{PruneOutcome, prune_empty};
pub use reconcile::{ReconcileOutcome, RemovalFailure, reconcile};
pub use rules::{EntryKind, ExclusionRule, ExclusionRules, Pattern};
pub use sweep::{SweepOptions, SweepOutcome, sweep};
pub use tracker::{SILENT_REBUILD, TrackedPaths, track_build};
