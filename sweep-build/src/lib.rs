//! Build pipeline for sweep.
//!
//! The pipeline mirrors every file under `source_dir` into `output_dir` and
//! reports each output path to registered [`BuildListener`]s as a
//! [`BuildEvent`](sweep_core::BuildEvent).
//!
//! # Example
//!
//! ```ignore
//! use sweep_build::{BuildOptions, Pipeline};
//!
//! let summary = Pipeline::new()
//!     .listener(&tracker)
//!     .run(sweep_toml.paths(), BuildOptions::default())?;
//! println!("{} files written", summary.written());
//! ```

mod pipeline;
mod sources;
mod summary;

pub use pipeline::Pipeline;
pub use summary::BuildSummary;
pub use sweep_core::{BuildListener, WriteOptions as BuildOptions};
