//! Pipeline orchestrator.

use eyre::{Context, Result, eyre};
use sweep_core::{BuildListener, OutputFile, WriteOptions};
use sweep_manifest::SitePaths;

use crate::{BuildSummary, sources::collect_sources};

/// The build pipeline.
///
/// Mirrors the source tree into the output tree, notifying each registered
/// listener of every output path the build accounts for. Listeners are
/// borrowed so callers keep ownership of whatever they accumulate.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().listener(&tracker);
/// let summary = pipeline.run(paths, BuildOptions { dry_run: true, force: false })?;
/// ```
#[derive(Default)]
pub struct Pipeline<'a> {
    listeners: Vec<&'a dyn BuildListener>,
}

impl<'a> Pipeline<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener to receive build events.
    pub fn listener(mut self, listener: &'a dyn BuildListener) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Run the build.
    ///
    /// # Errors
    ///
    /// Returns an error if the source directory is missing or a file cannot
    /// be read or written.
    pub fn run(&self, paths: &SitePaths, opts: WriteOptions) -> Result<BuildSummary> {
        if !paths.source_dir.is_dir() {
            return Err(eyre!(
                "source directory '{}' does not exist",
                paths.source_dir.display()
            ));
        }

        let mut summary = BuildSummary::default();
        for relative in collect_sources(&paths.source_dir)? {
            let file = OutputFile::new(
                paths.source_dir.join(&relative),
                paths.output_dir.join(&relative),
            );
            let result = file
                .write(opts)
                .wrap_err_with(|| format!("failed to build '{}'", relative.display()))?;

            let event = result.into_event(file.target().to_path_buf());
            tracing::info!("{:>9} {}", event.verb(), relative.display());
            for listener in &self.listeners {
                listener.on_event(&event);
            }
            summary.record(event);
        }

        Ok(summary)
    }
}
