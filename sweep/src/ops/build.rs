//! Build operation - mirror the source tree into the output tree.

use eyre::{Context, Result};
use sweep_build::{BuildOptions, Pipeline};
use sweep_manifest::SitePaths;

use super::display_relative;
use crate::reports::BuildReport;

/// Execute the build operation.
pub fn build(paths: &SitePaths, opts: BuildOptions) -> Result<BuildReport> {
    let summary = Pipeline::new()
        .run(paths, opts)
        .wrap_err("Build failed")?;

    let relative = |files: &[std::path::PathBuf]| -> Vec<String> {
        files
            .iter()
            .map(|p| display_relative(p, &paths.project_root))
            .collect()
    };

    Ok(BuildReport {
        dry_run: opts.dry_run,
        output_dir: display_relative(&paths.output_dir, &paths.project_root),
        created: relative(&summary.created),
        updated: relative(&summary.updated),
        unchanged: summary.skipped.len() + summary.identical.len(),
    })
}
