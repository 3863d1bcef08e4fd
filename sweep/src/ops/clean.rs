//! Clean operation - remove output files the build no longer produces.

use std::cell::RefCell;

use eyre::Result;
use sweep_build::Pipeline;
use sweep_core::CleanEvent;
use sweep_gc::{ExclusionRules, SILENT_REBUILD, SweepOptions, sweep};
use sweep_manifest::SweepToml;

use super::display_relative;
use crate::reports::CleanReport;

/// Execute the clean operation.
///
/// Rebuilds silently to learn which outputs are still produced, then
/// removes everything else under the output directory that `output_ignore`
/// does not protect.
pub fn clean(sweep_toml: &SweepToml, opts: SweepOptions) -> Result<CleanReport> {
    let paths = sweep_toml.paths();
    tracing::debug!("cleaning with {}", sweep_toml.path().display());
    let rules = ExclusionRules::parse(&sweep_toml.manifest().output_ignore);
    let relative = |p: &std::path::Path| display_relative(p, &paths.project_root);

    let events = RefCell::new(Vec::new());
    let outcome = sweep(
        &paths.output_dir,
        &rules,
        opts,
        |listener| {
            Pipeline::new()
                .listener(listener)
                .run(paths, SILENT_REBUILD)
                .map(|_| ())
        },
        &|event: &CleanEvent| events.borrow_mut().push(event.clone()),
    )?;

    let mut report = CleanReport {
        dry_run: opts.dry_run,
        output_dir: relative(&paths.output_dir),
        tracked: outcome.tracked,
        removed: Vec::new(),
        pruned: Vec::new(),
        failures: outcome
            .failures
            .iter()
            .map(|f| format!("{}: {}", relative(&f.path), f.error))
            .collect(),
    };
    for event in events.into_inner() {
        match event {
            CleanEvent::Removed(path) => report.removed.push(relative(&path)),
            CleanEvent::Pruned(path) => report.pruned.push(relative(&path)),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use tempfile::TempDir;

    use super::*;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, relative).unwrap();
    }

    /// A project whose output holds one live page, two stale ones and a
    /// protected CNAME file.
    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("sweep.toml"),
            "output_dir = \"public\"\noutput_ignore = [\"/CNAME\"]\n",
        )
        .unwrap();
        touch(temp.path(), "content/index.html");
        touch(temp.path(), "public/index.html");
        touch(temp.path(), "public/CNAME");
        touch(temp.path(), "public/stale.html");
        touch(temp.path(), "public/old/gone.html");
        temp
    }

    #[test]
    fn test_clean_removes_stale_outputs() {
        let temp = project();
        let sweep_toml = SweepToml::open(temp.path().join("sweep.toml")).unwrap();

        let report = clean(&sweep_toml, SweepOptions::default()).unwrap();

        assert_eq!(report.output_dir, "public");
        assert_eq!(report.tracked, 1);
        assert_eq!(report.removed, vec!["public/stale.html", "public/old/gone.html"]);
        assert_eq!(report.pruned, vec!["public/old"]);
        assert!(!report.has_failures());
        assert!(temp.path().join("public/index.html").exists());
        assert!(temp.path().join("public/CNAME").exists());
        assert!(!temp.path().join("public/old").exists());
    }

    #[test]
    fn test_dry_run_leaves_the_tree_alone() {
        let temp = project();
        let sweep_toml = SweepToml::open(temp.path().join("sweep.toml")).unwrap();

        let opts = SweepOptions {
            force: false,
            dry_run: true,
        };
        let report = clean(&sweep_toml, opts).unwrap();

        assert!(report.dry_run);
        assert_eq!(report.removed.len(), 2);
        assert_eq!(report.pruned, vec!["public/old"]);
        assert!(temp.path().join("public/stale.html").exists());
        assert!(temp.path().join("public/old/gone.html").exists());
    }

    #[test]
    fn test_force_does_not_touch_source() {
        let temp = project();
        let sweep_toml = SweepToml::open(temp.path().join("sweep.toml")).unwrap();

        let opts = SweepOptions {
            force: true,
            dry_run: false,
        };
        let report = clean(&sweep_toml, opts).unwrap();

        assert!(report.removed.contains(&"public/index.html".to_string()));
        assert!(temp.path().join("content/index.html").exists());
        assert!(temp.path().join("public/CNAME").exists());
    }
}
