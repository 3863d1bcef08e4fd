use std::path::{Component, Path, PathBuf};

use crate::{Manifest, Result, SourceContext};

/// Absolute, validated locations derived from a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePaths {
    /// Directory containing sweep.toml
    pub project_root: PathBuf,
    /// Absolute source directory
    pub source_dir: PathBuf,
    /// Absolute output root
    pub output_dir: PathBuf,
}

impl SitePaths {
    /// Resolve the manifest's directories against `project_root`.
    ///
    /// Rejects output directories that contain the project or the sources,
    /// or that live inside the sources, since cleaning them would delete
    /// user files.
    pub fn resolve(manifest: &Manifest, project_root: &Path, ctx: &SourceContext) -> Result<Self> {
        let project_root = normalize(project_root);
        let source_dir = normalize(&project_root.join(&manifest.source_dir));
        let output_dir = normalize(&project_root.join(&manifest.output_dir));

        if project_root.starts_with(&output_dir) {
            return Err(ctx.unsafe_output_dir(&output_dir, "contains the project directory"));
        }
        if source_dir.starts_with(&output_dir) {
            return Err(ctx.unsafe_output_dir(&output_dir, "contains source_dir"));
        }
        if output_dir.starts_with(&source_dir) {
            return Err(ctx.unsafe_output_dir(&output_dir, "is inside source_dir"));
        }

        Ok(Self {
            project_root,
            source_dir,
            output_dir,
        })
    }
}

/// Lexically normalize an absolute path, folding `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
