use std::path::{Path, PathBuf};

use crate::{Error, Manifest, Result, SitePaths, SourceContext};

/// Represents a sweep.toml file with its parsed manifest and resolved
/// directories.
#[derive(Debug)]
pub struct SweepToml {
    path: PathBuf,
    manifest: Manifest,
    paths: SitePaths,
}

impl SweepToml {
    /// Open, parse and resolve a sweep.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let io_error = |path: &Path, source| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        let path = std::path::absolute(path.as_ref()).map_err(|e| io_error(path.as_ref(), e))?;
        let content = std::fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        let project_root = path.parent().unwrap_or(Path::new("/"));
        let ctx = SourceContext::new(content.as_str(), filename);
        let paths = SitePaths::resolve(&manifest, project_root, &ctx)?;

        Ok(Self {
            path,
            manifest,
            paths,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Get the resolved directories.
    pub fn paths(&self) -> &SitePaths {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_open_resolves_against_config_dir() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("sweep.toml");
        fs::write(&config, "output_dir = \"public\"\noutput_ignore = [\"*.bak\"]\n").unwrap();

        let sweep_toml = SweepToml::open(&config).unwrap();

        assert_eq!(sweep_toml.path(), config);
        assert_eq!(sweep_toml.paths().output_dir, temp.path().join("public"));
        assert_eq!(sweep_toml.manifest().output_ignore, vec!["*.bak"]);
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = SweepToml::open(temp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
