//! Source tree discovery.

use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Context, Result};

/// List every file under `dir`, as paths relative to it, sorted.
pub(crate) fn collect_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    scan(dir, Path::new(""), &mut files)?;
    files.sort();
    Ok(files)
}

fn scan(dir: &Path, prefix: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).wrap_err_with(|| format!("failed to read '{}'", dir.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let relative = prefix.join(entry.file_name());

        if path.is_dir() {
            scan(&path, &relative, files)?;
        } else {
            files.push(relative);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_collect_sources_is_recursive_and_sorted() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("posts/2024")).unwrap();
        fs::write(temp.path().join("index.md"), "").unwrap();
        fs::write(temp.path().join("posts/2024/hello.md"), "").unwrap();
        fs::write(temp.path().join("about.md"), "").unwrap();

        let files = collect_sources(temp.path()).unwrap();

        assert_eq!(
            files,
            vec![
                PathBuf::from("about.md"),
                PathBuf::from("index.md"),
                PathBuf::from("posts/2024/hello.md"),
            ]
        );
    }

    #[test]
    fn test_collect_sources_missing_dir_fails() {
        let temp = TempDir::new().unwrap();
        assert!(collect_sources(&temp.path().join("nope")).is_err());
    }
}
