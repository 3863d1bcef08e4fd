use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Context, Result};

use crate::BuildEvent;

/// A source file and the output path it is rendered to.
#[derive(Debug, Clone)]
pub struct OutputFile {
    source: PathBuf,
    target: PathBuf,
}

/// How an output file should be written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Decide what would happen without touching the disk.
    pub dry_run: bool,
    /// Re-render even when the target is newer than the source.
    pub force: bool,
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// Target did not exist
    Created,
    /// Target existed with different content
    Updated,
    /// Target is up to date and was not re-rendered
    Skipped,
    /// Target was re-rendered and already had the same content
    Identical,
}

impl WriteResult {
    /// Turn this result into the build event for `path`.
    pub fn into_event(self, path: PathBuf) -> BuildEvent {
        match self {
            Self::Created => BuildEvent::Created(path),
            Self::Updated => BuildEvent::Updated(path),
            Self::Skipped => BuildEvent::Skipped(path),
            Self::Identical => BuildEvent::Identical(path),
        }
    }
}

impl OutputFile {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Get the output path
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Check if the output file exists
    pub fn exists(&self) -> bool {
        self.target.exists()
    }

    /// Render the source into the target.
    ///
    /// In a dry run the result is computed exactly as for a real run but
    /// nothing is written.
    pub fn write(&self, opts: WriteOptions) -> Result<WriteResult> {
        if !self.exists() {
            if !opts.dry_run {
                self.copy()?;
            }
            return Ok(WriteResult::Created);
        }

        if !opts.force && self.is_up_to_date()? {
            return Ok(WriteResult::Skipped);
        }

        let content = self.read_source()?;
        let current = fs::read(&self.target)
            .wrap_err_with(|| format!("failed to read '{}'", self.target.display()))?;
        if current == content {
            return Ok(WriteResult::Identical);
        }

        if !opts.dry_run {
            write_file(&self.target, &content)?;
        }
        Ok(WriteResult::Updated)
    }

    fn is_up_to_date(&self) -> Result<bool> {
        let source = modified(&self.source)?;
        let target = modified(&self.target)?;
        Ok(target >= source)
    }

    fn read_source(&self) -> Result<Vec<u8>> {
        fs::read(&self.source).wrap_err_with(|| format!("failed to read '{}'", self.source.display()))
    }

    fn copy(&self) -> Result<()> {
        let content = self.read_source()?;
        write_file(&self.target, &content)
    }
}

fn modified(path: &Path) -> Result<std::time::SystemTime> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .wrap_err_with(|| format!("failed to stat '{}'", path.display()))
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    fs::write(path, content).wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use tempfile::TempDir;

    use super::*;

    fn set_mtime(path: &Path, time: SystemTime) {
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("c").join("test.txt");

        write_file(&path, b"nested").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_write_creates_missing_target() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("index.md");
        let target = temp.path().join("out").join("index.html");
        fs::write(&source, "hello").unwrap();

        let result = OutputFile::new(&source, &target)
            .write(WriteOptions::default())
            .unwrap();

        assert_eq!(result, WriteResult::Created);
        assert_eq!(fs::read_to_string(&target).unwrap(), "hello");
    }

    #[test]
    fn test_dry_run_reports_created_without_writing() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("index.md");
        let target = temp.path().join("out").join("index.html");
        fs::write(&source, "hello").unwrap();

        let opts = WriteOptions {
            dry_run: true,
            force: false,
        };
        let result = OutputFile::new(&source, &target).write(opts).unwrap();

        assert_eq!(result, WriteResult::Created);
        assert!(!target.exists());
    }

    #[test]
    fn test_write_skips_up_to_date_target() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("a.md");
        let target = temp.path().join("a.html");
        fs::write(&source, "new").unwrap();
        fs::write(&target, "old").unwrap();
        let now = SystemTime::now();
        set_mtime(&source, now - Duration::from_secs(60));
        set_mtime(&target, now);

        let result = OutputFile::new(&source, &target)
            .write(WriteOptions::default())
            .unwrap();

        assert_eq!(result, WriteResult::Skipped);
        assert_eq!(fs::read_to_string(&target).unwrap(), "old");
    }

    #[test]
    fn test_write_updates_stale_target() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("a.md");
        let target = temp.path().join("a.html");
        fs::write(&target, "old").unwrap();
        fs::write(&source, "new").unwrap();
        let now = SystemTime::now();
        set_mtime(&target, now - Duration::from_secs(60));
        set_mtime(&source, now);

        let result = OutputFile::new(&source, &target)
            .write(WriteOptions::default())
            .unwrap();

        assert_eq!(result, WriteResult::Updated);
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn test_forced_write_detects_identical_content() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("a.md");
        let target = temp.path().join("a.html");
        fs::write(&source, "same").unwrap();
        fs::write(&target, "same").unwrap();

        let opts = WriteOptions {
            dry_run: false,
            force: true,
        };
        let result = OutputFile::new(&source, &target).write(opts).unwrap();

        assert_eq!(result, WriteResult::Identical);
    }

    #[test]
    fn test_into_event_keeps_path() {
        let event = WriteResult::Updated.into_event(PathBuf::from("/out/a.html"));
        assert_eq!(event, BuildEvent::Updated(PathBuf::from("/out/a.html")));
    }
}
