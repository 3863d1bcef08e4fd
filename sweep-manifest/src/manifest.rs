use std::{path::PathBuf, str::FromStr};

use serde::Deserialize;

use crate::{Result, SourceContext};

fn default_source_dir() -> PathBuf {
    PathBuf::from("content")
}

/// Root manifest for sweep.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Directory whose files are mirrored into the output tree
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Directory holding generated output; the tree `sweep clean` operates on
    pub output_dir: PathBuf,

    /// Patterns protecting output paths from removal, evaluated in order
    #[serde(default)]
    pub output_ignore: Vec<String>,
}

impl FromStr for Manifest {
    type Err = Box<crate::Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "sweep.toml")
    }
}

impl Manifest {
    /// Parse a sweep.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let manifest: Manifest = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
        manifest.validate(&ctx)?;
        Ok(manifest)
    }

    fn validate(&self, ctx: &SourceContext) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ctx.validation_error("output_dir", "output_dir must not be empty"));
        }
        if self.source_dir.as_os_str().is_empty() {
            return Err(ctx.validation_error("source_dir", "source_dir must not be empty"));
        }
        for (i, pattern) in self.output_ignore.iter().enumerate() {
            if pattern.is_empty() || pattern == "/" {
                return Err(ctx.validation_error(
                    "output_ignore",
                    format!("output_ignore[{}] is not a usable pattern", i),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest: Manifest = "output_dir = \"public\"".parse().unwrap();

        assert_eq!(manifest.output_dir, PathBuf::from("public"));
        assert_eq!(manifest.source_dir, PathBuf::from("content"));
        assert!(manifest.output_ignore.is_empty());
    }

    #[test]
    fn test_parse_keeps_ignore_order() {
        let manifest: Manifest = r#"
            source_dir = "pages"
            output_dir = "out"
            output_ignore = ["/CNAME", "*.bak", ".git/"]
        "#
        .parse()
        .unwrap();

        assert_eq!(manifest.output_ignore, vec!["/CNAME", "*.bak", ".git/"]);
    }

    #[test]
    fn test_missing_output_dir_is_parse_error() {
        let err = "source_dir = \"pages\"".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = "output_dir = \"out\"\noutput_ignroe = []"
            .parse::<Manifest>()
            .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_empty_output_dir_is_validation_error() {
        let err = "output_dir = \"\"".parse::<Manifest>().unwrap_err();

        match *err {
            Error::Validation { message, span, .. } => {
                assert_eq!(message, "output_dir must not be empty");
                assert!(span.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
