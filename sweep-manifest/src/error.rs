use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Carries the manifest content and filename so error factories can attach
/// a [`NamedSource`] without threading both through every call.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Find the span of a top-level `key = value` assignment.
    pub fn key_span(&self, key: &str) -> Option<SourceSpan> {
        let mut offset = 0;
        for line in self.src.split_inclusive('\n') {
            let trimmed = line.trim_start();
            let is_assignment = trimmed
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='));
            if is_assignment {
                let start = offset + (line.len() - trimmed.len());
                let len = line.trim_end().len() - (line.len() - trimmed.len());
                return Some(SourceSpan::from((start, len)));
            }
            offset += line.len();
        }
        None
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error pointing at `key` when it can be found.
    pub fn validation_error(&self, key: &str, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: self.key_span(key),
            message: message.into(),
        })
    }

    /// Create an error for an output directory that would be unsafe to clean.
    pub fn unsafe_output_dir(&self, path: impl Into<PathBuf>, reason: impl Into<String>) -> Box<Error> {
        Box::new(Error::UnsafeOutputDir {
            src: self.named_source(),
            span: self.key_span("output_dir"),
            path: path.into(),
            reason: reason.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a sweep.toml with at least `output_dir = \"output\"`"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sweep.toml")]
    #[diagnostic(code(sweep::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(sweep::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("refusing to use '{path}' as output directory")]
    #[diagnostic(
        code(sweep::unsafe_output_dir),
        help("point output_dir at a dedicated directory, e.g. `output_dir = \"output\"`")
    )]
    UnsafeOutputDir {
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: Option<SourceSpan>,
        path: PathBuf,
        reason: String,
    },
}
