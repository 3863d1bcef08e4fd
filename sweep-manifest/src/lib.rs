// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Manifest types and parsing for sweep.toml files.

mod error;
mod file;
mod manifest;
mod paths;

pub use error::{Error, Result, SourceContext};
pub use file::SweepToml;
pub use manifest::Manifest;
pub use paths::SitePaths;
