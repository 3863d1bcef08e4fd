//! Core types for the sweep output builder.
//!
//! This crate provides the output file model and the events emitted while
//! building and cleaning an output tree.

mod event;
mod file;

// Events
pub use event::{BuildEvent, BuildListener, CleanEvent, CleanListener};
// File operations
pub use file::{OutputFile, WriteOptions, WriteResult};
