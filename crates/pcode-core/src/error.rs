//! Error types shared by the p-code crates.

use thiserror::Error;

/// An encoding profile name that is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown encoding profile '{name}' (expected 'word-aligned' or 'byte-compressed')")]
pub struct ProfileParseError {
    pub name: String,
}
