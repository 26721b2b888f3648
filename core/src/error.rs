//! Error types surfaced by the catalog core.
//!
//! Every failure that concerns a document carries the document's pid and the
//! offending field, so a caller can always point at the record to fix.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the normalizer configuration.
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// `global()` was called before `init_global()`.
    #[error("normalizer configuration not initialized; call init_global first")]
    NotInitialized,

    #[error("failed to read stopword list {}: {source}", .path.display())]
    Stopwords {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A document that cannot be split into metadata and info-index records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("document {pid}: missing required field `{field}`")]
    MissingField { pid: String, field: &'static str },

    #[error("document {pid}: field `{field}` {reason}")]
    InvalidField {
        pid: String,
        field: &'static str,
        reason: String,
    },
}

impl ExtractError {
    pub fn pid(&self) -> &str {
        match self {
            ExtractError::MissingField { pid, .. } | ExtractError::InvalidField { pid, .. } => pid,
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            ExtractError::MissingField { field, .. }
            | ExtractError::InvalidField { field, .. } => field,
        }
    }
}

/// Failures while reading a corpus file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid JSON on line {line} of {}: {source}", .path.display())]
    JsonLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: top-level JSON must be an array of objects or a single object", .path.display())]
    UnsupportedShape { path: PathBuf },

    #[error("{}: record {position} is not a JSON object", .path.display())]
    NotAnObject { path: PathBuf, position: usize },

    #[error("{}: record {position} has no string `pid`", .path.display())]
    MissingPid { path: PathBuf, position: usize },

    #[error("{}: duplicate pid {pid}", .path.display())]
    DuplicatePid { path: PathBuf, pid: String },
}

/// An unrecognised textual field name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown text field `{0}` (expected one of: title, description, brand, category, sub_category, seller)")]
pub struct UnknownField(pub String);
