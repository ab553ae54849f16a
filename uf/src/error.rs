//! Error and diagnostic types

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while obtaining a reference document
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Could not find user cache dir")]
    CacheUnavailable,

    #[error("Could not make cache dir {path}")]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not fetch {url}: {reason}")]
    FetchFailed {
        url: String,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Could not write cache file {path}")]
    CacheWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not open cache file {path}")]
    CacheReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProviderError {
    /// Build a FetchFailed from any underlying error
    pub fn fetch_failed<E>(url: &str, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::FetchFailed {
            url: url.to_string(),
            reason: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Fatal errors raised by a search
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Failed to read document at line {line_nr}")]
    Read {
        line_nr: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Non-fatal problem found while parsing; the offending line or record is skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Line did not have the expected number of tab-separated fields
    MalformedLine {
        line_nr: usize,
        expected: usize,
        found: usize,
        line: String,
    },

    /// Code-point field was not valid hexadecimal
    InvalidCodePoint { line_nr: usize, text: String },
}

impl Diagnostic {
    pub fn line_nr(&self) -> usize {
        match self {
            Diagnostic::MalformedLine { line_nr, .. } | Diagnostic::InvalidCodePoint { line_nr, .. } => *line_nr,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedLine {
                line_nr,
                expected,
                found,
                line,
            } => write!(
                f,
                "line {}: invalid format, expected {} fields, got {}: {:?}",
                line_nr, expected, found, line
            ),
            Diagnostic::InvalidCodePoint { line_nr, text } => {
                write!(f, "line {}: invalid code point {:?}", line_nr, text)
            }
        }
    }
}
