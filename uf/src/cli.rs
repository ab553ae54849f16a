//! CLI argument parsing for unifind

use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

use crate::output::OutputMode;

#[derive(Parser, Debug)]
#[command(name = "unifind")]
#[command(author, version, about = "Find Unicode characters by name", long_about = None)]
pub struct Cli {
    /// Print the code point only (U+XXXX)
    #[arg(short = 'c', long = "code")]
    pub code: bool,

    /// Print the character with its name; repeat (-vv) for all fields
    ///
    /// Occurrences add up, so `-v -vv` counts three and prints all fields.
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Print the sorted categories of the matches instead of characters
    #[arg(long)]
    pub cats: bool,

    /// Search Index.txt instead of NamesList.txt
    #[arg(short = 'i', long)]
    pub index: bool,

    /// Path to config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Directory holding the downloaded documents
    #[arg(long = "cache-dir")]
    pub cache_dir: Option<PathBuf>,

    /// Search terms; every term must match
    pub query: Vec<String>,
}

impl Cli {
    /// Query words joined with single spaces
    pub fn query(&self) -> String {
        self.query.join(" ")
    }

    pub fn output_mode(&self) -> OutputMode {
        if self.cats {
            OutputMode::Categories
        } else if self.code {
            OutputMode::CodePoint
        } else {
            match self.verbose {
                0 => OutputMode::Glyph,
                1 => OutputMode::Verbose,
                _ => OutputMode::Full,
            }
        }
    }
}

/// Caller-level outcomes that end a run unsuccessfully
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("Missing query: give search terms, or a flag to list everything")]
    MissingQuery,

    #[error("Not found")]
    NoMatches,
}

impl RunError {
    /// grep convention: 1 for no match, 2 for trouble
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::NoMatches => 1,
            RunError::MissingQuery => 2,
        }
    }
}

/// Rewrite single-dash long flags (`-cats`) to the spelling clap expects
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut seen_separator = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if seen_separator {
                return arg;
            }
            let replacement = match arg.to_str() {
                Some("--") => {
                    seen_separator = true;
                    None
                }
                Some("-cats") => Some("--cats"),
                Some("--c") => Some("--code"),
                Some("--v") => Some("-v"),
                Some("--vv") => Some("-vv"),
                _ => None,
            };
            replacement.map(OsString::from).unwrap_or(arg)
        })
        .collect()
}
