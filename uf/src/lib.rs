//! unifind - find Unicode characters by name
//!
//! Searches the Unicode Character Database `NamesList.txt`, which lists every
//! assigned character grouped into blocks (categories) and subheadings
//! (subcategories), each with a name and annotation lines.
//!
//! # Architecture
//!
//! ```text
//! query ──> Finder ──> DocumentProvider ──> ~/.cache/unifind/ucd/NamesList.txt
//!              │                               (downloaded once)
//!              └────> parser ──> Line::classify ──> ParserState ──> SearchOutcome
//! ```
//!
//! A character matches when every query term occurs in one of its description
//! lines, or every term occurs in its block name or subheading.
//!
//! # Example
//!
//! ```ignore
//! use unifind::{DocumentProvider, Finder, HttpFetcher, Sources};
//!
//! let provider = DocumentProvider::from_user_cache_dir(HttpFetcher::default())?;
//! let finder = Finder::new(provider, Sources::default());
//! for rec in finder.search("capital omega")?.records {
//!     println!("{} {}", rec.glyph(), rec.description());
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod finder;
pub mod index;
pub mod line;
pub mod output;
pub mod parser;
pub mod provider;
pub mod query;
pub mod record;

pub use error::{Diagnostic, ProviderError, SearchError};
pub use exclusion::{DEFAULT_EXCLUDED_CATEGORIES, ExclusionPolicy};
pub use finder::{Finder, Sources};
pub use index::search_index;
pub use line::Line;
pub use output::{OutputMode, distinct_categories, has_output, render};
pub use parser::{SearchOutcome, search_names_list};
pub use provider::{DocumentProvider, Fetcher, HttpFetcher, default_cache_dir};
pub use query::Query;
pub use record::{Category, CharacterRecord};

/// Application name, used for cache and config directories
pub const APP_NAME: &str = "unifind";

/// Canonical location of the names list
pub const NAMES_LIST_URL: &str = "https://www.unicode.org/Public/UCD/latest/ucd/NamesList.txt";

/// Canonical location of the name index
pub const INDEX_URL: &str = "https://www.unicode.org/Public/UCD/latest/ucd/Index.txt";

/// Default download timeout (2 minutes)
pub const DEFAULT_TIMEOUT_MS: u64 = 120_000;
