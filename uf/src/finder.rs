//! Finder: provider and parsers wired together

use std::io::BufReader;

use tracing::debug;

use crate::error::SearchError;
use crate::exclusion::ExclusionPolicy;
use crate::index::search_index;
use crate::parser::{SearchOutcome, search_names_list};
use crate::provider::{DocumentProvider, Fetcher, HttpFetcher};
use crate::query::Query;

/// Where each reference document is downloaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    pub names_list_url: String,
    pub index_url: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            names_list_url: crate::NAMES_LIST_URL.to_string(),
            index_url: crate::INDEX_URL.to_string(),
        }
    }
}

/// Runs one query against a cached reference document
pub struct Finder<F = HttpFetcher> {
    provider: DocumentProvider<F>,
    sources: Sources,
    exclusions: ExclusionPolicy,
}

impl<F: Fetcher> Finder<F> {
    pub fn new(provider: DocumentProvider<F>, sources: Sources) -> Self {
        Self {
            provider,
            sources,
            exclusions: ExclusionPolicy::default(),
        }
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionPolicy) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Search the names list; an empty query matches every non-excluded character
    pub fn search(&self, query: &str) -> Result<SearchOutcome, SearchError> {
        debug!(%query, "Finder::search: called");
        let file = self.provider.fetch(&self.sources.names_list_url)?;
        search_names_list(BufReader::new(file), &Query::parse(query), &self.exclusions)
    }

    /// Search the flat name index
    pub fn search_index(&self, query: &str) -> Result<SearchOutcome, SearchError> {
        debug!(%query, "Finder::search_index: called");
        let file = self.provider.fetch(&self.sources.index_url)?;
        search_index(BufReader::new(file), &Query::parse(query))
    }
}
