//! NamesList parser and matcher
//!
//! Walks the document line by line, tracking the current category and
//! subcategory, and assembles each character's description block. A record
//! is only evaluated against the query once its block is complete: when the
//! next code-point line arrives, or at end of input.

use std::io::BufRead;

use tracing::{debug, error, trace, warn};

use crate::error::{Diagnostic, SearchError};
use crate::exclusion::ExclusionPolicy;
use crate::line::Line;
use crate::query::Query;
use crate::record::{Category, CharacterRecord};

/// Accepted records in document order, plus every non-fatal parse problem
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub records: Vec<CharacterRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn diagnose(&mut self, diag: Diagnostic) {
        match diag {
            Diagnostic::MalformedLine { .. } => warn!("{}", diag),
            Diagnostic::InvalidCodePoint { .. } => error!("{}", diag),
        }
        self.diagnostics.push(diag);
    }
}

/// Search a NamesList document for records matching `query`
pub fn search_names_list<R: BufRead>(
    reader: R,
    query: &Query,
    exclusions: &ExclusionPolicy,
) -> Result<SearchOutcome, SearchError> {
    debug!(terms = ?query.terms(), "search_names_list: called");
    let mut state = ParserState::new(query, exclusions);
    scan_lines(reader, |line_nr, line| state.feed(line_nr, line))?;
    let outcome = state.finish();
    debug!(
        matches = outcome.records.len(),
        diagnostics = outcome.diagnostics.len(),
        "search_names_list: done"
    );
    Ok(outcome)
}

/// Call `f` with each line (1-based number, line ending stripped)
pub(crate) fn scan_lines<R, F>(mut reader: R, mut f: F) -> Result<(), SearchError>
where
    R: BufRead,
    F: FnMut(usize, &str),
{
    let mut buf = Vec::with_capacity(256);
    let mut line_nr = 0;
    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| SearchError::Read {
                line_nr: line_nr + 1,
                source,
            })?;
        if n == 0 {
            return Ok(());
        }
        line_nr += 1;

        let text = String::from_utf8_lossy(&buf);
        let line = text.strip_suffix('\n').unwrap_or(&*text);
        let line = line.strip_suffix('\r').unwrap_or(line);
        f(line_nr, line);
    }
}

/// A record whose description block is still being collected
#[derive(Debug)]
struct OpenRecord {
    code: String,
    line_nr: usize,
    lines: Vec<String>,
    category: Category,
    subcategory: String,
}

/// Running parse context, owned by the scan loop
struct ParserState<'a> {
    query: &'a Query,
    exclusions: &'a ExclusionPolicy,
    category: Category,
    subcategory: String,
    open: Option<OpenRecord>,
    outcome: SearchOutcome,
}

impl<'a> ParserState<'a> {
    fn new(query: &'a Query, exclusions: &'a ExclusionPolicy) -> Self {
        Self {
            query,
            exclusions,
            category: Category::default(),
            subcategory: String::new(),
            open: None,
            outcome: SearchOutcome::default(),
        }
    }

    fn feed(&mut self, line_nr: usize, raw: &str) {
        let line = Line::classify(raw);

        if line.is_data() && self.exclusions.excludes(&self.category.name) {
            trace!(line_nr, category = %self.category.name, "ParserState::feed: excluded category");
            return;
        }

        match line {
            Line::SubcategoryMarker(label) => {
                self.subcategory = label.to_string();
            }
            Line::CategoryHeader { start, name, end } => {
                trace!(line_nr, %name, "ParserState::feed: new category");
                self.category = Category::new(name, start, end);
                self.subcategory.clear();
            }
            Line::CategoryDescription(text) => {
                self.category.push_description(text);
            }
            Line::Ignored => {}
            Line::Malformed { expected, found } => {
                self.outcome.diagnose(Diagnostic::MalformedLine {
                    line_nr,
                    expected,
                    found,
                    line: raw.to_string(),
                });
            }
            Line::Data { code: "", text } => match self.open.as_mut() {
                Some(record) => record.lines.push(text.to_lowercase()),
                None => debug!(line_nr, "ParserState::feed: continuation line with no open record"),
            },
            Line::Data { code, text } => {
                self.finalize();
                self.open = Some(OpenRecord {
                    code: code.to_string(),
                    line_nr,
                    lines: vec![text.to_lowercase()],
                    category: self.category.clone(),
                    subcategory: self.subcategory.clone(),
                });
            }
        }
    }

    /// Close the open record, if any, and evaluate it
    fn finalize(&mut self) {
        let Some(record) = self.open.take() else {
            return;
        };

        let code_point = match u32::from_str_radix(&record.code, 16) {
            Ok(cp) => cp,
            Err(_) => {
                self.outcome.diagnose(Diagnostic::InvalidCodePoint {
                    line_nr: record.line_nr,
                    text: record.code,
                });
                return;
            }
        };

        if self
            .query
            .accepts(record.lines.as_slice(), &record.category.name, &record.subcategory)
        {
            self.outcome.records.push(CharacterRecord {
                code_point,
                lines: record.lines,
                category: record.category,
                subcategory: record.subcategory,
            });
        }
    }

    fn finish(mut self) -> SearchOutcome {
        self.finalize();
        self.outcome
    }
}
