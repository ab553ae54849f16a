//! Index.txt search
//!
//! The UCD index is a flat list of `name<TAB>code` lines. Several names may
//! point at the same code point; each matching line is reported.

use std::io::BufRead;

use tracing::debug;

use crate::error::{Diagnostic, SearchError};
use crate::line::DATA_FIELDS;
use crate::parser::{SearchOutcome, scan_lines};
use crate::query::Query;
use crate::record::{Category, CharacterRecord};

/// Search an Index.txt document for names matching `query`
pub fn search_index<R: BufRead>(reader: R, query: &Query) -> Result<SearchOutcome, SearchError> {
    debug!(terms = ?query.terms(), "search_index: called");
    let mut outcome = SearchOutcome::default();

    scan_lines(reader, |line_nr, line| {
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() != DATA_FIELDS {
            outcome.diagnose(Diagnostic::MalformedLine {
                line_nr,
                expected: DATA_FIELDS,
                found: parts.len(),
                line: line.to_string(),
            });
            return;
        }

        let code_point = match u32::from_str_radix(parts[1], 16) {
            Ok(cp) => cp,
            Err(_) => {
                outcome.diagnose(Diagnostic::InvalidCodePoint {
                    line_nr,
                    text: parts[1].to_string(),
                });
                return;
            }
        };

        let name = parts[0].to_lowercase();
        if query.matches_all(&[name.as_str()]) {
            outcome.records.push(CharacterRecord {
                code_point,
                lines: vec![name],
                category: Category::default(),
                subcategory: String::new(),
            });
        }
    })?;

    debug!(matches = outcome.records.len(), "search_index: done");
    Ok(outcome)
}
