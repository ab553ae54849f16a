//! Rendering of search results

use std::collections::BTreeSet;
use std::io::{self, Write};

use crate::record::CharacterRecord;

/// How matches are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// The character alone
    #[default]
    Glyph,
    /// `U+XXXX`
    CodePoint,
    /// Character and its name
    Verbose,
    /// Character with name, category, subcategory and block bounds
    Full,
    /// Sorted distinct category names instead of characters
    Categories,
}

/// Sorted, de-duplicated category names of the given records
pub fn distinct_categories(records: &[CharacterRecord]) -> Vec<&str> {
    records
        .iter()
        .map(|r| r.category.name.as_str())
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Whether `render` would print anything for these records
pub fn has_output(records: &[CharacterRecord], mode: OutputMode) -> bool {
    match mode {
        OutputMode::Categories => !distinct_categories(records).is_empty(),
        _ => !records.is_empty(),
    }
}

pub fn render<W: Write>(out: &mut W, records: &[CharacterRecord], mode: OutputMode) -> io::Result<()> {
    if mode == OutputMode::Categories {
        for name in distinct_categories(records) {
            writeln!(out, "{}", name)?;
        }
        return Ok(());
    }

    for rec in records {
        match mode {
            OutputMode::Glyph => writeln!(out, "{}", rec.glyph())?,
            OutputMode::CodePoint => writeln!(out, "{}", rec.notation())?,
            OutputMode::Verbose => writeln!(out, "{} {}", rec.glyph(), rec.description())?,
            OutputMode::Full => writeln!(
                out,
                "{} name={:?} category={:?} subcategory={:?} from={:?} to={:?}",
                rec.glyph(),
                rec.description(),
                rec.category.name,
                rec.subcategory,
                rec.category.start,
                rec.category.end
            )?,
            // listed above
            OutputMode::Categories => {}
        }
    }
    Ok(())
}
