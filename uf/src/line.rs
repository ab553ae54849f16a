//! Line classification for the NamesList format
//!
//! Each raw line is mapped to a [`Line`] variant before the parser acts on it.

const SUBCATEGORY_PREFIX: &str = "@\t\t";
const CATEGORY_PREFIX: &str = "@@\t";
const CATEGORY_DESCRIPTION_PREFIX: &str = "@+\t\t";

/// Number of tab-separated fields in a data line
pub const DATA_FIELDS: usize = 2;

/// Number of tab-separated fields in a category header
pub const HEADER_FIELDS: usize = 4;

/// A classified NamesList line, borrowing from the raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// `@\t\t<label>`
    SubcategoryMarker(&'a str),
    /// `@@\t<start>\t<name>\t<end>`
    CategoryHeader { start: &'a str, name: &'a str, end: &'a str },
    /// `@+\t\t<text>`
    CategoryDescription(&'a str),
    /// Blank lines, comments, other `@` lines and tab-indented notice text
    Ignored,
    /// `<code>\t<text>`; an empty code continues the open record
    Data { code: &'a str, text: &'a str },
    /// A header or data line with the wrong number of fields
    Malformed { expected: usize, found: usize },
}

impl<'a> Line<'a> {
    pub fn classify(line: &'a str) -> Self {
        if let Some(rest) = line.strip_prefix(SUBCATEGORY_PREFIX) {
            return Line::SubcategoryMarker(rest);
        }
        if line.starts_with(CATEGORY_PREFIX) {
            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() < HEADER_FIELDS {
                return Line::Malformed {
                    expected: HEADER_FIELDS,
                    found: parts.len(),
                };
            }
            return Line::CategoryHeader {
                start: parts[1],
                name: parts[2],
                end: parts[3],
            };
        }
        if let Some(rest) = line.strip_prefix(CATEGORY_DESCRIPTION_PREFIX) {
            return Line::CategoryDescription(rest);
        }
        if line.is_empty() || line.starts_with(';') || line.starts_with('@') || line.starts_with("\t\t") {
            return Line::Ignored;
        }

        let mut parts = line.split('\t');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(code), Some(text), None) => Line::Data { code, text },
            _ => Line::Malformed {
                expected: DATA_FIELDS,
                found: line.split('\t').count(),
            },
        }
    }

    /// Data-shaped lines are subject to the category exclusion filter
    pub fn is_data(&self) -> bool {
        matches!(
            self,
            Line::Data { .. }
                | Line::Malformed {
                    expected: DATA_FIELDS,
                    ..
                }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subcategory_marker() {
        assert_eq!(Line::classify("@\t\tControls"), Line::SubcategoryMarker("Controls"));
        assert_eq!(Line::classify("@\t\t"), Line::SubcategoryMarker(""));
    }

    #[test]
    fn test_category_header() {
        assert_eq!(
            Line::classify("@@\t0000\tBasic Latin\t007F"),
            Line::CategoryHeader {
                start: "0000",
                name: "Basic Latin",
                end: "007F"
            }
        );
    }

    #[test]
    fn test_short_category_header_is_malformed() {
        assert_eq!(
            Line::classify("@@\t0000\tBasic Latin"),
            Line::Malformed {
                expected: HEADER_FIELDS,
                found: 3
            }
        );
        assert!(!Line::classify("@@\t0000").is_data());
    }

    #[test]
    fn test_category_description() {
        assert_eq!(
            Line::classify("@+\t\tThe first block"),
            Line::CategoryDescription("The first block")
        );
    }

    #[test]
    fn test_ignored_lines() {
        assert_eq!(Line::classify(""), Line::Ignored);
        assert_eq!(Line::classify("; comment"), Line::Ignored);
        assert_eq!(Line::classify("@@@\tThe Unicode Standard 15.1.0"), Line::Ignored);
        assert_eq!(Line::classify("@@@+\tU15M230801.lst"), Line::Ignored);
        assert_eq!(Line::classify("@~\t!"), Line::Ignored);
        assert_eq!(Line::classify("@\tnot a marker"), Line::Ignored);
        assert_eq!(Line::classify("\t\tcontinued notice text"), Line::Ignored);
    }

    #[test]
    fn test_data_lines() {
        assert_eq!(
            Line::classify("0041\tLATIN CAPITAL LETTER A"),
            Line::Data {
                code: "0041",
                text: "LATIN CAPITAL LETTER A"
            }
        );
        assert_eq!(
            Line::classify("\t= commercial at"),
            Line::Data {
                code: "",
                text: "= commercial at"
            }
        );
        assert!(Line::classify("0041\tA").is_data());
    }

    #[test]
    fn test_wrong_field_count_is_malformed() {
        let line = Line::classify("0041\tA\textra");
        assert_eq!(
            line,
            Line::Malformed {
                expected: DATA_FIELDS,
                found: 3
            }
        );
        assert!(line.is_data());

        assert_eq!(
            Line::classify("no tabs here"),
            Line::Malformed {
                expected: DATA_FIELDS,
                found: 1
            }
        );
    }
}
