//! Category and character record types

/// A named block of characters, as declared by a `@@` header line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    /// Block name, original case
    pub name: String,
    /// First code point of the block, as written in the document
    pub start: String,
    /// Last code point of the block, as written in the document
    pub end: String,
    /// Free text from `@+` lines
    pub description: String,
}

impl Category {
    pub fn new(name: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: start.into(),
            end: end.into(),
            description: String::new(),
        }
    }

    /// Set the description, or extend it if one is already present
    pub fn push_description(&mut self, text: &str) {
        if self.description.is_empty() {
            self.description = text.to_string();
        } else {
            self.description.push(' ');
            self.description.push_str(text);
        }
    }
}

/// One character entry with its full description block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRecord {
    pub code_point: u32,
    /// Lower-cased description lines; the first one is the character name
    pub lines: Vec<String>,
    pub category: Category,
    pub subcategory: String,
}

impl CharacterRecord {
    /// Primary description line (the character name)
    pub fn description(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or("")
    }

    /// The character itself, or U+FFFD when the code point is not a scalar value
    pub fn glyph(&self) -> char {
        char::from_u32(self.code_point).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Canonical `U+XXXX` notation
    pub fn notation(&self) -> String {
        format!("U+{:04X}", self.code_point)
    }
}
