//! Categories left out of every search

/// Blocks the names-list search never reports
pub const DEFAULT_EXCLUDED_CATEGORIES: &[&str] = &["Sutton SignWriting", "Runic", "Coptic"];

/// Deny list of category names, matched exactly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionPolicy {
    categories: Vec<String>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self {
            categories: DEFAULT_EXCLUDED_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl ExclusionPolicy {
    /// A policy that excludes nothing
    pub fn none() -> Self {
        Self { categories: Vec::new() }
    }

    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        self.categories.push(name.into());
        self
    }

    pub fn excludes(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}
