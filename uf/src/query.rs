//! Query terms and the AND-of-substrings match predicate

/// A parsed search query: lower-cased, whitespace-separated terms that must all match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    terms: Vec<String>,
}

impl Query {
    pub fn parse(text: &str) -> Self {
        let terms = text.to_lowercase().split_whitespace().map(str::to_string).collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// An empty query matches everything
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// True when every term is a substring of at least one target
    pub fn matches_all<S: AsRef<str>>(&self, targets: &[S]) -> bool {
        self.terms
            .iter()
            .all(|term| targets.iter().any(|t| t.as_ref().contains(term.as_str())))
    }

    /// Record-level predicate: description block first, then category/subcategory fallback
    pub fn accepts<S: AsRef<str>>(&self, lines: &[S], category: &str, subcategory: &str) -> bool {
        if self.is_empty() || self.matches_all(lines) {
            return true;
        }
        self.matches_all(&[category.to_lowercase(), subcategory.to_lowercase()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_lowercases_and_splits() {
        let q = Query::parse("  Capital\tA  ");
        assert_eq!(q.terms(), ["capital", "a"]);
        assert!(!q.is_empty());
    }

    #[test]
    fn test_blank_query_is_empty() {
        assert!(Query::parse("").is_empty());
        assert!(Query::parse(" \t ").is_empty());
    }

    #[test]
    fn test_terms_may_match_different_lines() {
        let q = Query::parse("capital commercial");
        let lines = ["latin capital letter a", "= commercial at"];
        assert!(q.matches_all(&lines));
    }

    #[test]
    fn test_every_term_required() {
        let q = Query::parse("capital omega");
        assert!(!q.matches_all(&["latin capital letter a"]));
    }

    #[test]
    fn test_accepts_via_category_fallback() {
        let q = Query::parse("controls");
        assert!(q.accepts(&["latin capital letter a"], "Basic Latin", "Controls"));
        assert!(!q.accepts(&["latin capital letter a"], "Basic Latin", "Letters"));
    }

    #[test]
    fn test_fallback_does_not_mix_with_description() {
        // "latin" only in the description, "controls" only in the subcategory
        let q = Query::parse("capital controls");
        assert!(!q.accepts(&["latin capital letter a"], "Greek", "Controls"));
    }

    proptest! {
        #[test]
        fn prop_empty_query_accepts_anything(lines in prop::collection::vec("[a-z ]{0,20}", 0..4), cat in "[A-Za-z ]{0,12}") {
            prop_assert!(Query::parse("").accepts(&lines, &cat, ""));
        }

        #[test]
        fn prop_terms_taken_from_a_line_always_match(line in "[a-z]{1,8}( [a-z]{1,8}){0,4}") {
            let query = Query::parse(&line.to_uppercase());
            prop_assert!(query.accepts(&[line.as_str()], "", ""));
        }

        #[test]
        fn prop_foreign_term_never_matches(line in "[a-z ]{0,30}") {
            // digits never occur in the generated line
            let query = Query::parse("a 0");
            prop_assert!(!query.matches_all(&[line.as_str()]));
        }
    }
}
