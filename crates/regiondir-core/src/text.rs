//! Name folding for display-name lookups.
//!
//! Names compare after trimming and Unicode lower-casing. Diacritics are
//! significant and there is no substring matching: `"zürich"` finds
//! "Zürich", `"Zurich"` and `"Züri"` do not.

/// Fold a display name into its comparison key.
pub fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Whether `candidate` matches an already folded query.
pub fn matches_folded(candidate: &str, folded_query: &str) -> bool {
    !folded_query.is_empty() && fold_name(candidate) == folded_query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_and_whitespace() {
        assert_eq!(fold_name("  United States "), "united states");
    }

    #[test]
    fn folds_non_ascii_case() {
        assert_eq!(fold_name("ÅLAND ISLANDS"), fold_name("Åland Islands"));
    }

    #[test]
    fn diacritics_are_significant() {
        assert!(matches_folded("Zürich", &fold_name("zürich")));
        assert!(!matches_folded("Zürich", &fold_name("Zurich")));
    }

    #[test]
    fn no_partial_matches() {
        assert!(!matches_folded("New York", &fold_name("New")));
    }

    #[test]
    fn empty_query_never_matches() {
        assert!(!matches_folded("", ""));
        assert!(!matches_folded("Chad", &fold_name("   ")));
    }
}
