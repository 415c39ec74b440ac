//! Party-name normalization and fuzzy comparison
//!
//! Checks run cheapest and most precise first, so an exact match is never
//! downgraded by a looser heuristic:
//!
//! 1. empty token set        -> NONE
//! 2. equal token sets       -> EXACT (1.0)
//! 3. subset / superset      -> SUBSET / SUPERSET (0.95)
//! 4. equal after nicknames  -> ALIAS (0.90)
//! 5. Jaccard >= 0.60        -> FUZZY_JACCARD (score)
//! 6. Levenshtein > 0.85     -> FUZZY_STRING (ratio)

use super::tables::{canonical_token, ET_SUFFIXES, STOPWORDS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const EXACT_CONFIDENCE: f64 = 1.0;
pub const SUBSET_CONFIDENCE: f64 = 0.95;
pub const ALIAS_CONFIDENCE: f64 = 0.90;
pub const JACCARD_THRESHOLD: f64 = 0.60;
pub const STRING_RATIO_THRESHOLD: f64 = 0.85;
pub const DEFAULT_LINK_THRESHOLD: f64 = 0.8;

/// How two names were matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchKind {
    Exact,
    /// First name's tokens contain all of the second's
    Superset,
    /// First name's tokens are all contained in the second's
    Subset,
    Alias,
    FuzzyJaccard,
    FuzzyString,
    #[serde(rename = "NONE")]
    NoMatch,
}

/// Outcome of comparing two names
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NameMatch {
    pub kind: MatchKind,
    pub confidence: f64,
}

impl NameMatch {
    fn new(kind: MatchKind, confidence: f64) -> Self {
        Self { kind, confidence }
    }

    fn none() -> Self {
        Self::new(MatchKind::NoMatch, 0.0)
    }

    pub fn is_match(&self) -> bool {
        self.kind != MatchKind::NoMatch
    }
}

/// Uppercase, strip punctuation, drop stopwords
pub fn normalize_name(name: &str) -> BTreeSet<String> {
    // Dotted and slashed abbreviations collapse: N.A. -> NA, A/K/A -> AKA
    let cleaned: String = name
        .to_uppercase()
        .chars()
        .filter(|c| !matches!(c, '.' | '/' | '\''))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let mut result = BTreeSet::new();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        if token == "ET" && tokens.get(i + 1).is_some_and(|next| ET_SUFFIXES.contains(next)) {
            i += 2;
            continue;
        }
        if !STOPWORDS.contains(token) {
            result.insert(token.to_string());
        }
        i += 1;
    }
    result
}

fn alias_mapped(tokens: &BTreeSet<String>) -> BTreeSet<String> {
    tokens.iter().map(|t| canonical_token(t).to_string()).collect()
}

fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Compare two party names
pub fn match_names(name1: &str, name2: &str) -> NameMatch {
    let set1 = normalize_name(name1);
    let set2 = normalize_name(name2);

    if set1.is_empty() || set2.is_empty() {
        return NameMatch::none();
    }
    if set1 == set2 {
        return NameMatch::new(MatchKind::Exact, EXACT_CONFIDENCE);
    }
    if set1.is_superset(&set2) {
        return NameMatch::new(MatchKind::Superset, SUBSET_CONFIDENCE);
    }
    if set1.is_subset(&set2) {
        return NameMatch::new(MatchKind::Subset, SUBSET_CONFIDENCE);
    }
    if alias_mapped(&set1) == alias_mapped(&set2) {
        return NameMatch::new(MatchKind::Alias, ALIAS_CONFIDENCE);
    }

    let score = jaccard(&set1, &set2);
    if score >= JACCARD_THRESHOLD {
        return NameMatch::new(MatchKind::FuzzyJaccard, score);
    }

    let ratio = strsim::normalized_levenshtein(
        &name1.trim().to_uppercase(),
        &name2.trim().to_uppercase(),
    );
    if ratio > STRING_RATIO_THRESHOLD {
        return NameMatch::new(MatchKind::FuzzyString, ratio);
    }

    NameMatch::none()
}

/// Whether two names refer to the same party at the given confidence
pub fn are_linked(name1: &str, name2: &str, threshold: f64) -> bool {
    let m = match_names(name1, name2);
    m.is_match() && m.confidence >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_strips_noise() {
        let tokens = normalize_name("Wells Fargo Bank, N.A.");
        assert_eq!(tokens, BTreeSet::from(["WELLS".to_string(), "FARGO".to_string(), "BANK".to_string()]));

        let tokens = normalize_name("John Doe and Jane Doe, his wife, et al.");
        assert_eq!(tokens, BTreeSet::from(["JOHN".to_string(), "JANE".to_string(), "DOE".to_string()]));

        let tokens = normalize_name("Mary Smith a/k/a Mary Jones, Trustee");
        assert_eq!(
            tokens,
            BTreeSet::from(["MARY".to_string(), "SMITH".to_string(), "JONES".to_string()])
        );
    }

    #[test]
    fn test_empty_is_none() {
        assert_eq!(match_names("", "John Doe").kind, MatchKind::NoMatch);
        assert_eq!(match_names("LLC", "LLC").kind, MatchKind::NoMatch);
        assert_eq!(match_names("LLC", "LLC").confidence, 0.0);
    }

    #[test]
    fn test_exact() {
        let m = match_names("Bank A", "BANK A, N.A.");
        assert_eq!(m.kind, MatchKind::Exact);
        assert_relative_eq!(m.confidence, 1.0);
    }

    #[test]
    fn test_self_match_is_exact() {
        for name in ["John Doe", "Citizen B", "Miami-Dade County", "x"] {
            let m = match_names(name, name);
            assert_eq!(m.kind, MatchKind::Exact, "{}", name);
            assert_relative_eq!(m.confidence, 1.0);
        }
    }

    #[test]
    fn test_subset_superset_symmetry() {
        let ab = match_names("John Doe", "John Doe and Jane Doe");
        let ba = match_names("John Doe and Jane Doe", "John Doe");
        assert_eq!(ab.kind, MatchKind::Subset);
        assert_eq!(ba.kind, MatchKind::Superset);
        assert_relative_eq!(ab.confidence, ba.confidence);
        assert_relative_eq!(ab.confidence, 0.95);
    }

    #[test]
    fn test_alias() {
        let m = match_names("Bob Smith", "Robert Smith");
        assert_eq!(m.kind, MatchKind::Alias);
        assert_relative_eq!(m.confidence, 0.90);
    }

    #[test]
    fn test_fuzzy_jaccard() {
        let m = match_names("John Paul Jones Smith", "John Paul Jones Doe");
        assert_eq!(m.kind, MatchKind::FuzzyJaccard);
        assert_relative_eq!(m.confidence, 0.6);
    }

    #[test]
    fn test_fuzzy_string() {
        let m = match_names("Jonathan Smithe", "Jonathon Smithe");
        assert_eq!(m.kind, MatchKind::FuzzyString);
        assert!(m.confidence > 0.85);

        let reversed = match_names("Jonathon Smithe", "Jonathan Smithe");
        assert_relative_eq!(m.confidence, reversed.confidence);
    }

    #[test]
    fn test_unrelated_names() {
        let m = match_names("Bank A", "Citizen B");
        assert_eq!(m.kind, MatchKind::NoMatch);
        assert!(!are_linked("County", "John Doe", DEFAULT_LINK_THRESHOLD));
    }

    #[test]
    fn test_are_linked_threshold() {
        assert!(are_linked("Bob Smith", "Robert Smith", DEFAULT_LINK_THRESHOLD));
        assert!(!are_linked("Bob Smith", "Robert Smith", 0.95));
        // Jaccard 0.6 is a match but below the default link threshold
        assert!(!are_linked("John Paul Jones Smith", "John Paul Jones Doe", DEFAULT_LINK_THRESHOLD));
    }
}
