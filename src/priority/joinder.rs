//! Whether a junior lienholder was named as a defendant

use crate::matching::match_names;
use crate::records::{Defendant, Encumbrance};
use serde::{Deserialize, Serialize};

/// Minimum name confidence to treat a creditor as joined
pub const JOINDER_THRESHOLD: f64 = 0.85;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinderResult {
    pub joined: bool,
    /// Defendant with the best match, if any matched at all
    pub matched_name: Option<String>,
    pub confidence: f64,
}

impl JoinderResult {
    fn not_joined() -> Self {
        Self {
            joined: false,
            matched_name: None,
            confidence: 0.0,
        }
    }
}

/// Match a creditor name against the defendant list
///
/// Keeps the highest-confidence defendant; ties keep the earlier one.
pub fn is_joined(creditor: Option<&str>, defendants: &[Defendant]) -> JoinderResult {
    let Some(creditor) = creditor.filter(|c| !c.trim().is_empty()) else {
        return JoinderResult::not_joined();
    };

    let mut best: Option<(&Defendant, f64)> = None;
    for defendant in defendants {
        let m = match_names(creditor, &defendant.name);
        if !m.is_match() {
            continue;
        }
        if best.map_or(true, |(_, conf)| m.confidence > conf) {
            best = Some((defendant, m.confidence));
        }
    }

    match best {
        Some((defendant, confidence)) => JoinderResult {
            joined: confidence >= JOINDER_THRESHOLD,
            matched_name: Some(defendant.name.clone()),
            confidence,
        },
        None => JoinderResult::not_joined(),
    }
}

fn compact(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Book and page named by a reference: "OR Book 1234, Page 56", "BK 1234 PG 56",
/// or two parts split on '/' or ','
fn parse_book_page(reference: &str) -> Option<(String, String)> {
    let words: Vec<String> = reference
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_uppercase)
        .collect();
    let after = |labels: &[&str]| {
        words
            .iter()
            .position(|w| labels.contains(&w.as_str()))
            .and_then(|i| words.get(i + 1))
            .cloned()
    };
    if let (Some(book), Some(page)) = (after(&["BOOK", "BK", "ORB"]), after(&["PAGE", "PG"])) {
        return Some((book, page));
    }

    let parts: Vec<String> = reference
        .split(['/', ','])
        .map(compact)
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [book, page] => Some((book.clone(), page.clone())),
        _ => None,
    }
}

fn same_number(a: &str, b: &str) -> bool {
    let a = compact(a);
    let b = compact(b);
    !a.is_empty() && a.trim_start_matches('0') == b.trim_start_matches('0')
}

/// A defendant's recording reference names this encumbrance
///
/// Book/page references compare book and page separately; anything else is
/// compared against the instrument number.
fn reference_matches(reference: &str, encumbrance: &Encumbrance) -> bool {
    if let Some((book, page)) = parse_book_page(reference) {
        return match (encumbrance.book.as_deref(), encumbrance.page.as_deref()) {
            (Some(b), Some(p)) => same_number(&book, b) && same_number(&page, p),
            _ => false,
        };
    }
    let wanted = compact(reference);
    !wanted.is_empty() && encumbrance.instrument.as_deref().map_or(false, |inst| compact(inst) == wanted)
}

/// Joinder check for a specific encumbrance
///
/// A defendant whose `lien_recording_reference` names the encumbrance's
/// instrument or book/page is a certain match; otherwise falls back to
/// creditor-name matching.
pub fn is_joined_encumbrance(encumbrance: &Encumbrance, defendants: &[Defendant]) -> JoinderResult {
    let by_reference = defendants.iter().find(|d| {
        d.lien_recording_reference
            .as_deref()
            .map_or(false, |r| reference_matches(r, encumbrance))
    });
    if let Some(defendant) = by_reference {
        return JoinderResult {
            joined: true,
            matched_name: Some(defendant.name.clone()),
            confidence: 1.0,
        };
    }
    is_joined(encumbrance.creditor.as_deref(), defendants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::EncumbranceType;
    use approx::assert_relative_eq;

    fn defendants(names: &[&str]) -> Vec<Defendant> {
        names.iter().map(|n| Defendant::named(*n)).collect()
    }

    #[test]
    fn test_exact_joinder() {
        let result = is_joined(Some("Citizen B"), &defendants(&["John Doe", "CITIZEN B"]));
        assert!(result.joined);
        assert_eq!(result.matched_name.as_deref(), Some("CITIZEN B"));
        assert_relative_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_not_joined() {
        let result = is_joined(Some("Capital One Bank"), &defendants(&["John Doe", "Jane Doe"]));
        assert!(!result.joined);
    }

    #[test]
    fn test_missing_creditor_or_defendants() {
        assert!(!is_joined(None, &defendants(&["John Doe"])).joined);
        assert!(!is_joined(Some("  "), &defendants(&["John Doe"])).joined);
        let empty = is_joined(Some("Bank"), &[]);
        assert!(!empty.joined);
        assert_eq!(empty.matched_name, None);
        assert_relative_eq!(empty.confidence, 0.0);
    }

    #[test]
    fn test_best_match_wins() {
        let result = is_joined(
            Some("Wells Fargo Bank, N.A."),
            &defendants(&["Wells Fargo Home Mortgage Inc", "WELLS FARGO BANK NA"]),
        );
        assert!(result.joined);
        assert_eq!(result.matched_name.as_deref(), Some("WELLS FARGO BANK NA"));
    }

    #[test]
    fn test_tie_keeps_first_defendant() {
        let result = is_joined(Some("Citizen B"), &defendants(&["Citizen B", "CITIZEN B"]));
        assert_eq!(result.matched_name.as_deref(), Some("Citizen B"));
    }

    #[test]
    fn test_reference_joinder() {
        let enc = Encumbrance::new(EncumbranceType::Judgment, None)
            .with_instrument("2019-004455")
            .with_creditor("Unrelated Collections LLC");
        let named = Defendant {
            name: "Assignee Holdings".into(),
            party_type: Some("lienholder".into()),
            lien_recording_reference: Some("2019004455".into()),
        };
        let result = is_joined_encumbrance(&enc, &[Defendant::named("John Doe"), named]);
        assert!(result.joined);
        assert_eq!(result.matched_name.as_deref(), Some("Assignee Holdings"));
        assert_relative_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_reference_by_book_page() {
        let enc = Encumbrance::new(EncumbranceType::Mortgage, None).with_book_page("1234", "56");
        let named = Defendant {
            name: "Lender".into(),
            party_type: None,
            lien_recording_reference: Some("OR Book 1234, Page 56".into()),
        };
        assert!(is_joined_encumbrance(&enc, &[named]).joined);
    }

    #[test]
    fn test_book_page_reference_does_not_run_together() {
        let enc = Encumbrance::new(EncumbranceType::Mortgage, None)
            .with_instrument("123456")
            .with_book_page("12", "3456");
        assert!(reference_matches("12/3456", &enc));
        assert!(reference_matches("OR Book 12, Page 3456", &enc));
        assert!(reference_matches("BK 012 PG 3456", &enc));
        assert!(!reference_matches("123/456", &enc));
        assert!(!reference_matches("Book 123 Page 456", &enc));
        assert!(!reference_matches("1234/56", &enc));

        let other = Encumbrance::new(EncumbranceType::Mortgage, None).with_book_page("123", "456");
        assert!(!reference_matches("123456", &other));
        assert!(!reference_matches("12/3456", &other));
    }

    #[test]
    fn test_encumbrance_falls_back_to_name() {
        let enc = Encumbrance::new(EncumbranceType::Mortgage, None).with_creditor("Citizen B");
        assert!(is_joined_encumbrance(&enc, &defendants(&["Citizen B"])).joined);
    }
}
