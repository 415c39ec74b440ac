//! Foreclosing-lien identification and recording-order seniority

use crate::chain::OwnershipPeriod;
use crate::matching::match_names;
use crate::records::{instrument_number, Encumbrance, LienReference};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Minimum creditor/plaintiff name confidence to call a lien the foreclosing one
pub const PLAINTIFF_MATCH_THRESHOLD: f64 = 0.85;

/// Ways an encumbrance can be tied to the foreclosure action
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForeclosingRule {
    InstrumentNumber,
    BookPage,
    PlaintiffName,
}

/// Rules in precedence order; the first that fires wins
pub const FORECLOSING_RULES: [ForeclosingRule; 3] = [
    ForeclosingRule::InstrumentNumber,
    ForeclosingRule::BookPage,
    ForeclosingRule::PlaintiffName,
];

fn same_ref(a: &str, b: &str) -> bool {
    let a = a.trim();
    !a.is_empty() && a.eq_ignore_ascii_case(b.trim())
}

impl ForeclosingRule {
    /// Reason string if this rule ties `encumbrance` to the action
    pub fn evaluate(
        &self,
        encumbrance: &Encumbrance,
        plaintiff: Option<&str>,
        refs: &LienReference,
    ) -> Option<String> {
        match self {
            ForeclosingRule::InstrumentNumber => {
                let inst = encumbrance.instrument.as_deref()?;
                let wanted = refs.instrument.as_deref()?;
                same_ref(inst, wanted).then(|| format!("Instrument number {} matches foreclosing reference", inst))
            }
            ForeclosingRule::BookPage => {
                let (book, page) = (encumbrance.book.as_deref()?, encumbrance.page.as_deref()?);
                let (ref_book, ref_page) = (refs.book.as_deref()?, refs.page.as_deref()?);
                (same_ref(book, ref_book) && same_ref(page, ref_page))
                    .then(|| format!("Book {} page {} matches foreclosing reference", book, page))
            }
            ForeclosingRule::PlaintiffName => {
                let creditor = encumbrance.creditor.as_deref()?;
                let plaintiff = plaintiff?;
                let m = match_names(creditor, plaintiff);
                (m.is_match() && m.confidence >= PLAINTIFF_MATCH_THRESHOLD).then(|| {
                    format!(
                        "Creditor '{}' matches plaintiff '{}' ({:?}, {:.2})",
                        creditor, plaintiff, m.kind, m.confidence
                    )
                })
            }
        }
    }
}

/// Which rule identified the foreclosing lien, and why
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeclosingMatch {
    pub rule: ForeclosingRule,
    pub reason: String,
}

/// Identify whether `encumbrance` is the lien being foreclosed
pub fn identify_foreclosing_lien(
    encumbrance: &Encumbrance,
    plaintiff: Option<&str>,
    refs: &LienReference,
) -> Option<ForeclosingMatch> {
    FORECLOSING_RULES.iter().find_map(|rule| {
        rule.evaluate(encumbrance, plaintiff, refs)
            .map(|reason| ForeclosingMatch { rule: *rule, reason })
    })
}

/// Tuple form: (is_foreclosing, reason)
pub fn is_foreclosing_lien(
    encumbrance: &Encumbrance,
    plaintiff: Option<&str>,
    refs: &LienReference,
) -> (bool, String) {
    match identify_foreclosing_lien(encumbrance, plaintiff, refs) {
        Some(found) => (true, found.reason),
        None => (false, "No instrument, book/page or plaintiff match".to_string()),
    }
}

/// Recording priority of a lien relative to the foreclosing lien
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seniority {
    #[serde(rename = "SENIOR")]
    Senior,
    #[serde(rename = "JUNIOR")]
    Junior,
    #[serde(rename = "JUNIOR (Same Day Tie)")]
    JuniorSameDayTie,
    #[serde(rename = "UNKNOWN (Missing Date)")]
    UnknownMissingDate,
    #[serde(rename = "UNCERTAIN (Missing Foreclosure Date)")]
    UncertainMissingForeclosureDate,
}

impl Seniority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Seniority::Senior => "SENIOR",
            Seniority::Junior => "JUNIOR",
            Seniority::JuniorSameDayTie => "JUNIOR (Same Day Tie)",
            Seniority::UnknownMissingDate => "UNKNOWN (Missing Date)",
            Seniority::UncertainMissingForeclosureDate => "UNCERTAIN (Missing Foreclosure Date)",
        }
    }

    pub fn is_junior(&self) -> bool {
        matches!(self, Seniority::Junior | Seniority::JuniorSameDayTie)
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare `target` against the foreclosing lien (or the lis pendens date)
///
/// Same-day ties: lower numeric instrument number is senior; otherwise a
/// lien recorded after the lis pendens is junior; otherwise the tie is
/// resolved as junior.
pub fn determine_seniority(
    target: &Encumbrance,
    foreclosing: Option<&Encumbrance>,
    lis_pendens_date: Option<NaiveDate>,
) -> Seniority {
    let Some(target_date) = target.recording_date else {
        return Seniority::UnknownMissingDate;
    };
    let reference_date = foreclosing
        .and_then(|f| f.recording_date)
        .or(lis_pendens_date);
    let Some(reference_date) = reference_date else {
        return Seniority::UncertainMissingForeclosureDate;
    };

    match target_date.cmp(&reference_date) {
        Ordering::Less => Seniority::Senior,
        Ordering::Greater => Seniority::Junior,
        Ordering::Equal => same_day_tie(target, target_date, foreclosing, lis_pendens_date),
    }
}

fn same_day_tie(
    target: &Encumbrance,
    target_date: NaiveDate,
    foreclosing: Option<&Encumbrance>,
    lis_pendens_date: Option<NaiveDate>,
) -> Seniority {
    let target_number = target.instrument.as_deref().and_then(instrument_number);
    let foreclosing_number = foreclosing
        .and_then(|f| f.instrument.as_deref())
        .and_then(instrument_number);

    if let (Some(t), Some(f)) = (target_number, foreclosing_number) {
        match t.cmp(&f) {
            Ordering::Less => return Seniority::Senior,
            Ordering::Greater => return Seniority::Junior,
            Ordering::Equal => {}
        }
    }

    match lis_pendens_date {
        Some(lp) if target_date > lp => Seniority::Junior,
        _ => Seniority::JuniorSameDayTie,
    }
}

/// Whether a lien belongs to a prior owner's tenure
///
/// True when it was recorded before the current period's acquisition date.
/// An unsatisfied mortgage that a later owner may have assumed is treated the
/// same way; assumption is not detected.
pub fn is_historical(
    encumbrance: &Encumbrance,
    current_period_id: Option<u32>,
    periods: &[OwnershipPeriod],
) -> bool {
    let Some(recorded) = encumbrance.recording_date else {
        return false;
    };
    let current = match current_period_id {
        Some(id) => periods.iter().find(|p| p.id == id),
        None => periods.last(),
    };
    current.map_or(false, |period| recorded < period.acquisition_date)
}
