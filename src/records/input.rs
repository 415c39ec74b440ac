//! Ingestion boundary: loosely-typed exports into canonical records
//!
//! Scrapers and extraction services hand over JSON/CSV mappings where the same
//! field may be a string or a number. `normalize_instrument` and
//! `CaseContext::from_record` are the only places that deal with that; the
//! engine never branches on representation.

use super::codes::normalize_doc_type;
use super::data::{AmountConfidence, Instrument, FLAG_UNPARSEABLE_AMOUNT};
use super::dates::{parse_amount, parse_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A field that exports emit either as text or as a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl TextOrNumber {
    /// Render as trimmed text, `None` when blank
    pub fn as_text(&self) -> Option<String> {
        let text = match self {
            TextOrNumber::Integer(i) => i.to_string(),
            TextOrNumber::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
            TextOrNumber::Float(f) => f.to_string(),
            TextOrNumber::Text(s) => s.trim().to_string(),
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Interpret as money; text goes through `parse_amount`
    pub fn as_amount(&self) -> Option<f64> {
        match self {
            TextOrNumber::Integer(i) => Some(*i as f64),
            TextOrNumber::Float(f) if f.is_finite() => Some(*f),
            TextOrNumber::Float(_) => None,
            TextOrNumber::Text(s) => parse_amount(s),
        }
    }
}

impl From<&str> for TextOrNumber {
    fn from(s: &str) -> Self {
        TextOrNumber::Text(s.to_string())
    }
}

/// A recorded instrument as delivered by the scraping layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordedInstrument {
    #[serde(default)]
    pub doc_type: String,
    #[serde(default)]
    pub recording_date: Option<String>,
    #[serde(default)]
    pub instrument: Option<TextOrNumber>,
    #[serde(default, alias = "borrower")]
    pub grantor: Option<String>,
    #[serde(default, alias = "lender")]
    pub grantee: Option<String>,
    #[serde(default)]
    pub amount: Option<TextOrNumber>,
    #[serde(default)]
    pub consideration: Option<TextOrNumber>,
    #[serde(default)]
    pub book: Option<TextOrNumber>,
    #[serde(default)]
    pub page: Option<TextOrNumber>,
    #[serde(default)]
    pub original_instrument: Option<TextOrNumber>,
    #[serde(default)]
    pub references_instrument: Option<TextOrNumber>,
}

fn clean_party(name: &Option<String>) -> Option<String> {
    name.as_ref()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

/// Convert a raw export row into the canonical `Instrument`
///
/// Never fails: unrecognized codes become `DocumentType::Other`, bad dates
/// and amounts become `None` (amounts additionally get a flag).
pub fn normalize_instrument(raw: &RecordedInstrument) -> Instrument {
    let document_type = normalize_doc_type(&raw.doc_type);

    let amount_source = raw.amount.as_ref().or(raw.consideration.as_ref());
    let (amount, amount_confidence, amount_flags) = match amount_source {
        None => (None, AmountConfidence::None, Vec::new()),
        Some(value) if value.as_text().is_none() => (None, AmountConfidence::None, Vec::new()),
        Some(value) => match value.as_amount() {
            Some(parsed) => (Some(parsed), AmountConfidence::High, Vec::new()),
            None => (
                None,
                AmountConfidence::Low,
                vec![FLAG_UNPARSEABLE_AMOUNT.to_string()],
            ),
        },
    };

    let references_instrument = raw
        .original_instrument
        .as_ref()
        .or(raw.references_instrument.as_ref())
        .and_then(TextOrNumber::as_text);

    Instrument {
        document_type,
        raw_doc_type: raw.doc_type.clone(),
        recording_date: raw.recording_date.as_deref().and_then(parse_date),
        instrument: raw.instrument.as_ref().and_then(TextOrNumber::as_text),
        book: raw.book.as_ref().and_then(TextOrNumber::as_text),
        page: raw.page.as_ref().and_then(TextOrNumber::as_text),
        grantor: clean_party(&raw.grantor),
        grantee: clean_party(&raw.grantee),
        amount,
        amount_confidence,
        amount_flags,
        references_instrument,
    }
}

/// A named defendant in the foreclosure suit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefendantRecord {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        party_type: Option<String>,
        #[serde(default)]
        lien_recording_reference: Option<String>,
    },
}

/// Reference to the lien being foreclosed, as stated in the complaint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForeclosingRefs {
    #[serde(default)]
    pub instrument: Option<TextOrNumber>,
    #[serde(default)]
    pub book: Option<TextOrNumber>,
    #[serde(default)]
    pub page: Option<TextOrNumber>,
}

/// Judgment/case data as produced by the extraction service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JudgmentRecord {
    #[serde(default)]
    pub plaintiff: Option<String>,
    #[serde(default)]
    pub defendants: Vec<DefendantRecord>,
    #[serde(default)]
    pub lis_pendens_date: Option<String>,
    #[serde(default)]
    pub foreclosure_type: Option<String>,
    #[serde(default)]
    pub foreclosing_refs: Option<ForeclosingRefs>,
    #[serde(default)]
    pub original_mortgage_amount: Option<TextOrNumber>,
}

/// Defendant after normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defendant {
    pub name: String,
    pub party_type: Option<String>,
    pub lien_recording_reference: Option<String>,
}

impl Defendant {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            party_type: None,
            lien_recording_reference: None,
        }
    }
}

/// Canonical foreclosing-lien reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LienReference {
    pub instrument: Option<String>,
    pub book: Option<String>,
    pub page: Option<String>,
}

/// Kind of foreclosure action, parsed from the complaint's free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForeclosureType {
    FirstMortgage,
    SecondMortgage,
    Hoa,
    Tax,
    Other,
    Unknown,
}

impl ForeclosureType {
    pub fn parse(raw: Option<&str>) -> Self {
        let text = match raw.map(|s| s.trim().to_uppercase()) {
            Some(t) if !t.is_empty() => t,
            _ => return ForeclosureType::Unknown,
        };

        if ["HOA", "CONDO", "ASSOCIATION", "COA"].iter().any(|k| text.contains(k)) {
            ForeclosureType::Hoa
        } else if text.contains("TAX") {
            ForeclosureType::Tax
        } else if ["SECOND", "2ND", "HELOC"].iter().any(|k| text.contains(k)) {
            ForeclosureType::SecondMortgage
        } else if ["MORTGAGE", "MTG", "FIRST", "1ST"].iter().any(|k| text.contains(k)) {
            ForeclosureType::FirstMortgage
        } else {
            ForeclosureType::Other
        }
    }

    /// Whether the foreclosing lien can be inferred as the latest open mortgage
    pub fn implies_first_mortgage(&self) -> bool {
        matches!(self, ForeclosureType::FirstMortgage)
    }
}

/// Foreclosure case context, read-only input to one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseContext {
    pub plaintiff: Option<String>,
    pub defendants: Vec<Defendant>,
    pub lis_pendens_date: Option<NaiveDate>,
    pub foreclosure_type: ForeclosureType,
    pub foreclosing_refs: LienReference,
    pub original_mortgage_amount: Option<f64>,
}

impl CaseContext {
    /// Normalize extracted judgment data
    pub fn from_record(record: &JudgmentRecord) -> Self {
        let defendants = record
            .defendants
            .iter()
            .filter_map(|d| {
                let defendant = match d {
                    DefendantRecord::Name(name) => Defendant::named(name.trim()),
                    DefendantRecord::Detailed {
                        name,
                        party_type,
                        lien_recording_reference,
                    } => Defendant {
                        name: name.trim().to_string(),
                        party_type: clean_party(party_type),
                        lien_recording_reference: clean_party(lien_recording_reference),
                    },
                };
                (!defendant.name.is_empty()).then_some(defendant)
            })
            .collect();

        let foreclosing_refs = record
            .foreclosing_refs
            .as_ref()
            .map(|refs| LienReference {
                instrument: refs.instrument.as_ref().and_then(TextOrNumber::as_text),
                book: refs.book.as_ref().and_then(TextOrNumber::as_text),
                page: refs.page.as_ref().and_then(TextOrNumber::as_text),
            })
            .unwrap_or_default();

        Self {
            plaintiff: clean_party(&record.plaintiff),
            defendants,
            lis_pendens_date: record.lis_pendens_date.as_deref().and_then(parse_date),
            foreclosure_type: ForeclosureType::parse(record.foreclosure_type.as_deref()),
            foreclosing_refs,
            original_mortgage_amount: record
                .original_mortgage_amount
                .as_ref()
                .and_then(TextOrNumber::as_amount),
        }
    }

    /// Minimal context: a plaintiff and plain defendant names
    pub fn new(plaintiff: Option<&str>, defendants: &[&str], lis_pendens_date: Option<NaiveDate>) -> Self {
        Self {
            plaintiff: plaintiff.map(str::to_string),
            defendants: defendants.iter().map(|d| Defendant::named(*d)).collect(),
            lis_pendens_date,
            foreclosure_type: ForeclosureType::Unknown,
            foreclosing_refs: LienReference::default(),
            original_mortgage_amount: None,
        }
    }
}
