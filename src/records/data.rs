//! Canonical record types shared by every stage of the engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Normalized document type of a recorded instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    WarrantyDeed,
    SpecialWarrantyDeed,
    QuitClaimDeed,
    TaxDeed,
    CertificateOfTitle,
    PersonalRepresentativeDeed,
    TrusteeDeed,
    Deed,
    Mortgage,
    Judgment,
    LisPendens,
    TaxLien,
    FederalTaxLien,
    HoaLien,
    MechanicsLien,
    CodeEnforcementLien,
    PaceLien,
    UtilityLien,
    Lien,
    Satisfaction,
    Release,
    Assignment,
    Other,
}

/// Which pool an instrument belongs to when building a chain of title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentCategory {
    /// Transfers title (creates an ownership period)
    Deed,
    /// Burdens title
    Encumbrance,
    /// Satisfies or releases an earlier encumbrance
    Satisfaction,
    /// Irrelevant to title analysis (assignments, notices)
    Ignored,
}

impl DocumentType {
    pub fn category(&self) -> DocumentCategory {
        match self {
            DocumentType::WarrantyDeed
            | DocumentType::SpecialWarrantyDeed
            | DocumentType::QuitClaimDeed
            | DocumentType::TaxDeed
            | DocumentType::CertificateOfTitle
            | DocumentType::PersonalRepresentativeDeed
            | DocumentType::TrusteeDeed
            | DocumentType::Deed => DocumentCategory::Deed,
            DocumentType::Satisfaction | DocumentType::Release => DocumentCategory::Satisfaction,
            DocumentType::Assignment | DocumentType::Other => DocumentCategory::Ignored,
            _ => DocumentCategory::Encumbrance,
        }
    }

    /// Encumbrance type for encumbrance documents, `None` for everything else
    pub fn encumbrance_type(&self) -> Option<EncumbranceType> {
        let kind = match self {
            DocumentType::Mortgage => EncumbranceType::Mortgage,
            DocumentType::Judgment => EncumbranceType::Judgment,
            DocumentType::LisPendens => EncumbranceType::LisPendens,
            DocumentType::TaxLien => EncumbranceType::TaxLien,
            DocumentType::FederalTaxLien => EncumbranceType::FederalTaxLien,
            DocumentType::HoaLien => EncumbranceType::HoaLien,
            DocumentType::MechanicsLien => EncumbranceType::MechanicsLien,
            DocumentType::CodeEnforcementLien => EncumbranceType::CodeEnforcementLien,
            DocumentType::PaceLien => EncumbranceType::PaceLien,
            DocumentType::UtilityLien => EncumbranceType::UtilityLien,
            DocumentType::Lien => EncumbranceType::Lien,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_deed(&self) -> bool {
        self.category() == DocumentCategory::Deed
    }
}

/// Kind of recorded interest against a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EncumbranceType {
    Mortgage,
    Judgment,
    LisPendens,
    TaxLien,
    FederalTaxLien,
    HoaLien,
    MechanicsLien,
    CodeEnforcementLien,
    PaceLien,
    UtilityLien,
    /// Lien of unspecified kind
    Lien,
    Other,
}

impl EncumbranceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EncumbranceType::Mortgage => "mortgage",
            EncumbranceType::Judgment => "judgment",
            EncumbranceType::LisPendens => "lis pendens",
            EncumbranceType::TaxLien => "tax lien",
            EncumbranceType::FederalTaxLien => "federal tax lien",
            EncumbranceType::HoaLien => "HOA lien",
            EncumbranceType::MechanicsLien => "mechanic's lien",
            EncumbranceType::CodeEnforcementLien => "code enforcement lien",
            EncumbranceType::PaceLien => "PACE lien",
            EncumbranceType::UtilityLien => "utility lien",
            EncumbranceType::Lien => "lien",
            EncumbranceType::Other => "encumbrance",
        }
    }
}

/// How much the extracted amount can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmountConfidence {
    High,
    Low,
    /// No amount was supplied at all
    None,
}

impl Default for AmountConfidence {
    fn default() -> Self {
        AmountConfidence::None
    }
}

/// Amount flag: the source text could not be parsed
pub const FLAG_UNPARSEABLE_AMOUNT: &str = "UNPARSEABLE_AMOUNT";
/// Amount flag: the source recorded a zero amount
pub const FLAG_ZERO_AMOUNT: &str = "ZERO_AMOUNT";

/// A recorded interest against a property
///
/// Satisfaction is attached after the fact; survival classification is
/// carried beside the record (see `survival::ClassifiedEncumbrance`), never
/// written into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encumbrance {
    pub encumbrance_type: EncumbranceType,

    /// Document type the encumbrance was normalized from
    pub document_type: DocumentType,

    pub instrument: Option<String>,
    pub book: Option<String>,
    pub page: Option<String>,

    pub creditor: Option<String>,
    pub debtor: Option<String>,

    pub amount: Option<f64>,
    #[serde(default)]
    pub amount_confidence: AmountConfidence,
    #[serde(default)]
    pub amount_flags: Vec<String>,

    pub recording_date: Option<NaiveDate>,

    #[serde(default)]
    pub is_satisfied: bool,
    #[serde(default)]
    pub satisfaction_instrument: Option<String>,
    #[serde(default)]
    pub satisfaction_date: Option<NaiveDate>,
    /// Satisfaction was inferred rather than read from a recorded release
    #[serde(default)]
    pub satisfaction_inferred: bool,
}

impl Encumbrance {
    /// Create an unsatisfied encumbrance with no amount
    pub fn new(encumbrance_type: EncumbranceType, recording_date: Option<NaiveDate>) -> Self {
        let document_type = match encumbrance_type {
            EncumbranceType::Mortgage => DocumentType::Mortgage,
            EncumbranceType::Judgment => DocumentType::Judgment,
            EncumbranceType::LisPendens => DocumentType::LisPendens,
            EncumbranceType::TaxLien => DocumentType::TaxLien,
            EncumbranceType::FederalTaxLien => DocumentType::FederalTaxLien,
            EncumbranceType::HoaLien => DocumentType::HoaLien,
            EncumbranceType::MechanicsLien => DocumentType::MechanicsLien,
            EncumbranceType::CodeEnforcementLien => DocumentType::CodeEnforcementLien,
            EncumbranceType::PaceLien => DocumentType::PaceLien,
            EncumbranceType::UtilityLien => DocumentType::UtilityLien,
            EncumbranceType::Lien => DocumentType::Lien,
            EncumbranceType::Other => DocumentType::Other,
        };

        Self {
            encumbrance_type,
            document_type,
            instrument: None,
            book: None,
            page: None,
            creditor: None,
            debtor: None,
            amount: None,
            amount_confidence: AmountConfidence::None,
            amount_flags: Vec::new(),
            recording_date,
            is_satisfied: false,
            satisfaction_instrument: None,
            satisfaction_date: None,
            satisfaction_inferred: false,
        }
    }

    pub fn with_instrument(mut self, instrument: impl Into<String>) -> Self {
        self.instrument = Some(instrument.into());
        self
    }

    pub fn with_book_page(mut self, book: impl Into<String>, page: impl Into<String>) -> Self {
        self.book = Some(book.into());
        self.page = Some(page.into());
        self
    }

    pub fn with_creditor(mut self, creditor: impl Into<String>) -> Self {
        self.creditor = Some(creditor.into());
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self.amount_confidence = AmountConfidence::High;
        self
    }

    /// Attach a recorded satisfaction
    pub fn mark_satisfied(&mut self, instrument: Option<String>, date: Option<NaiveDate>) {
        self.is_satisfied = true;
        self.satisfaction_inferred = instrument.is_none() && date.is_none();
        self.satisfaction_instrument = instrument;
        self.satisfaction_date = date;
    }

    /// A satisfied encumbrance must carry evidence or be flagged inferred
    pub fn satisfaction_is_consistent(&self) -> bool {
        !self.is_satisfied
            || self.satisfaction_instrument.is_some()
            || self.satisfaction_date.is_some()
            || self.satisfaction_inferred
    }

    /// Human-readable reference: instrument, then book/page
    pub fn reference(&self) -> String {
        match (&self.instrument, &self.book, &self.page) {
            (Some(inst), _, _) => format!("#{}", inst),
            (None, Some(book), Some(page)) => format!("{}/{}", book, page),
            _ => "(no reference)".to_string(),
        }
    }

    pub fn creditor_or_unknown(&self) -> &str {
        self.creditor.as_deref().unwrap_or("unknown creditor")
    }
}

/// Instrument number as an integer, when it is purely numeric
pub fn instrument_number(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// A recorded instrument after normalization at the ingestion boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub document_type: DocumentType,
    /// Free-text code as it appeared in the export
    pub raw_doc_type: String,
    pub recording_date: Option<NaiveDate>,
    pub instrument: Option<String>,
    pub book: Option<String>,
    pub page: Option<String>,
    /// Grantor side (seller, borrower, debtor)
    pub grantor: Option<String>,
    /// Grantee side (buyer, lender, creditor)
    pub grantee: Option<String>,
    pub amount: Option<f64>,
    pub amount_confidence: AmountConfidence,
    pub amount_flags: Vec<String>,
    /// For satisfactions: instrument number being satisfied
    pub references_instrument: Option<String>,
}

impl Instrument {
    /// Convert an encumbrance document into an `Encumbrance`
    pub fn to_encumbrance(&self) -> Option<Encumbrance> {
        let encumbrance_type = self.document_type.encumbrance_type()?;
        let mut amount_flags = self.amount_flags.clone();
        let mut amount_confidence = self.amount_confidence;
        if self.amount == Some(0.0) {
            amount_flags.push(FLAG_ZERO_AMOUNT.to_string());
            amount_confidence = AmountConfidence::Low;
        }

        Some(Encumbrance {
            encumbrance_type,
            document_type: self.document_type,
            instrument: self.instrument.clone(),
            book: self.book.clone(),
            page: self.page.clone(),
            creditor: self.grantee.clone(),
            debtor: self.grantor.clone(),
            amount: self.amount,
            amount_confidence,
            amount_flags,
            recording_date: self.recording_date,
            is_satisfied: false,
            satisfaction_instrument: None,
            satisfaction_date: None,
            satisfaction_inferred: false,
        })
    }
}
