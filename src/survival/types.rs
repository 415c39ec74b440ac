//! Survival classification results

use crate::priority::{JoinderResult, Seniority};
use crate::records::Encumbrance;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Final disposition of one encumbrance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurvivalStatus {
    /// The lien being foreclosed
    Foreclosing,
    Satisfied,
    /// Lapsed by statute
    Expired,
    /// Burdens the buyer after the sale
    Survived,
    /// Belonged to a prior owner's tenure
    Historical,
    /// Wiped out by the judgment
    Extinguished,
    /// Needs a human to decide
    Uncertain,
}

impl SurvivalStatus {
    pub const ALL: [SurvivalStatus; 7] = [
        SurvivalStatus::Survived,
        SurvivalStatus::Extinguished,
        SurvivalStatus::Expired,
        SurvivalStatus::Satisfied,
        SurvivalStatus::Historical,
        SurvivalStatus::Foreclosing,
        SurvivalStatus::Uncertain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SurvivalStatus::Foreclosing => "FORECLOSING",
            SurvivalStatus::Satisfied => "SATISFIED",
            SurvivalStatus::Expired => "EXPIRED",
            SurvivalStatus::Survived => "SURVIVED",
            SurvivalStatus::Historical => "HISTORICAL",
            SurvivalStatus::Extinguished => "EXTINGUISHED",
            SurvivalStatus::Uncertain => "UNCERTAIN",
        }
    }
}

impl fmt::Display for SurvivalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data-quality and review flags raised during an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UncertaintyFlag {
    /// No plaintiff name in the judgment data
    LowConfidenceJudgment,
    ForeclosingLienInferred,
    ForeclosingLienNotFound,
    /// A live federal lien carries a right of redemption
    FederalLienPresent,
    ManualReviewRequired,
}

impl UncertaintyFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            UncertaintyFlag::LowConfidenceJudgment => "LOW_CONFIDENCE_JUDGMENT",
            UncertaintyFlag::ForeclosingLienInferred => "FORECLOSING_LIEN_INFERRED",
            UncertaintyFlag::ForeclosingLienNotFound => "FORECLOSING_LIEN_NOT_FOUND",
            UncertaintyFlag::FederalLienPresent => "FEDERAL_LIEN_PRESENT",
            UncertaintyFlag::ManualReviewRequired => "MANUAL_REVIEW_REQUIRED",
        }
    }
}

impl fmt::Display for UncertaintyFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An encumbrance annotated with its classification
///
/// The source record is carried unchanged; annotations sit beside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedEncumbrance {
    #[serde(flatten)]
    pub encumbrance: Encumbrance,
    pub survival_status: SurvivalStatus,
    pub survival_reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joinder: Option<JoinderResult>,
    /// Foreclosing lien chosen by inference rather than a direct match
    #[serde(default)]
    pub inferred: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority: Option<Seniority>,
    #[serde(default)]
    pub federal: bool,
}

impl ClassifiedEncumbrance {
    pub fn new(encumbrance: &Encumbrance, status: SurvivalStatus, reason: impl Into<String>) -> Self {
        Self {
            encumbrance: encumbrance.clone(),
            survival_status: status,
            survival_reason: reason.into(),
            joinder: None,
            inferred: false,
            seniority: None,
            federal: false,
        }
    }
}

/// Classified encumbrances grouped by status, each in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurvivalResults {
    pub survived: Vec<ClassifiedEncumbrance>,
    pub extinguished: Vec<ClassifiedEncumbrance>,
    pub expired: Vec<ClassifiedEncumbrance>,
    pub satisfied: Vec<ClassifiedEncumbrance>,
    pub historical: Vec<ClassifiedEncumbrance>,
    pub foreclosing: Vec<ClassifiedEncumbrance>,
    pub uncertain: Vec<ClassifiedEncumbrance>,
}

impl SurvivalResults {
    pub fn bucket(&self, status: SurvivalStatus) -> &[ClassifiedEncumbrance] {
        match status {
            SurvivalStatus::Survived => &self.survived,
            SurvivalStatus::Extinguished => &self.extinguished,
            SurvivalStatus::Expired => &self.expired,
            SurvivalStatus::Satisfied => &self.satisfied,
            SurvivalStatus::Historical => &self.historical,
            SurvivalStatus::Foreclosing => &self.foreclosing,
            SurvivalStatus::Uncertain => &self.uncertain,
        }
    }

    fn bucket_mut(&mut self, status: SurvivalStatus) -> &mut Vec<ClassifiedEncumbrance> {
        match status {
            SurvivalStatus::Survived => &mut self.survived,
            SurvivalStatus::Extinguished => &mut self.extinguished,
            SurvivalStatus::Expired => &mut self.expired,
            SurvivalStatus::Satisfied => &mut self.satisfied,
            SurvivalStatus::Historical => &mut self.historical,
            SurvivalStatus::Foreclosing => &mut self.foreclosing,
            SurvivalStatus::Uncertain => &mut self.uncertain,
        }
    }

    /// File an entry under its own status
    pub fn push(&mut self, entry: ClassifiedEncumbrance) {
        self.bucket_mut(entry.survival_status).push(entry);
    }

    /// Total entries across all categories
    pub fn len(&self) -> usize {
        SurvivalStatus::ALL.iter().map(|s| self.bucket(*s).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries, category by category
    pub fn iter(&self) -> impl Iterator<Item = &ClassifiedEncumbrance> {
        SurvivalStatus::ALL.into_iter().flat_map(move |s| self.bucket(s).iter())
    }

    /// Sum of known amounts on surviving liens, `None` if no amount is known
    pub fn surviving_amount(&self) -> Option<f64> {
        let known: Vec<f64> = self.survived.iter().filter_map(|c| c.encumbrance.amount).collect();
        (!known.is_empty()).then(|| known.iter().sum())
    }
}

/// Output of one survival analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurvivalAnalysis {
    pub results: SurvivalResults,
    pub uncertainty_flags: Vec<UncertaintyFlag>,
    pub summary: String,
}

impl SurvivalAnalysis {
    pub fn has_flag(&self, flag: UncertaintyFlag) -> bool {
        self.uncertainty_flags.contains(&flag)
    }

    pub fn surviving_debt(&self) -> f64 {
        self.results.surviving_amount().unwrap_or(0.0)
    }
}

/// `$1,234,567.89`
pub fn format_dollars(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Human-readable one-line summary
pub fn summarize(results: &SurvivalResults) -> String {
    let mut summary = format!(
        "{} surviving lien(s), {} extinguished",
        results.survived.len(),
        results.extinguished.len()
    );
    if let Some(debt) = results.surviving_amount() {
        summary.push_str(&format!("; estimated surviving debt {}", format_dollars(debt)));
    }
    if !results.uncertain.is_empty() {
        summary.push_str(&format!("; {} require manual review", results.uncertain.len()));
    }
    summary
}
