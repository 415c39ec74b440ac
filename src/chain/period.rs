//! Ownership periods and the chain-of-title result

use crate::records::{DocumentType, Encumbrance};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Marketable Record Title Act look-back status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MrtaStatus {
    /// Root of title is at least 30 years old
    Satisfied,
    /// Records reach back fewer than 30 years
    Partial,
    /// No dated deeds at all
    Insufficient,
}

/// A contiguous span during which one owner held title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipPeriod {
    /// 1-based position in the timeline
    pub id: u32,

    pub owner: Option<String>,
    pub acquired_from: Option<String>,

    pub acquisition_date: NaiveDate,
    pub acquisition_price: Option<f64>,
    pub acquisition_instrument: Option<String>,
    pub acquisition_doc_type: DocumentType,

    /// Last day of this tenure (inclusive); `None` for the current owner
    pub disposition_date: Option<NaiveDate>,
    pub disposition_instrument: Option<String>,

    /// Encumbrances recorded during this tenure, by recording date
    pub encumbrances: Vec<Encumbrance>,
}

impl OwnershipPeriod {
    /// Whether a date falls within `[acquisition_date, disposition_date]`
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.acquisition_date && self.disposition_date.map_or(true, |end| date <= end)
    }

    pub fn is_current(&self) -> bool {
        self.disposition_date.is_none()
    }

    /// Sum of known amounts on unsatisfied encumbrances in this period
    pub fn open_debt(&self) -> f64 {
        self.encumbrances
            .iter()
            .filter(|e| !e.is_satisfied)
            .filter_map(|e| e.amount)
            .sum()
    }
}

/// Reconstructed chain of title for one property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainOfTitle {
    /// Ownership periods, ascending by acquisition date
    pub ownership_timeline: Vec<OwnershipPeriod>,
    pub current_owner: Option<String>,
    /// Number of deeds found, dated or not
    pub total_transfers: usize,
    /// Every encumbrance, attached to a period or not, in input order
    pub all_encumbrances: Vec<Encumbrance>,
    pub mrta_status: MrtaStatus,
    /// Whole years since the oldest deed
    pub years_covered: Option<u32>,
}

impl ChainOfTitle {
    /// Timeline entry of the present owner
    pub fn current_period(&self) -> Option<&OwnershipPeriod> {
        self.ownership_timeline.last()
    }

    pub fn period(&self, id: u32) -> Option<&OwnershipPeriod> {
        self.ownership_timeline.iter().find(|p| p.id == id)
    }

    /// Encumbrances that fell outside every ownership period
    pub fn unattached_encumbrances(&self) -> Vec<&Encumbrance> {
        self.all_encumbrances
            .iter()
            .filter(|e| match e.recording_date {
                Some(date) => !self.ownership_timeline.iter().any(|p| p.contains(date)),
                None => true,
            })
            .collect()
    }
}
