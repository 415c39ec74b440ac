//! Chain-of-title reconstruction from recorded instruments
//!
//! 1. Normalize document types and split into deeds, encumbrances, satisfactions
//! 2. Sort dated deeds; each deed opens an ownership period
//! 3. Resolve satisfactions by the instrument number they reference
//! 4. Attach every dated encumbrance to the period it was recorded in
//! 5. Grade the root of title against the 30-year MRTA look-back

use super::period::{ChainOfTitle, MrtaStatus, OwnershipPeriod};
use crate::records::{
    instrument_number, normalize_instrument, today, whole_years_between, DocumentCategory,
    Encumbrance, Instrument, RecordedInstrument,
};
use chrono::{Months, NaiveDate};
use std::cmp::Ordering;
use std::collections::HashMap;

/// MRTA look-back in years
pub const MRTA_YEARS: u32 = 30;

/// Recorded satisfaction of an earlier instrument
#[derive(Debug, Clone)]
struct SatisfactionRef {
    instrument: Option<String>,
    date: Option<NaiveDate>,
}

/// Key under which satisfactions are matched to encumbrances
fn satisfaction_key(instrument: &str) -> String {
    instrument.trim().to_uppercase()
}

/// Order two optional instrument numbers: numeric when both parse, else text, missing last
fn compare_instruments(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (instrument_number(a), instrument_number(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => a.cmp(b),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Builds a `ChainOfTitle` as of a fixed date
#[derive(Debug, Clone)]
pub struct ChainOfTitleBuilder {
    as_of: NaiveDate,
}

impl ChainOfTitleBuilder {
    pub fn new(as_of: NaiveDate) -> Self {
        Self { as_of }
    }

    /// Normalize raw export rows, then build
    pub fn build(&self, raw: &[RecordedInstrument]) -> ChainOfTitle {
        let instruments: Vec<Instrument> = raw.iter().map(normalize_instrument).collect();
        self.build_from_instruments(&instruments)
    }

    /// Build from already-normalized instruments
    pub fn build_from_instruments(&self, instruments: &[Instrument]) -> ChainOfTitle {
        let mut deeds: Vec<&Instrument> = Vec::new();
        let mut encumbrance_docs: Vec<&Instrument> = Vec::new();
        let mut satisfactions: Vec<&Instrument> = Vec::new();

        for inst in instruments {
            match inst.document_type.category() {
                DocumentCategory::Deed => deeds.push(inst),
                DocumentCategory::Encumbrance => encumbrance_docs.push(inst),
                DocumentCategory::Satisfaction => satisfactions.push(inst),
                DocumentCategory::Ignored => {}
            }
        }

        let total_transfers = deeds.len();

        // Undated deeds cannot be placed on the timeline
        let mut dated_deeds: Vec<(&Instrument, NaiveDate)> = deeds
            .iter()
            .filter_map(|d| d.recording_date.map(|date| (*d, date)))
            .collect();
        if dated_deeds.len() < deeds.len() {
            log::debug!(
                "dropping {} undated deed(s) from the ownership timeline",
                deeds.len() - dated_deeds.len()
            );
        }
        dated_deeds.sort_by(|(a, da), (b, db)| {
            da.cmp(db).then_with(|| compare_instruments(&a.instrument, &b.instrument))
        });

        let lookup = Self::satisfaction_lookup(&satisfactions);
        let mut periods = Self::ownership_periods(&dated_deeds);

        let mut all_encumbrances = Vec::with_capacity(encumbrance_docs.len());
        for doc in &encumbrance_docs {
            let Some(mut encumbrance) = doc.to_encumbrance() else {
                continue;
            };

            if let Some(sat) = encumbrance
                .instrument
                .as_deref()
                .and_then(|inst| lookup.get(&satisfaction_key(inst)))
            {
                encumbrance.mark_satisfied(sat.instrument.clone(), sat.date);
            }

            if let Some(date) = encumbrance.recording_date {
                if let Some(period) = periods.iter_mut().find(|p| p.contains(date)) {
                    period.encumbrances.push(encumbrance.clone());
                }
            }

            all_encumbrances.push(encumbrance);
        }

        for period in &mut periods {
            period.encumbrances.sort_by_key(|e| e.recording_date);
        }

        let oldest = dated_deeds.first().map(|(_, date)| *date);
        let mrta_status = self.mrta_status(oldest);
        let years_covered = oldest.map(|date| whole_years_between(date, self.as_of));

        log::debug!(
            "chain of title: {} period(s), {} encumbrance(s), {} satisfaction(s), MRTA {:?}",
            periods.len(),
            all_encumbrances.len(),
            satisfactions.len(),
            mrta_status
        );

        ChainOfTitle {
            current_owner: periods.last().and_then(|p| p.owner.clone()),
            ownership_timeline: periods,
            total_transfers,
            all_encumbrances,
            mrta_status,
            years_covered,
        }
    }

    /// Satisfactions keyed by the instrument they satisfy; earliest recorded wins
    fn satisfaction_lookup(satisfactions: &[&Instrument]) -> HashMap<String, SatisfactionRef> {
        let mut ordered: Vec<&&Instrument> = satisfactions.iter().collect();
        ordered.sort_by(|a, b| match (a.recording_date, b.recording_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        let mut lookup = HashMap::new();
        for sat in ordered {
            if let Some(reference) = sat.references_instrument.as_deref() {
                lookup
                    .entry(satisfaction_key(reference))
                    .or_insert_with(|| SatisfactionRef {
                        instrument: sat.instrument.clone(),
                        date: sat.recording_date,
                    });
            }
        }
        lookup
    }

    /// One period per dated deed; each tenure ends the day before the next deed
    fn ownership_periods(deeds: &[(&Instrument, NaiveDate)]) -> Vec<OwnershipPeriod> {
        deeds
            .iter()
            .enumerate()
            .map(|(idx, (deed, date))| {
                let next = deeds.get(idx + 1);
                OwnershipPeriod {
                    id: idx as u32 + 1,
                    owner: deed.grantee.clone(),
                    acquired_from: deed.grantor.clone(),
                    acquisition_date: *date,
                    acquisition_price: deed.amount,
                    acquisition_instrument: deed.instrument.clone(),
                    acquisition_doc_type: deed.document_type,
                    disposition_date: next.and_then(|(_, next_date)| next_date.pred_opt()),
                    disposition_instrument: next.and_then(|(next_deed, _)| next_deed.instrument.clone()),
                    encumbrances: Vec::new(),
                }
            })
            .collect()
    }

    /// Root of title at least 30 calendar years old satisfies MRTA
    fn mrta_status(&self, oldest_deed: Option<NaiveDate>) -> MrtaStatus {
        let Some(oldest) = oldest_deed else {
            return MrtaStatus::Insufficient;
        };
        match self.as_of.checked_sub_months(Months::new(MRTA_YEARS * 12)) {
            Some(cutoff) if oldest <= cutoff => MrtaStatus::Satisfied,
            _ => MrtaStatus::Partial,
        }
    }
}

impl Default for ChainOfTitleBuilder {
    fn default() -> Self {
        Self::new(today())
    }
}

/// Build a chain of title as of today
pub fn build_chain_of_title(raw: &[RecordedInstrument]) -> ChainOfTitle {
    ChainOfTitleBuilder::default().build(raw)
}

/// Encumbrances of a given period that are still open
pub fn open_encumbrances(period: &OwnershipPeriod) -> Vec<&Encumbrance> {
    period.encumbrances.iter().filter(|e| !e.is_satisfied).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{DocumentType, TextOrNumber};
    use chrono::Duration;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn as_of() -> NaiveDate {
        ymd(2025, 6, 1)
    }

    fn doc(doc_type: &str, date: &str, instrument: &str, grantor: &str, grantee: &str) -> RecordedInstrument {
        RecordedInstrument {
            doc_type: doc_type.into(),
            recording_date: Some(date.into()),
            instrument: Some(TextOrNumber::Text(instrument.into())),
            grantor: Some(grantor.into()),
            grantee: Some(grantee.into()),
            ..Default::default()
        }
    }

    fn satisfaction(date: &str, instrument: &str, satisfies: &str) -> RecordedInstrument {
        RecordedInstrument {
            doc_type: "SAT".into(),
            recording_date: Some(date.into()),
            instrument: Some(TextOrNumber::Text(instrument.into())),
            original_instrument: Some(TextOrNumber::Text(satisfies.into())),
            ..Default::default()
        }
    }

    fn sample_records() -> Vec<RecordedInstrument> {
        vec![
            // Deliberately out of order
            doc("WD", "2018-07-20", "300", "Buyer One", "Buyer Two"),
            doc("MTG", "2005-03-10", "101", "Buyer One", "First Bank"),
            doc("WD", "2005-03-10", "100", "Original Owner", "Buyer One"),
            satisfaction("2018-07-25", "302", "101"),
            doc("MTG", "2018-07-20", "301", "Buyer Two", "Second Bank"),
            doc("JUD", "2021-02-02", "400", "Buyer Two", "Citizen B"),
            doc("LN", "01/15/2001", "50", "Original Owner", "Old Creditor"),
            doc("QC", "not a date", "999", "Nobody", "Somebody"),
            doc("ASG", "2019-01-01", "350", "Second Bank", "Servicer"),
        ]
    }

    #[test]
    fn test_timeline_ordering_and_dispositions() {
        let chain = ChainOfTitleBuilder::new(as_of()).build(&sample_records());

        assert_eq!(chain.ownership_timeline.len(), 2);
        assert_eq!(chain.total_transfers, 3);
        assert_eq!(chain.current_owner.as_deref(), Some("Buyer Two"));

        let first = &chain.ownership_timeline[0];
        let second = &chain.ownership_timeline[1];
        assert_eq!(first.id, 1);
        assert_eq!(first.owner.as_deref(), Some("Buyer One"));
        assert_eq!(first.acquired_from.as_deref(), Some("Original Owner"));
        assert_eq!(first.disposition_date, Some(ymd(2018, 7, 19)));
        assert_eq!(first.disposition_instrument.as_deref(), Some("300"));
        assert_eq!(second.acquisition_doc_type, DocumentType::WarrantyDeed);
        assert_eq!(second.disposition_date, None);

        for pair in chain.ownership_timeline.windows(2) {
            assert!(pair[0].acquisition_date <= pair[1].acquisition_date);
            assert_eq!(
                pair[0].disposition_date,
                Some(pair[1].acquisition_date - Duration::days(1))
            );
        }
    }

    #[test]
    fn test_encumbrance_attachment() {
        let chain = ChainOfTitleBuilder::new(as_of()).build(&sample_records());

        let first = &chain.ownership_timeline[0];
        let second = &chain.ownership_timeline[1];
        assert_eq!(first.encumbrances.len(), 1);
        assert_eq!(first.encumbrances[0].instrument.as_deref(), Some("101"));
        assert_eq!(second.encumbrances.len(), 2);
        assert_eq!(second.encumbrances[0].instrument.as_deref(), Some("301"));
        assert_eq!(second.encumbrances[1].instrument.as_deref(), Some("400"));

        // The 2001 lien predates every deed: kept, but unattached
        assert_eq!(chain.all_encumbrances.len(), 4);
        let unattached = chain.unattached_encumbrances();
        assert_eq!(unattached.len(), 1);
        assert_eq!(unattached[0].instrument.as_deref(), Some("50"));
    }

    #[test]
    fn test_satisfaction_resolution() {
        let chain = ChainOfTitleBuilder::new(as_of()).build(&sample_records());

        let first_mortgage = &chain.ownership_timeline[0].encumbrances[0];
        assert!(first_mortgage.is_satisfied);
        assert_eq!(first_mortgage.satisfaction_instrument.as_deref(), Some("302"));
        assert_eq!(first_mortgage.satisfaction_date, Some(ymd(2018, 7, 25)));
        assert!(first_mortgage.satisfaction_is_consistent());

        let second_mortgage = &chain.ownership_timeline[1].encumbrances[0];
        assert!(!second_mortgage.is_satisfied);
        assert_eq!(open_encumbrances(&chain.ownership_timeline[1]).len(), 2);
    }

    #[test]
    fn test_earliest_satisfaction_wins() {
        let records = vec![
            doc("WD", "2010-01-01", "1", "A", "B"),
            doc("MTG", "2010-01-01", "2", "B", "Lender"),
            satisfaction("2016-01-01", "9", "2"),
            satisfaction("2014-01-01", "8", "2"),
        ];
        let chain = ChainOfTitleBuilder::new(as_of()).build(&records);
        assert_eq!(chain.all_encumbrances[0].satisfaction_instrument.as_deref(), Some("8"));
    }

    #[test]
    fn test_mrta_boundary() {
        let exactly_thirty = ymd(1995, 6, 1);
        let records = vec![doc("WD", &exactly_thirty.to_string(), "1", "A", "B")];
        let chain = ChainOfTitleBuilder::new(as_of()).build(&records);
        assert_eq!(chain.mrta_status, MrtaStatus::Satisfied);
        assert_eq!(chain.years_covered, Some(30));

        let one_day_short = exactly_thirty + Duration::days(1);
        let records = vec![doc("WD", &one_day_short.to_string(), "1", "A", "B")];
        let chain = ChainOfTitleBuilder::new(as_of()).build(&records);
        assert_eq!(chain.mrta_status, MrtaStatus::Partial);
        assert_eq!(chain.years_covered, Some(29));
    }

    #[test]
    fn test_no_deeds_is_insufficient() {
        let records = vec![doc("MTG", "2010-01-01", "2", "B", "Lender")];
        let chain = ChainOfTitleBuilder::new(as_of()).build(&records);
        assert_eq!(chain.mrta_status, MrtaStatus::Insufficient);
        assert_eq!(chain.years_covered, None);
        assert!(chain.ownership_timeline.is_empty());
        assert_eq!(chain.current_owner, None);
        assert_eq!(chain.all_encumbrances.len(), 1);
    }

    #[test]
    fn test_same_day_deeds_order_by_instrument() {
        let records = vec![
            doc("WD", "2012-04-04", "20", "Middle", "Last"),
            doc("WD", "2012-04-04", "10", "First", "Middle"),
        ];
        let chain = ChainOfTitleBuilder::new(as_of()).build(&records);
        assert_eq!(chain.ownership_timeline[0].owner.as_deref(), Some("Middle"));
        assert_eq!(chain.current_owner.as_deref(), Some("Last"));
        // Earlier same-day period is empty: it ends before it begins
        assert!(!chain.ownership_timeline[0].contains(ymd(2012, 4, 4)));
    }

    #[test]
    fn test_serializes_iso_dates() {
        let chain = ChainOfTitleBuilder::new(as_of()).build(&sample_records());
        let json = serde_json::to_value(&chain).unwrap();
        assert_eq!(json["ownership_timeline"][0]["acquisition_date"], "2005-03-10");
        assert_eq!(json["mrta_status"], "PARTIAL");
        assert_eq!(json["ownership_timeline"][1]["disposition_date"], serde_json::Value::Null);
    }
}
