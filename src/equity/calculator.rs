//! Quick equity and maximum-bid estimates
//!
//! A simplified pre/post lis pendens view of the current owner's liens,
//! without statutory or joinder nuance.

use crate::chain::ChainOfTitle;
use crate::priority::Seniority;
use crate::records::{Encumbrance, EncumbranceType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Share of assessed value an investor should treat as resale value
pub const RESALE_FACTOR: f64 = 0.80;

pub const DEFAULT_DESIRED_MARGIN: f64 = 0.20;

/// Current owner's liens split into active and wiped
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurvivingDebt {
    pub active: Vec<Encumbrance>,
    pub wiped: Vec<Encumbrance>,
    pub total_surviving_debt: f64,
    pub by_type: BTreeMap<EncumbranceType, f64>,
}

/// Split the current owner's unsatisfied encumbrances around the lis pendens
///
/// Undated encumbrances cannot be placed in a period, so they are counted
/// with the current owner and treated as active. Without a lis pendens
/// date every unsatisfied encumbrance is active.
pub fn calculate_surviving_encumbrances(
    chain: &ChainOfTitle,
    lis_pendens_date: Option<NaiveDate>,
) -> SurvivingDebt {
    let candidates: Vec<&Encumbrance> = match chain.current_period() {
        Some(period) => period
            .encumbrances
            .iter()
            .chain(chain.all_encumbrances.iter().filter(|e| e.recording_date.is_none()))
            .collect(),
        None => chain.all_encumbrances.iter().collect(),
    };

    let mut debt = SurvivingDebt::default();
    for enc in candidates.into_iter().filter(|e| !e.is_satisfied) {
        let active = match (lis_pendens_date, enc.recording_date) {
            (Some(lp), Some(recorded)) => recorded < lp,
            _ => true,
        };
        if active {
            let amount = enc.amount.unwrap_or(0.0);
            debt.total_surviving_debt += amount;
            *debt.by_type.entry(enc.encumbrance_type).or_insert(0.0) += amount;
            debt.active.push(enc.clone());
        } else {
            debt.wiped.push(enc.clone());
        }
    }
    debt
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityEstimate {
    pub assessed_value: f64,
    pub surviving_debt: f64,
    pub final_judgment: Option<f64>,
    pub equity: f64,
    /// Equity over assessed value; `None` for a non-positive assessment
    pub equity_ratio: Option<f64>,
}

/// Assessed value less surviving debt and, if given, the final judgment
pub fn estimate_equity(assessed_value: f64, surviving_debt: f64, final_judgment: Option<f64>) -> EquityEstimate {
    let equity = assessed_value - surviving_debt - final_judgment.unwrap_or(0.0);
    EquityEstimate {
        assessed_value,
        surviving_debt,
        final_judgment,
        equity,
        equity_ratio: (assessed_value > 0.0).then(|| equity / assessed_value),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidWarning {
    NegativeEquity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidRecommendation {
    pub recommended_max_bid: f64,
    pub warning: Option<BidWarning>,
}

/// `assessed * 0.80 * (1 - margin) - surviving - costs`
pub fn calculate_maximum_bid(
    assessed_value: f64,
    surviving_encumbrances: f64,
    auction_costs: f64,
    desired_margin: f64,
) -> BidRecommendation {
    let bid = assessed_value * RESALE_FACTOR * (1.0 - desired_margin) - surviving_encumbrances - auction_costs;
    BidRecommendation {
        recommended_max_bid: bid,
        warning: (bid < 0.0).then_some(BidWarning::NegativeEquity),
    }
}

/// Bid inputs that do not come from the title record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidParameters {
    pub auction_costs: f64,
    pub desired_margin: f64,
}

impl Default for BidParameters {
    fn default() -> Self {
        Self {
            auction_costs: 0.0,
            desired_margin: DEFAULT_DESIRED_MARGIN,
        }
    }
}

impl BidParameters {
    pub fn recommend(&self, assessed_value: f64, surviving_encumbrances: f64) -> BidRecommendation {
        calculate_maximum_bid(
            assessed_value,
            surviving_encumbrances,
            self.auction_costs,
            self.desired_margin,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedLien {
    /// 1 = first recorded
    pub rank: usize,
    pub priority: Seniority,
    /// Recorded before the lis pendens; `None` without one
    pub survives: Option<bool>,
    pub encumbrance: Encumbrance,
}

/// Rank liens by recording date; undated liens go last in input order
pub fn analyze_lien_priority(encumbrances: &[Encumbrance], lis_pendens_date: Option<NaiveDate>) -> Vec<RankedLien> {
    let mut ordered: Vec<&Encumbrance> = encumbrances.iter().collect();
    // Stable sort keeps input order among equal keys
    ordered.sort_by_key(|e| (e.recording_date.is_none(), e.recording_date));

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, enc)| {
            let priority = match (enc.recording_date, i) {
                (None, _) => Seniority::UnknownMissingDate,
                (Some(_), 0) => Seniority::Senior,
                (Some(_), _) => Seniority::Junior,
            };
            let survives = lis_pendens_date.map(|lp| enc.recording_date.map_or(true, |d| d < lp));
            RankedLien {
                rank: i + 1,
                priority,
                survives,
                encumbrance: enc.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainOfTitleBuilder;
    use crate::records::RecordedInstrument;
    use approx::assert_relative_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn instrument(doc: &str, date: Option<&str>, inst: &str, grantee: &str, amount: Option<&str>) -> RecordedInstrument {
        RecordedInstrument {
            doc_type: doc.into(),
            recording_date: date.map(str::to_string),
            instrument: Some(inst.into()),
            grantor: Some("John Doe".into()),
            grantee: Some(grantee.into()),
            amount: amount.map(Into::into),
            ..RecordedInstrument::default()
        }
    }

    fn chain() -> ChainOfTitle {
        ChainOfTitleBuilder::new(ymd(2025, 6, 1)).build(&[
            instrument("WD", Some("2005-01-01"), "D1", "Prior Owner", None),
            instrument("MTG", Some("2006-01-01"), "M0", "Old Bank", Some("90,000")),
            instrument("WD", Some("2015-01-01"), "D2", "John Doe", None),
            instrument("MTG", Some("2015-02-01"), "M1", "Bank A", Some("$200,000")),
            instrument("JUD", Some("2020-01-01"), "J1", "Citizen B", Some("15000")),
            instrument("JUD", Some("2023-01-01"), "J2", "Card Co", Some("2500")),
            instrument("LN", None, "L9", "Mystery", Some("1000")),
        ])
    }

    #[test]
    fn test_surviving_split_on_lis_pendens() {
        let debt = calculate_surviving_encumbrances(&chain(), Some(ymd(2022, 1, 1)));
        // Prior owner's mortgage is not counted
        assert_eq!(debt.active.len(), 3);
        assert_eq!(debt.wiped.len(), 1);
        assert_relative_eq!(debt.total_surviving_debt, 216_000.0);
        assert_relative_eq!(debt.by_type[&EncumbranceType::Mortgage], 200_000.0);
        assert_relative_eq!(debt.by_type[&EncumbranceType::Judgment], 15_000.0);
        assert_relative_eq!(debt.by_type[&EncumbranceType::Lien], 1_000.0);
    }

    #[test]
    fn test_no_lis_pendens_everything_active() {
        let debt = calculate_surviving_encumbrances(&chain(), None);
        assert_eq!(debt.active.len(), 4);
        assert!(debt.wiped.is_empty());
        assert_relative_eq!(debt.total_surviving_debt, 218_500.0);
    }

    #[test]
    fn test_estimate_equity() {
        let estimate = estimate_equity(300_000.0, 50_000.0, Some(150_000.0));
        assert_relative_eq!(estimate.equity, 100_000.0);
        assert_relative_eq!(estimate.equity_ratio.unwrap(), 1.0 / 3.0);

        let zero = estimate_equity(0.0, 10.0, None);
        assert_relative_eq!(zero.equity, -10.0);
        assert_eq!(zero.equity_ratio, None);
    }

    #[test]
    fn test_negative_equity_bid() {
        let bid = calculate_maximum_bid(100_000.0, 95_000.0, 5_000.0, 0.20);
        assert_relative_eq!(bid.recommended_max_bid, -36_000.0);
        assert_eq!(bid.warning, Some(BidWarning::NegativeEquity));
        assert_eq!(serde_json::to_value(bid.warning).unwrap(), "NEGATIVE_EQUITY");
    }

    #[test]
    fn test_positive_bid_with_defaults() {
        let bid = BidParameters::default().recommend(250_000.0, 10_000.0);
        assert_relative_eq!(bid.recommended_max_bid, 150_000.0);
        assert_eq!(bid.warning, None);
    }

    #[test]
    fn test_lien_priority_ranking() {
        let liens = vec![
            Encumbrance::new(EncumbranceType::Judgment, Some(ymd(2020, 1, 1))).with_instrument("J1"),
            Encumbrance::new(EncumbranceType::Lien, None).with_instrument("U1"),
            Encumbrance::new(EncumbranceType::Mortgage, Some(ymd(2015, 2, 1))).with_instrument("M1"),
            Encumbrance::new(EncumbranceType::Judgment, Some(ymd(2023, 1, 1))).with_instrument("J2"),
        ];
        let ranked = analyze_lien_priority(&liens, Some(ymd(2022, 1, 1)));
        let order: Vec<&str> = ranked.iter().map(|r| r.encumbrance.instrument.as_deref().unwrap()).collect();
        assert_eq!(order, ["M1", "J1", "J2", "U1"]);
        assert_eq!(ranked[0].priority, Seniority::Senior);
        assert_eq!(ranked[1].priority, Seniority::Junior);
        assert_eq!(ranked[3].priority, Seniority::UnknownMissingDate);
        assert_eq!(ranked[2].survives, Some(false));
        assert_eq!(ranked[1].survives, Some(true));
        assert_eq!(ranked[3].rank, 4);

        let no_lp = analyze_lien_priority(&liens, None);
        assert!(no_lp.iter().all(|r| r.survives.is_none()));
    }
}
