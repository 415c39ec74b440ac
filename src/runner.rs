//! Property analyzer for single and batch runs
//!
//! Builds the chain of title, classifies every encumbrance found in it, and
//! prices a maximum bid when an assessed value is known.

use crate::chain::{ChainOfTitle, ChainOfTitleBuilder};
use crate::equity::{estimate_equity, BidParameters, BidRecommendation, EquityEstimate};
use crate::error::{LienError, Result};
use crate::records::{CaseContext, JudgmentRecord, RecordedInstrument};
use crate::survival::{AnalysisConfig, SurvivalAnalysis, SurvivalService};
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

/// Everything known about one property headed to sale
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub case_number: String,
    #[serde(default)]
    pub instruments: Vec<RecordedInstrument>,
    #[serde(default)]
    pub judgment: JudgmentRecord,
    /// Ownership period to treat as current; last period if absent
    #[serde(default)]
    pub current_period_id: Option<u32>,
    #[serde(default)]
    pub assessed_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyReport {
    pub case_number: String,
    pub chain: ChainOfTitle,
    pub survival: SurvivalAnalysis,
    /// Known amounts on surviving liens
    pub surviving_debt: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity: Option<EquityEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid: Option<BidRecommendation>,
}

/// Analyzer holding the run configuration shared by every property
///
/// # Example
/// ```ignore
/// let analyzer = PropertyAnalyzer::new(AnalysisConfig::as_of(as_of));
/// let reports = analyzer.analyze_batch(&properties);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertyAnalyzer {
    config: AnalysisConfig,
    bid: BidParameters,
}

impl PropertyAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            bid: BidParameters::default(),
        }
    }

    pub fn with_bid_parameters(mut self, bid: BidParameters) -> Self {
        self.bid = bid;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full pipeline for one property
    pub fn analyze(&self, record: &PropertyRecord) -> PropertyReport {
        let chain = ChainOfTitleBuilder::new(self.config.as_of).build(&record.instruments);
        let case = CaseContext::from_record(&record.judgment);
        let survival = SurvivalService::new(self.config.clone()).analyze(
            &chain.all_encumbrances,
            &case,
            Some(&chain),
            record.current_period_id,
        );
        let surviving_debt = survival.surviving_debt();

        let equity = record
            .assessed_value
            .map(|assessed| estimate_equity(assessed, surviving_debt, None));
        let bid = record
            .assessed_value
            .map(|assessed| self.bid.recommend(assessed, surviving_debt));

        debug!("{}: {}", record.case_number, survival.summary);

        PropertyReport {
            case_number: record.case_number.clone(),
            chain,
            survival,
            surviving_debt,
            equity,
            bid,
        }
    }

    /// Analyze many properties in parallel; output order follows input
    pub fn analyze_batch(&self, records: &[PropertyRecord]) -> Vec<PropertyReport> {
        let start = Instant::now();
        let reports: Vec<PropertyReport> = records.par_iter().map(|r| self.analyze(r)).collect();
        info!(
            "Analyzed {} properties in {:.1} ms",
            reports.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        reports
    }
}

/// Load one property record from a JSON file
pub fn load_property<P: AsRef<Path>>(path: P) -> Result<PropertyRecord> {
    let file = File::open(path)?;
    let record = serde_json::from_reader(BufReader::new(file))?;
    Ok(record)
}

/// Load a JSON array of property records
///
/// A single object is rejected rather than silently wrapped.
pub fn load_properties<P: AsRef<Path>>(path: P) -> Result<Vec<PropertyRecord>> {
    let file = File::open(path)?;
    let value: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;
    if !value.is_array() {
        return Err(LienError::InvalidRecord(
            "expected a JSON array of property records".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survival::SurvivalStatus;
    use crate::equity::BidWarning;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn property(case_number: &str) -> PropertyRecord {
        serde_json::from_str(&format!(
            r#"{{
                "case_number": "{}",
                "assessed_value": 300000,
                "instruments": [
                    {{"doc_type": "WD", "recording_date": "2014-03-01", "instrument": "2014000010",
                      "grantor": "Seller", "grantee": "John Doe", "consideration": "$250,000"}},
                    {{"doc_type": "(MTG) MORTGAGE", "recording_date": "05/01/2015", "instrument": 2015000100,
                      "borrower": "John Doe", "lender": "Bank A", "amount": 200000}},
                    {{"doc_type": "JUD", "recording_date": "2020-01-01", "instrument": "2020000200",
                      "grantor": "John Doe", "grantee": "Citizen B", "amount": "15,000"}},
                    {{"doc_type": "TL", "recording_date": "2023-01-01", "instrument": "2023000300",
                      "grantor": "John Doe", "grantee": "County", "amount": 3200}},
                    {{"doc_type": "LP", "recording_date": "2022-01-01", "instrument": "2022000999",
                      "grantor": "John Doe", "grantee": "Bank A"}}
                ],
                "judgment": {{
                    "plaintiff": "Bank A",
                    "defendants": ["John Doe", {{"name": "Citizen B", "party_type": "judgment creditor"}}],
                    "lis_pendens_date": "2022-01-01",
                    "foreclosure_type": "First Mortgage",
                    "foreclosing_refs": {{"instrument": "2015000100"}},
                    "original_mortgage_amount": 200000
                }}
            }}"#,
            case_number
        ))
        .unwrap()
    }

    #[test]
    fn test_full_pipeline() {
        let analyzer = PropertyAnalyzer::new(AnalysisConfig::as_of(as_of()));
        let report = analyzer.analyze(&property("2024-CA-000123"));

        assert_eq!(report.chain.current_owner.as_deref(), Some("John Doe"));
        let results = &report.survival.results;
        assert_eq!(results.len(), 4);
        // Mortgage matched by instrument, lis pendens by plaintiff name
        assert_eq!(results.foreclosing.len(), 2);
        assert_eq!(results.extinguished.len(), 1);
        assert_eq!(results.survived.len(), 1);
        assert_eq!(results.survived[0].survival_status, SurvivalStatus::Survived);

        assert_relative_eq!(report.surviving_debt, 3_200.0);
        let bid = report.bid.unwrap();
        // 300000 * 0.8 * 0.8 - 3200
        assert_relative_eq!(bid.recommended_max_bid, 188_800.0);
        assert_eq!(bid.warning, None);
        assert_relative_eq!(report.equity.unwrap().equity, 296_800.0);
    }

    #[test]
    fn test_no_assessed_value_no_bid() {
        let mut record = property("NO-VALUE");
        record.assessed_value = None;
        let report = PropertyAnalyzer::new(AnalysisConfig::as_of(as_of())).analyze(&record);
        assert!(report.bid.is_none());
        assert!(report.equity.is_none());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("bid").is_none());
    }

    #[test]
    fn test_bid_parameters_applied() {
        let analyzer = PropertyAnalyzer::new(AnalysisConfig::as_of(as_of())).with_bid_parameters(
            BidParameters {
                auction_costs: 200_000.0,
                desired_margin: 0.20,
            },
        );
        let bid = analyzer.analyze(&property("COSTLY")).bid.unwrap();
        assert_eq!(bid.warning, Some(BidWarning::NegativeEquity));
    }

    #[test]
    fn test_batch_preserves_order() {
        let records: Vec<PropertyRecord> = (0..20).map(|i| property(&format!("CASE-{:03}", i))).collect();
        let analyzer = PropertyAnalyzer::new(AnalysisConfig::as_of(as_of()));
        let reports = analyzer.analyze_batch(&records);
        assert_eq!(reports.len(), 20);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.case_number, format!("CASE-{:03}", i));
            assert_eq!(report.survival, reports[0].survival);
        }
    }

    #[test]
    fn test_load_properties_rejects_object() {
        let dir = std::env::temp_dir().join("lien_survival_runner_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("single.json");
        std::fs::write(&path, r#"{"case_number": "X"}"#).unwrap();

        assert!(matches!(load_properties(&path), Err(LienError::InvalidRecord(_))));
        let single = load_property(&path).unwrap();
        assert_eq!(single.case_number, "X");
        assert!(single.instruments.is_empty());
    }
}
