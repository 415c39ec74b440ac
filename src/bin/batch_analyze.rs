//! Analyze a batch of properties from a JSON file
//!
//! Usage: batch_analyze [properties.json] [summary.csv]
//!
//! Environment:
//! - AS_OF: evaluation date (YYYY-MM-DD), defaults to today
//! - OUTPUT_JSON: if set, also write the full reports to this path

use anyhow::{anyhow, Context, Result};
use lien_survival::records::parse_date;
use lien_survival::runner::load_properties;
use lien_survival::{AnalysisConfig, PropertyAnalyzer, PropertyReport};
use serde::Serialize;
use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

/// One line of the CSV summary
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    case_number: &'a str,
    current_owner: &'a str,
    mrta_status: String,
    survived: usize,
    extinguished: usize,
    expired: usize,
    satisfied: usize,
    historical: usize,
    foreclosing: usize,
    uncertain: usize,
    surviving_debt: f64,
    recommended_max_bid: Option<f64>,
    flags: String,
    summary: &'a str,
}

impl<'a> SummaryRow<'a> {
    fn from_report(report: &'a PropertyReport) -> Self {
        let results = &report.survival.results;
        Self {
            case_number: &report.case_number,
            current_owner: report.chain.current_owner.as_deref().unwrap_or(""),
            mrta_status: format!("{:?}", report.chain.mrta_status).to_uppercase(),
            survived: results.survived.len(),
            extinguished: results.extinguished.len(),
            expired: results.expired.len(),
            satisfied: results.satisfied.len(),
            historical: results.historical.len(),
            foreclosing: results.foreclosing.len(),
            uncertain: results.uncertain.len(),
            surviving_debt: report.surviving_debt,
            recommended_max_bid: report.bid.as_ref().map(|b| b.recommended_max_bid),
            flags: report
                .survival
                .uncertainty_flags
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join("|"),
            summary: &report.survival.summary,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let input = env::args().nth(1).unwrap_or_else(|| "properties.json".to_string());
    let summary_path = env::args().nth(2).unwrap_or_else(|| "lien_summary.csv".to_string());

    let config = match env::var("AS_OF") {
        Ok(raw) => AnalysisConfig::as_of(
            parse_date(&raw).ok_or_else(|| anyhow!("AS_OF is not a date: {}", raw))?,
        ),
        Err(_) => AnalysisConfig::default(),
    };

    let start = Instant::now();
    println!("Loading properties from {}...", input);
    let properties = load_properties(&input).with_context(|| format!("Failed to load {}", input))?;
    println!("Loaded {} properties in {:?}", properties.len(), start.elapsed());

    println!("Analyzing as of {}...", config.as_of);
    let analyze_start = Instant::now();
    let reports = PropertyAnalyzer::new(config).analyze_batch(&properties);
    println!("Analysis completed in {:?}", analyze_start.elapsed());

    let mut writer = csv::Writer::from_path(&summary_path)
        .with_context(|| format!("Failed to create {}", summary_path))?;
    for report in &reports {
        writer.serialize(SummaryRow::from_report(report))?;
    }
    writer.flush()?;
    println!("Summary written to {}", summary_path);

    if let Ok(json_path) = env::var("OUTPUT_JSON") {
        let file = File::create(&json_path).with_context(|| format!("Failed to create {}", json_path))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &reports)?;
        println!("Full reports written to {}", json_path);
    }

    let surviving: usize = reports.iter().map(|r| r.survival.results.survived.len()).sum();
    let review: usize = reports.iter().map(|r| r.survival.results.uncertain.len()).sum();
    println!();
    println!("Properties:        {}", reports.len());
    println!("Surviving liens:   {}", surviving);
    println!("Needing review:    {}", review);
    println!("Total time:        {:?}", start.elapsed());

    Ok(())
}
