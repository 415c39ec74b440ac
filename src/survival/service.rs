//! Survival service: classify every encumbrance through a fixed waterfall
//!
//! Order of precedence, first match wins:
//!
//! 1. FORECLOSING   - the lien being foreclosed (matched or inferred)
//! 2. SATISFIED     - released of record
//! 3. EXPIRED       - lapsed by statute
//! 4. SURVIVED      - superpriority
//! 5. HISTORICAL    - recorded before the current owner took title
//! 6. by seniority  - senior survives; junior survives unless joined

use super::types::{
    format_dollars, summarize, ClassifiedEncumbrance, SurvivalAnalysis, SurvivalResults,
    SurvivalStatus, UncertaintyFlag,
};
use crate::chain::{ChainOfTitle, OwnershipPeriod};
use crate::priority::{
    determine_seniority, identify_foreclosing_lien, is_historical, is_joined_encumbrance,
    ForeclosingMatch, Seniority,
};
use crate::records::{today, CaseContext, Encumbrance, EncumbranceType};
use crate::statutes::{
    calculate_hoa_safe_harbor, check_expiration, is_federal_lien, is_superpriority,
    DEFAULT_MONTHS_UNPAID,
};
use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Configuration for an analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// "Now" for expiration and MRTA checks
    pub as_of: NaiveDate,

    /// Monthly HOA assessment, for the safe-harbor estimate
    pub hoa_monthly_dues: Option<f64>,

    /// Months of unpaid assessments assumed for the safe harbor
    pub hoa_months_unpaid: u32,
}

impl AnalysisConfig {
    /// Default configuration pinned to a specific date
    pub fn as_of(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            ..Self::default()
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            as_of: today(),
            hoa_monthly_dues: None,
            hoa_months_unpaid: DEFAULT_MONTHS_UNPAID,
        }
    }
}

/// Ordered, de-duplicated flag list
#[derive(Debug, Default)]
struct Flags(Vec<UncertaintyFlag>);

impl Flags {
    fn raise(&mut self, flag: UncertaintyFlag, detail: &str) {
        if !self.0.contains(&flag) {
            warn!("{}: {}", flag, detail);
            self.0.push(flag);
        }
    }
}

/// How the foreclosing lien was resolved for one analysis
struct Foreclosure<'a> {
    /// Per-encumbrance direct match, parallel to the input
    matches: Vec<Option<ForeclosingMatch>>,
    /// Index of a lien chosen by inference
    inferred: Option<usize>,
    /// Lien whose recording date anchors seniority
    reference: Option<&'a Encumbrance>,
}

/// Per-call inputs shared by every classification
struct Context<'a> {
    case: &'a CaseContext,
    periods: &'a [OwnershipPeriod],
    current_period_id: Option<u32>,
    foreclosure: Foreclosure<'a>,
    hoa_safe_harbor: Option<f64>,
}

/// Main survival service
#[derive(Debug, Clone, Default)]
pub struct SurvivalService {
    config: AnalysisConfig,
}

impl SurvivalService {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Classify each encumbrance exactly once
    ///
    /// `chain` supplies the ownership timeline for the historical check;
    /// `current_period_id` of `None` means the last period.
    pub fn analyze(
        &self,
        encumbrances: &[Encumbrance],
        case: &CaseContext,
        chain: Option<&ChainOfTitle>,
        current_period_id: Option<u32>,
    ) -> SurvivalAnalysis {
        let mut flags = Flags::default();

        let plaintiff = case.plaintiff.as_deref().filter(|p| !p.trim().is_empty());
        if plaintiff.is_none() {
            flags.raise(
                UncertaintyFlag::LowConfidenceJudgment,
                "no plaintiff name in judgment data",
            );
        }

        let foreclosure = self.resolve_foreclosure(encumbrances, case, plaintiff, &mut flags);
        let ctx = Context {
            case,
            periods: chain.map_or(&[][..], |c| c.ownership_timeline.as_slice()),
            current_period_id,
            foreclosure,
            hoa_safe_harbor: calculate_hoa_safe_harbor(
                case.original_mortgage_amount,
                self.config.hoa_monthly_dues,
                self.config.hoa_months_unpaid,
            ),
        };

        let mut results = SurvivalResults::default();
        for (index, encumbrance) in encumbrances.iter().enumerate() {
            let entry = self.classify(index, encumbrance, &ctx);
            debug!(
                "{} {} ({}): {} - {}",
                encumbrance.encumbrance_type.as_str(),
                encumbrance.reference(),
                encumbrance.creditor_or_unknown(),
                entry.survival_status,
                entry.survival_reason
            );
            if entry.federal && !encumbrance.is_satisfied {
                flags.raise(
                    UncertaintyFlag::FederalLienPresent,
                    &format!("federal lien {} is of record", encumbrance.reference()),
                );
            }
            results.push(entry);
        }

        if !results.uncertain.is_empty() {
            flags.raise(
                UncertaintyFlag::ManualReviewRequired,
                &format!("{} encumbrance(s) could not be classified", results.uncertain.len()),
            );
        }

        let summary = summarize(&results);
        SurvivalAnalysis {
            results,
            uncertainty_flags: flags.0,
            summary,
        }
    }

    fn resolve_foreclosure<'a>(
        &self,
        encumbrances: &'a [Encumbrance],
        case: &CaseContext,
        plaintiff: Option<&str>,
        flags: &mut Flags,
    ) -> Foreclosure<'a> {
        let matches: Vec<Option<ForeclosingMatch>> = encumbrances
            .iter()
            .map(|e| identify_foreclosing_lien(e, plaintiff, &case.foreclosing_refs))
            .collect();

        if let Some(index) = reference_match(encumbrances, &matches) {
            return Foreclosure {
                matches,
                inferred: None,
                reference: Some(&encumbrances[index]),
            };
        }

        let inferred = if case.foreclosure_type.implies_first_mortgage() {
            infer_first_mortgage(encumbrances)
        } else {
            None
        };
        match inferred {
            Some(index) => flags.raise(
                UncertaintyFlag::ForeclosingLienInferred,
                &format!(
                    "using most recent unsatisfied mortgage {}",
                    encumbrances[index].reference()
                ),
            ),
            None => flags.raise(
                UncertaintyFlag::ForeclosingLienNotFound,
                "no encumbrance matches the foreclosing reference or plaintiff",
            ),
        }

        Foreclosure {
            matches,
            inferred,
            reference: inferred.map(|i| &encumbrances[i]),
        }
    }

    fn classify(&self, index: usize, encumbrance: &Encumbrance, ctx: &Context) -> ClassifiedEncumbrance {
        let federal = is_federal_lien(encumbrance.encumbrance_type, encumbrance.creditor.as_deref());
        let mut entry = self.waterfall(index, encumbrance, ctx);
        entry.federal = federal;
        if federal && !encumbrance.is_satisfied {
            entry
                .survival_reason
                .push_str("; federal lien: the United States may hold a right of redemption");
        }
        entry
    }

    fn waterfall(&self, index: usize, encumbrance: &Encumbrance, ctx: &Context) -> ClassifiedEncumbrance {
        use SurvivalStatus::*;

        // 1. Foreclosing
        if let Some(found) = &ctx.foreclosure.matches[index] {
            return ClassifiedEncumbrance::new(encumbrance, Foreclosing, found.reason.clone());
        }
        if ctx.foreclosure.inferred == Some(index) {
            let mut entry = ClassifiedEncumbrance::new(
                encumbrance,
                Foreclosing,
                "Inferred as foreclosing lien: most recent unsatisfied mortgage in a first-mortgage foreclosure",
            );
            entry.inferred = true;
            return entry;
        }

        // 2. Satisfied
        if encumbrance.is_satisfied {
            return ClassifiedEncumbrance::new(encumbrance, Satisfied, satisfaction_reason(encumbrance));
        }

        // 3. Expired
        let expiration = check_expiration(
            encumbrance.encumbrance_type,
            encumbrance.recording_date,
            self.config.as_of,
        );
        if expiration.expired {
            return ClassifiedEncumbrance::new(encumbrance, Expired, expiration.reason);
        }

        // 4. Superpriority
        if is_superpriority(encumbrance.encumbrance_type, encumbrance.creditor.as_deref()) {
            return ClassifiedEncumbrance::new(
                encumbrance,
                Survived,
                format!(
                    "Superpriority {} survives foreclosure regardless of recording order",
                    encumbrance.encumbrance_type.as_str()
                ),
            );
        }

        // 5. Historical
        if is_historical(encumbrance, ctx.current_period_id, ctx.periods) {
            return ClassifiedEncumbrance::new(
                encumbrance,
                Historical,
                "Recorded before the current owner acquired title",
            );
        }

        // 6. Seniority, then joinder for junior liens
        let seniority = determine_seniority(
            encumbrance,
            ctx.foreclosure.reference,
            ctx.case.lis_pendens_date,
        );
        let mut entry = match seniority {
            Seniority::Senior => ClassifiedEncumbrance::new(
                encumbrance,
                Survived,
                "Senior to the foreclosing lien; survives the sale",
            ),
            s if s.is_junior() => {
                let joinder = is_joined_encumbrance(encumbrance, &ctx.case.defendants);
                let mut entry = if joinder.joined {
                    let mut reason = format!(
                        "Junior lien ({}); holder joined as defendant '{}' ({:.2})",
                        s,
                        joinder.matched_name.as_deref().unwrap_or_default(),
                        joinder.confidence
                    );
                    if encumbrance.encumbrance_type == EncumbranceType::HoaLien {
                        if let Some(cap) = ctx.hoa_safe_harbor {
                            reason.push_str(&format!(
                                "; first mortgagee safe-harbor liability up to {}",
                                format_dollars(cap)
                            ));
                        }
                    }
                    ClassifiedEncumbrance::new(encumbrance, Extinguished, reason)
                } else {
                    ClassifiedEncumbrance::new(
                        encumbrance,
                        Survived,
                        format!("Junior lien ({}); holder not joined as a defendant, lien survives", s),
                    )
                };
                entry.joinder = Some(joinder);
                entry
            }
            s => ClassifiedEncumbrance::new(
                encumbrance,
                Uncertain,
                format!("Seniority could not be determined: {}", s),
            ),
        };
        entry.seniority = Some(seniority);
        entry
    }
}

/// Reference lien among direct matches: unsatisfied before satisfied, then the
/// highest-precedence rule, then a non-lis-pendens type, then the most recent
/// mortgage, then input order
fn reference_match(encumbrances: &[Encumbrance], matches: &[Option<ForeclosingMatch>]) -> Option<usize> {
    matches
        .iter()
        .enumerate()
        .filter_map(|(i, m)| m.as_ref().map(|m| (i, m.rule)))
        .min_by_key(|(i, rule)| {
            let enc = &encumbrances[*i];
            (
                enc.is_satisfied,
                *rule,
                enc.encumbrance_type == EncumbranceType::LisPendens,
                enc.encumbrance_type != EncumbranceType::Mortgage,
                enc.recording_date.is_none(),
                Reverse(enc.recording_date),
                *i,
            )
        })
        .map(|(i, _)| i)
}

/// Most recently recorded unsatisfied mortgage; ties go to the later entry
fn infer_first_mortgage(encumbrances: &[Encumbrance]) -> Option<usize> {
    encumbrances
        .iter()
        .enumerate()
        .filter(|(_, e)| e.encumbrance_type == EncumbranceType::Mortgage && !e.is_satisfied)
        .filter_map(|(i, e)| e.recording_date.map(|d| (i, d)))
        .max_by_key(|(i, d)| (*d, *i))
        .map(|(i, _)| i)
}

fn satisfaction_reason(encumbrance: &Encumbrance) -> String {
    match (&encumbrance.satisfaction_instrument, encumbrance.satisfaction_date) {
        (Some(inst), Some(date)) => format!("Satisfied by instrument {} recorded {}", inst, date),
        (Some(inst), None) => format!("Satisfied by instrument {}", inst),
        (None, Some(date)) => format!("Satisfaction recorded {}", date),
        (None, None) => "Satisfaction inferred; no release of record".to_string(),
    }
}
