//! Lien Survival - title chain and lien survival engine for Florida foreclosures
//!
//! This library provides:
//! - Chain-of-title reconstruction from recorded instruments
//! - Florida statutory lien rules (superpriority, expiration, HOA safe harbor)
//! - Foreclosing-lien identification, seniority and joinder checks
//! - Per-encumbrance survival classification
//! - Equity and maximum-bid estimates, single and batch

pub mod error;
pub mod records;
pub mod matching;
pub mod statutes;
pub mod chain;
pub mod priority;
pub mod survival;
pub mod equity;
pub mod runner;

// Re-export commonly used types
pub use error::{LienError, Result};
pub use records::{CaseContext, Encumbrance, EncumbranceType, JudgmentRecord, RecordedInstrument};
pub use chain::{build_chain_of_title, ChainOfTitle, ChainOfTitleBuilder, OwnershipPeriod};
pub use survival::{AnalysisConfig, SurvivalAnalysis, SurvivalService, SurvivalStatus};
pub use equity::{calculate_maximum_bid, BidParameters};
pub use runner::{PropertyAnalyzer, PropertyRecord, PropertyReport};
