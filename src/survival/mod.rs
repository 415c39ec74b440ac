//! Lien survival analysis for a foreclosure sale

mod service;
mod types;

pub use service::{AnalysisConfig, SurvivalService};
pub use types::{
    format_dollars, summarize, ClassifiedEncumbrance, SurvivalAnalysis, SurvivalResults,
    SurvivalStatus, UncertaintyFlag,
};
