//! Lien priority: which lien is being foreclosed, who is senior, who was joined

mod engine;
mod joinder;

pub use engine::{
    determine_seniority, identify_foreclosing_lien, is_foreclosing_lien, is_historical,
    ForeclosingMatch, ForeclosingRule, Seniority, FORECLOSING_RULES, PLAINTIFF_MATCH_THRESHOLD,
};
pub use joinder::{is_joined, is_joined_encumbrance, JoinderResult, JOINDER_THRESHOLD};
