//! Equity and maximum-bid estimation

mod calculator;

pub use calculator::{
    analyze_lien_priority, calculate_maximum_bid, calculate_surviving_encumbrances, estimate_equity,
    BidParameters, BidRecommendation, BidWarning, EquityEstimate, RankedLien, SurvivingDebt,
    DEFAULT_DESIRED_MARGIN, RESALE_FACTOR,
};
