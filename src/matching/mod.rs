//! Party-name matching for creditors, plaintiffs and defendants

mod names;
mod tables;

pub use names::{
    are_linked, match_names, normalize_name, MatchKind, NameMatch, ALIAS_CONFIDENCE,
    DEFAULT_LINK_THRESHOLD, EXACT_CONFIDENCE, JACCARD_THRESHOLD, STRING_RATIO_THRESHOLD,
    SUBSET_CONFIDENCE,
};
