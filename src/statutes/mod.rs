//! Florida lien statutes: superpriority, federal liens, expiration, HOA safe harbor
//!
//! Everything here is a pure function of its arguments; "now" is always
//! passed in explicitly so results are reproducible.

mod expiration;
mod hoa;
mod superpriority;

pub use expiration::{check_expiration, is_expired, statutory_lifetime, Expiration, JUDGMENT_RERECORD_YEARS};
pub use hoa::{calculate_hoa_safe_harbor, DEFAULT_MONTHS_UNPAID, SAFE_HARBOR_MAX_MONTHS, SAFE_HARBOR_MORTGAGE_PCT};
pub use superpriority::{is_federal_lien, is_superpriority};
