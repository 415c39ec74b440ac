//! Chain of title: ownership periods with their encumbrances, plus MRTA grading

mod builder;
mod period;

pub use builder::{build_chain_of_title, open_encumbrances, ChainOfTitleBuilder, MRTA_YEARS};
pub use period::{ChainOfTitle, MrtaStatus, OwnershipPeriod};
