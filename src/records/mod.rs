//! Recorded instruments, encumbrances and case context

mod data;
mod codes;
mod dates;
mod input;
pub mod loader;

pub use data::{
    instrument_number, AmountConfidence, DocumentCategory, DocumentType, Encumbrance, EncumbranceType,
    Instrument, FLAG_UNPARSEABLE_AMOUNT, FLAG_ZERO_AMOUNT,
};
pub use codes::normalize_doc_type;
pub use dates::{parse_amount, parse_date, today, whole_years_between, years_between, DAYS_PER_YEAR};
pub use input::{
    normalize_instrument, CaseContext, Defendant, DefendantRecord, ForeclosingRefs,
    ForeclosureType, JudgmentRecord, LienReference, RecordedInstrument, TextOrNumber,
};
pub use loader::{load_instruments, load_instruments_csv, load_instruments_from_reader, load_instruments_json};
