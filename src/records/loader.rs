//! Load recorded-instrument exports from JSON or CSV

use super::input::{RecordedInstrument, TextOrNumber};
use crate::error::{LienError, Result};
use csv::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Raw CSV row from a clerk's official-records export
///
/// Column names follow the JSON field names; mortgage-style exports may use
/// `lender`/`borrower` instead of `grantee`/`grantor`.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    doc_type: String,
    #[serde(default)]
    recording_date: Option<String>,
    #[serde(default)]
    instrument: Option<String>,
    #[serde(default)]
    grantor: Option<String>,
    #[serde(default)]
    grantee: Option<String>,
    #[serde(default)]
    borrower: Option<String>,
    #[serde(default)]
    lender: Option<String>,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    consideration: Option<String>,
    #[serde(default)]
    book: Option<String>,
    #[serde(default)]
    page: Option<String>,
    #[serde(default)]
    original_instrument: Option<String>,
    #[serde(default)]
    references_instrument: Option<String>,
}

fn text(field: Option<String>) -> Option<TextOrNumber> {
    field.filter(|s| !s.trim().is_empty()).map(TextOrNumber::Text)
}

impl CsvRow {
    fn into_instrument(self) -> RecordedInstrument {
        RecordedInstrument {
            doc_type: self.doc_type,
            recording_date: self.recording_date.filter(|s| !s.trim().is_empty()),
            instrument: text(self.instrument),
            grantor: self.grantor.or(self.borrower),
            grantee: self.grantee.or(self.lender),
            amount: text(self.amount),
            consideration: text(self.consideration),
            book: text(self.book),
            page: text(self.page),
            original_instrument: text(self.original_instrument),
            references_instrument: text(self.references_instrument),
        }
    }
}

/// Load instruments from a CSV file
pub fn load_instruments_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RecordedInstrument>> {
    let file = File::open(path)?;
    load_instruments_from_reader(file)
}

/// Load instruments from any CSV reader (string buffer, network stream)
pub fn load_instruments_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<RecordedInstrument>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut instruments = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        instruments.push(row.into_instrument());
    }

    Ok(instruments)
}

/// Load instruments from a JSON array
pub fn load_instruments_json<P: AsRef<Path>>(path: P) -> Result<Vec<RecordedInstrument>> {
    let file = File::open(path)?;
    let instruments = serde_json::from_reader(BufReader::new(file))?;
    Ok(instruments)
}

/// Load instruments, choosing the format from the file extension
pub fn load_instruments<P: AsRef<Path>>(path: P) -> Result<Vec<RecordedInstrument>> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("csv") => load_instruments_csv(path),
        Some("json") => load_instruments_json(path),
        other => Err(LienError::InvalidRecord(format!(
            "unsupported instrument export format: {}",
            other.unwrap_or("(none)")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_instruments_from_reader() {
        let data = "\
doc_type,recording_date,instrument,grantor,grantee,amount,book,page,original_instrument
WD,01/15/2010,2010000100,Seller Sam,Buyer Bob,\"$150,000\",100,1,
MTG,01/15/2010,2010000101,Buyer Bob,Bank A,120000,100,2,
SAT,06/01/2012,2012000500,Bank A,Buyer Bob,,,,2010000101
";
        let instruments = load_instruments_from_reader(data.as_bytes()).unwrap();
        assert_eq!(instruments.len(), 3);
        assert_eq!(instruments[0].doc_type, "WD");
        assert_eq!(instruments[0].amount, Some(TextOrNumber::Text("$150,000".into())));
        assert_eq!(instruments[1].grantee.as_deref(), Some("Bank A"));
        assert_eq!(instruments[2].amount, None);
        assert_eq!(
            instruments[2].original_instrument,
            Some(TextOrNumber::Text("2010000101".into()))
        );
    }

    #[test]
    fn test_lender_borrower_columns() {
        let data = "doc_type,recording_date,instrument,borrower,lender,amount\nMTG,2018-03-01,555,Jane Roe,Credit Union,90000\n";
        let instruments = load_instruments_from_reader(data.as_bytes()).unwrap();
        assert_eq!(instruments[0].grantor.as_deref(), Some("Jane Roe"));
        assert_eq!(instruments[0].grantee.as_deref(), Some("Credit Union"));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = load_instruments("records.xlsx").unwrap_err();
        assert!(matches!(err, LienError::InvalidRecord(_)));
    }
}
