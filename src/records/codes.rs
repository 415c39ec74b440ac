//! Document-type code table
//!
//! County exports label instruments with short codes (`MTG`, `WD`), codes with a
//! description (`(MTG) MORTGAGE`), or free text (`CLAIM OF LIEN`). Everything is
//! normalized here so the rest of the engine only ever sees `DocumentType`.

use super::data::DocumentType;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Exact code lookup
static CODE_TABLE: Lazy<HashMap<&'static str, DocumentType>> = Lazy::new(|| {
    use DocumentType::*;
    HashMap::from([
        // Deeds
        ("WD", WarrantyDeed),
        ("WARRANTY DEED", WarrantyDeed),
        ("SWD", SpecialWarrantyDeed),
        ("QC", QuitClaimDeed),
        ("QCD", QuitClaimDeed),
        ("TD", TaxDeed),
        ("TAXD", TaxDeed),
        ("CT", CertificateOfTitle),
        ("COT", CertificateOfTitle),
        ("PRD", PersonalRepresentativeDeed),
        ("TRD", TrusteeDeed),
        ("D", Deed),
        ("DEED", Deed),
        // Mortgages
        ("MTG", Mortgage),
        ("MORT", Mortgage),
        ("DOT", Mortgage),
        ("HELOC", Mortgage),
        ("MORTGAGE", Mortgage),
        // Judgments and suits
        ("JUD", Judgment),
        ("JDG", Judgment),
        ("FJ", Judgment),
        ("CJ", Judgment),
        ("LP", LisPendens),
        ("LIS", LisPendens),
        // Liens
        ("TL", TaxLien),
        ("TAXL", TaxLien),
        ("FTL", FederalTaxLien),
        ("IRS", FederalTaxLien),
        ("HOA", HoaLien),
        ("COA", HoaLien),
        ("CL", HoaLien),
        ("ML", MechanicsLien),
        ("MECH", MechanicsLien),
        ("CE", CodeEnforcementLien),
        ("CEL", CodeEnforcementLien),
        ("PACE", PaceLien),
        ("UTL", UtilityLien),
        ("LN", Lien),
        ("LIEN", Lien),
        // Satisfactions
        ("SAT", Satisfaction),
        ("SATM", Satisfaction),
        ("SM", Satisfaction),
        ("REL", Release),
        ("RL", Release),
        ("RELLN", Release),
        // Ignored
        ("ASG", Assignment),
        ("ASN", Assignment),
        ("ASSIGN", Assignment),
    ])
});

/// Keyword scan for free text, most specific phrase first
const KEYWORDS: &[(&str, DocumentType)] = &[
    ("SATISFACTION", DocumentType::Satisfaction),
    ("RELEASE", DocumentType::Release),
    ("ASSIGNMENT", DocumentType::Assignment),
    ("LIS PENDENS", DocumentType::LisPendens),
    ("NOTICE OF ACTION", DocumentType::LisPendens),
    ("CERTIFICATE OF TITLE", DocumentType::CertificateOfTitle),
    ("TAX DEED", DocumentType::TaxDeed),
    ("SPECIAL WARRANTY", DocumentType::SpecialWarrantyDeed),
    ("WARRANTY DEED", DocumentType::WarrantyDeed),
    ("QUIT CLAIM", DocumentType::QuitClaimDeed),
    ("QUITCLAIM", DocumentType::QuitClaimDeed),
    ("PERSONAL REPRESENTATIVE", DocumentType::PersonalRepresentativeDeed),
    ("DEED OF TRUST", DocumentType::Mortgage),
    ("TRUSTEE'S DEED", DocumentType::TrusteeDeed),
    ("TRUSTEES DEED", DocumentType::TrusteeDeed),
    ("TRUSTEE DEED", DocumentType::TrusteeDeed),
    ("DEED", DocumentType::Deed),
    ("MORTGAGE", DocumentType::Mortgage),
    ("FEDERAL TAX LIEN", DocumentType::FederalTaxLien),
    ("INTERNAL REVENUE", DocumentType::FederalTaxLien),
    ("TAX LIEN", DocumentType::TaxLien),
    ("TAX CERTIFICATE", DocumentType::TaxLien),
    ("PACE", DocumentType::PaceLien),
    ("CODE ENFORCEMENT", DocumentType::CodeEnforcementLien),
    ("CODE VIOLATION", DocumentType::CodeEnforcementLien),
    ("CONSTRUCTION LIEN", DocumentType::MechanicsLien),
    ("MECHANIC", DocumentType::MechanicsLien),
    ("CLAIM OF LIEN", DocumentType::HoaLien),
    ("ASSOCIATION", DocumentType::HoaLien),
    ("UTILITY", DocumentType::UtilityLien),
    ("JUDGMENT", DocumentType::Judgment),
    ("LIEN", DocumentType::Lien),
];

/// Normalize a free-text document-type code
pub fn normalize_doc_type(raw: &str) -> DocumentType {
    let upper = raw.trim().to_uppercase();
    if upper.is_empty() {
        return DocumentType::Other;
    }

    // "(MTG) MORTGAGE" -> "MTG"
    if let Some(rest) = upper.strip_prefix('(') {
        if let Some((code, _)) = rest.split_once(')') {
            if let Some(doc_type) = CODE_TABLE.get(code.trim()) {
                return *doc_type;
            }
        }
    }

    if let Some(doc_type) = CODE_TABLE.get(upper.as_str()) {
        return *doc_type;
    }

    KEYWORDS
        .iter()
        .find(|(keyword, _)| upper.contains(keyword))
        .map(|(_, doc_type)| *doc_type)
        .unwrap_or(DocumentType::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_codes() {
        assert_eq!(normalize_doc_type("WD"), DocumentType::WarrantyDeed);
        assert_eq!(normalize_doc_type("qc"), DocumentType::QuitClaimDeed);
        assert_eq!(normalize_doc_type("TD"), DocumentType::TaxDeed);
        assert_eq!(normalize_doc_type("CT"), DocumentType::CertificateOfTitle);
        assert_eq!(normalize_doc_type("MTG"), DocumentType::Mortgage);
        assert_eq!(normalize_doc_type("DOT"), DocumentType::Mortgage);
        assert_eq!(normalize_doc_type("JUD"), DocumentType::Judgment);
        assert_eq!(normalize_doc_type("LP"), DocumentType::LisPendens);
        assert_eq!(normalize_doc_type("LN"), DocumentType::Lien);
        assert_eq!(normalize_doc_type("SAT"), DocumentType::Satisfaction);
        assert_eq!(normalize_doc_type("REL"), DocumentType::Release);
    }

    #[test]
    fn test_parenthesized_codes() {
        assert_eq!(normalize_doc_type("(MTG) MORTGAGE"), DocumentType::Mortgage);
        assert_eq!(normalize_doc_type("(LP) LIS PENDENS"), DocumentType::LisPendens);
        assert_eq!(normalize_doc_type("(D) DEED"), DocumentType::Deed);
    }

    #[test]
    fn test_keyword_fallback_prefers_specific_phrases() {
        assert_eq!(normalize_doc_type("Federal Tax Lien"), DocumentType::FederalTaxLien);
        assert_eq!(normalize_doc_type("COUNTY TAX LIEN"), DocumentType::TaxLien);
        assert_eq!(normalize_doc_type("TAX DEED - COUNTY"), DocumentType::TaxDeed);
        assert_eq!(normalize_doc_type("SATISFACTION OF MORTGAGE"), DocumentType::Satisfaction);
        assert_eq!(normalize_doc_type("CLAIM OF LIEN"), DocumentType::HoaLien);
        assert_eq!(normalize_doc_type("NOTICE OF CONSTRUCTION LIEN"), DocumentType::MechanicsLien);
        assert_eq!(normalize_doc_type("FINAL JUDGMENT"), DocumentType::Judgment);
        assert_eq!(normalize_doc_type("DEED OF TRUST"), DocumentType::Mortgage);
        assert_eq!(normalize_doc_type("Trustee's Deed"), DocumentType::TrusteeDeed);
        assert_eq!(normalize_doc_type("SUCCESSOR TRUSTEE AFFIDAVIT"), DocumentType::Other);
    }

    #[test]
    fn test_unknown_is_other() {
        assert_eq!(normalize_doc_type(""), DocumentType::Other);
        assert_eq!(normalize_doc_type("NOTICE OF COMMENCEMENT"), DocumentType::Other);
    }
}
