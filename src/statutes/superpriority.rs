//! Superpriority and federal lien classification
//!
//! Superpriority liens (PACE, ad valorem tax, municipal utility, code
//! enforcement) survive a foreclosure no matter when they were recorded.
//! Federal status is informational only: it changes the procedure for
//! removing the lien, not whether it survives.

use crate::records::EncumbranceType;

/// Clean-energy (PACE) program administrators and program wording
const PACE_TERMS: &[&str] = &[
    "PACE",
    "YGRENE",
    "RENEW FINANCIAL",
    "RENOVATE AMERICA",
    "CLEAN ENERGY",
    "ENERGY IMPROVEMENT",
    "FLORIDA GREEN FINANCE",
];

const PROPERTY_TAX_TERMS: &[&str] = &["TAX COLLECTOR", "AD VALOREM", "PROPERTY TAX"];

const TAX_DEED_TERMS: &[&str] = &["TAX DEED"];

const MUNICIPAL_TERMS: &[&str] = &[
    "CITY OF",
    "TOWN OF",
    "VILLAGE OF",
    "COUNTY",
    "MUNICIPAL",
    "UTILITY AUTHORITY",
    "WATER AUTHORITY",
];

const UTILITY_TERMS: &[&str] = &[
    "UTILITY",
    "UTILITIES",
    "WATER",
    "SEWER",
    "WASTEWATER",
    "STORMWATER",
    "SOLID WASTE",
];

const CODE_ENFORCEMENT_TERMS: &[&str] = &["CODE ENFORCEMENT", "CODE COMPLIANCE", "SPECIAL MAGISTRATE"];

const FEDERAL_TERMS: &[&str] = &[
    "INTERNAL REVENUE",
    "IRS",
    "UNITED STATES",
    "USA",
    "U S A",
    "SECRETARY OF HOUSING",
    "HOUSING AND URBAN DEVELOPMENT",
    "HUD",
    "SMALL BUSINESS ADMINISTRATION",
    "SBA",
    "DEPARTMENT OF THE TREASURY",
];

/// Creditor text reduced to `" WORD WORD "` so terms match on word boundaries
fn padded(creditor: Option<&str>) -> String {
    let cleaned: String = creditor
        .unwrap_or("")
        .to_uppercase()
        .chars()
        .filter(|c| *c != '.')
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    format!(" {} ", cleaned.split_whitespace().collect::<Vec<_>>().join(" "))
}

fn names_any(padded_creditor: &str, terms: &[&str]) -> bool {
    terms
        .iter()
        .any(|term| padded_creditor.contains(&format!(" {} ", term)))
}

/// Whether a lien survives foreclosure regardless of recording order
pub fn is_superpriority(lien_type: EncumbranceType, creditor: Option<&str>) -> bool {
    let creditor = padded(creditor);

    // Tax deeds pass title; they are never a surviving lien
    if names_any(&creditor, TAX_DEED_TERMS) {
        return false;
    }

    match lien_type {
        EncumbranceType::PaceLien
        | EncumbranceType::TaxLien
        | EncumbranceType::UtilityLien
        | EncumbranceType::CodeEnforcementLien => true,
        EncumbranceType::FederalTaxLien => false,
        _ => {
            names_any(&creditor, PACE_TERMS)
                || names_any(&creditor, PROPERTY_TAX_TERMS)
                || names_any(&creditor, CODE_ENFORCEMENT_TERMS)
                || (names_any(&creditor, MUNICIPAL_TERMS) && names_any(&creditor, UTILITY_TERMS))
        }
    }
}

/// Whether the lienholder is the IRS or another U.S. government creditor
pub fn is_federal_lien(lien_type: EncumbranceType, creditor: Option<&str>) -> bool {
    lien_type == EncumbranceType::FederalTaxLien || names_any(&padded(creditor), FEDERAL_TERMS)
}
