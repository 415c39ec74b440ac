//! Statutory lien lifetimes under Florida law
//!
//! | Lien                  | Lifetime                                  |
//! |-----------------------|-------------------------------------------|
//! | Mechanic's lien       | 1 year (s. 713.22) unless suit filed      |
//! | HOA/condo claim       | 1 year (s. 718.116 / 720.3085)            |
//! | Judgment lien         | 20 years; 10 unless re-recorded (s. 55.10) |
//! | Code enforcement lien | 20 years (s. 162.09)                      |
//! | Mortgage              | 30-year term + 5-year margin (s. 95.281)  |

use crate::records::{years_between, EncumbranceType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Age past which a judgment lien is presumed lapsed unless re-recorded
pub const JUDGMENT_RERECORD_YEARS: f64 = 10.0;

/// Hard lifetime in years per lien type
const LIFETIMES: &[(EncumbranceType, f64)] = &[
    (EncumbranceType::MechanicsLien, 1.0),
    (EncumbranceType::HoaLien, 1.0),
    (EncumbranceType::Judgment, 20.0),
    (EncumbranceType::CodeEnforcementLien, 20.0),
    (EncumbranceType::Mortgage, 35.0),
];

/// Lifetime in years for a lien type, `None` if it does not lapse by age
pub fn statutory_lifetime(lien_type: EncumbranceType) -> Option<f64> {
    LIFETIMES
        .iter()
        .find(|(kind, _)| *kind == lien_type)
        .map(|(_, years)| *years)
}

/// Result of an expiration check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expiration {
    pub expired: bool,
    /// Expired on a presumption rather than the hard limit
    pub likely: bool,
    pub reason: String,
}

impl Expiration {
    fn active(reason: String) -> Self {
        Self {
            expired: false,
            likely: false,
            reason,
        }
    }

    /// Tuple view: (expired, reason)
    pub fn into_pair(self) -> (bool, String) {
        (self.expired, self.reason)
    }
}

/// Check whether a lien has lapsed by age as of `as_of`
///
/// A missing recording date is not evidence of expiration.
pub fn check_expiration(
    lien_type: EncumbranceType,
    recording_date: Option<NaiveDate>,
    as_of: NaiveDate,
) -> Expiration {
    let Some(recorded) = recording_date else {
        return Expiration::active("No recording date; expiration cannot be determined".to_string());
    };
    let Some(lifetime) = statutory_lifetime(lien_type) else {
        return Expiration::active(format!("No statutory lifetime for {}", lien_type.as_str()));
    };

    let age = years_between(recorded, as_of);
    if age > lifetime {
        return Expiration {
            expired: true,
            likely: false,
            reason: format!(
                "{} recorded {:.1} years ago exceeds the {}-year statutory limit",
                lien_type.as_str(),
                age,
                lifetime
            ),
        };
    }

    if lien_type == EncumbranceType::Judgment && age > JUDGMENT_RERECORD_YEARS {
        return Expiration {
            expired: true,
            likely: true,
            reason: format!(
                "judgment recorded {:.1} years ago; likely expired (>10 years, not re-recorded)",
                age
            ),
        };
    }

    Expiration::active(format!(
        "{} recorded {:.1} years ago is within its {}-year limit",
        lien_type.as_str(),
        age.max(0.0),
        lifetime
    ))
}

/// Tuple form of [`check_expiration`]
pub fn is_expired(
    lien_type: EncumbranceType,
    recording_date: Option<NaiveDate>,
    as_of: NaiveDate,
) -> (bool, String) {
    check_expiration(lien_type, recording_date, as_of).into_pair()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_mechanics_lien_boundary() {
        let (expired, _) = is_expired(
            EncumbranceType::MechanicsLien,
            Some(as_of() - Duration::days(366)),
            as_of(),
        );
        assert!(expired);

        let (expired, _) = is_expired(
            EncumbranceType::MechanicsLien,
            Some(as_of() - Duration::days(364)),
            as_of(),
        );
        assert!(!expired);
    }

    #[test]
    fn test_hoa_claim_of_lien() {
        let recorded = NaiveDate::from_ymd_opt(2023, 1, 15);
        assert!(is_expired(EncumbranceType::HoaLien, recorded, as_of()).0);
    }

    #[test]
    fn test_judgment_bands() {
        let fresh = check_expiration(
            EncumbranceType::Judgment,
            NaiveDate::from_ymd_opt(2020, 1, 1),
            as_of(),
        );
        assert!(!fresh.expired);

        let stale = check_expiration(
            EncumbranceType::Judgment,
            NaiveDate::from_ymd_opt(2012, 1, 1),
            as_of(),
        );
        assert!(stale.expired);
        assert!(stale.likely);
        assert!(stale.reason.contains("not re-recorded"));

        let dead = check_expiration(
            EncumbranceType::Judgment,
            NaiveDate::from_ymd_opt(2003, 1, 1),
            as_of(),
        );
        assert!(dead.expired);
        assert!(!dead.likely);
    }

    #[test]
    fn test_mortgage_lifetime() {
        assert!(is_expired(EncumbranceType::Mortgage, NaiveDate::from_ymd_opt(1989, 1, 1), as_of()).0);
        assert!(!is_expired(EncumbranceType::Mortgage, NaiveDate::from_ymd_opt(1995, 1, 1), as_of()).0);
    }

    #[test]
    fn test_code_enforcement_lifetime() {
        assert!(is_expired(EncumbranceType::CodeEnforcementLien, NaiveDate::from_ymd_opt(2004, 1, 1), as_of()).0);
        assert!(!is_expired(EncumbranceType::CodeEnforcementLien, NaiveDate::from_ymd_opt(2010, 1, 1), as_of()).0);
    }

    #[test]
    fn test_missing_date_not_expired() {
        let (expired, reason) = is_expired(EncumbranceType::MechanicsLien, None, as_of());
        assert!(!expired);
        assert!(reason.contains("No recording date"));
    }

    #[test]
    fn test_tax_lien_never_lapses_by_age() {
        assert!(!is_expired(EncumbranceType::TaxLien, NaiveDate::from_ymd_opt(1970, 1, 1), as_of()).0);
        assert_eq!(statutory_lifetime(EncumbranceType::TaxLien), None);
    }
}
