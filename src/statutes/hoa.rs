//! HOA/condo safe-harbor liability of a first mortgagee (s. 718.116, 720.3085)

/// Months of unpaid assessments a first mortgagee can be charged at most
pub const SAFE_HARBOR_MAX_MONTHS: u32 = 12;

/// Share of the original mortgage that caps safe-harbor liability
pub const SAFE_HARBOR_MORTGAGE_PCT: f64 = 0.01;

pub const DEFAULT_MONTHS_UNPAID: u32 = 12;

/// Lesser of capped unpaid dues and 1% of the original mortgage
///
/// With unknown dues the 1% cap stands alone; with an unknown mortgage
/// amount the dues figure stands alone. `None` when both are unknown.
pub fn calculate_hoa_safe_harbor(
    original_mortgage_amount: Option<f64>,
    monthly_dues: Option<f64>,
    months_unpaid: u32,
) -> Option<f64> {
    let mortgage_cap = original_mortgage_amount.map(|amount| amount * SAFE_HARBOR_MORTGAGE_PCT);
    let dues_owed = monthly_dues.map(|dues| months_unpaid.min(SAFE_HARBOR_MAX_MONTHS) as f64 * dues);

    match (dues_owed, mortgage_cap) {
        (Some(dues), Some(cap)) => Some(dues.min(cap)),
        (None, cap) => cap,
        (dues, None) => dues,
    }
}
