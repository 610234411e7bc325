use crate::types::{CompanyStatistics, LicenseRecord};

/// Round to two decimal places using the correctly-rounded decimal form of `x`.
pub fn round2(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    format!("{:.2}", x).parse().unwrap_or(x)
}

/// Summary figures over the cleaned companies.
///
/// The RO percentage is weighted by each firm's total licensed individuals.
/// Firms without a percentage add nothing to the numerator but still count
/// toward the denominator.
pub fn calculate_statistics(companies: &[LicenseRecord]) -> CompanyStatistics {
    if companies.is_empty() {
        return CompanyStatistics::default();
    }

    let n = companies.len() as f64;
    // Widened so large counts can't overflow the sums
    let total_ro: i128 = companies.iter().map(|c| i128::from(c.responsible_officers)).sum();
    let total_oli: i128 = companies.iter().map(|c| i128::from(c.other_licensed_individuals)).sum();
    let total_licensed: i128 = companies
        .iter()
        .map(|c| i128::from(c.total_licensed_individuals))
        .sum();

    let weighted_percentage: f64 = companies
        .iter()
        .filter_map(|c| c.ro_percentage.map(|p| p * c.total_licensed_individuals as f64))
        .sum();

    let average_ro_percentage = if total_licensed > 0 {
        weighted_percentage / total_licensed as f64
    } else {
        0.0
    };

    CompanyStatistics {
        average_ro_count: round2(total_ro as f64 / n),
        average_oli_count: round2(total_oli as f64 / n),
        average_total_count: round2(total_licensed as f64 / n),
        average_ro_percentage: round2(average_ro_percentage),
        total_companies: companies.len(),
    }
}
