use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One company entry exactly as the provider returned it
pub type RawRecord = serde_json::Value;

/// A licensed firm after cleaning. Counts and changes are always present;
/// percentages and dates are either valid or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseRecord {
    pub rank: Option<i64>,
    pub company_name: String,
    pub company_url: String,

    pub responsible_officers: i64,
    pub other_licensed_individuals: i64,
    pub total_licensed_individuals: i64,

    pub ro_change: i64,
    pub oli_change: i64,
    pub total_change: i64,

    pub historical_ro_change: Option<i64>,
    pub historical_oli_change: Option<i64>,
    pub historical_total_change: Option<i64>,

    pub ro_percentage: Option<f64>,
    pub oli_percentage: Option<f64>,

    pub first_licensed_date: Option<NaiveDate>,
    pub latest_licensed_date: Option<NaiveDate>,

    pub sfc_id: Option<String>,
    pub activities: Vec<String>,
}

/// Count-weighted summary figures over a set of records
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CompanyStatistics {
    pub average_ro_count: f64,
    pub average_oli_count: f64,
    pub average_total_count: f64,
    pub average_ro_percentage: f64,
    pub total_companies: usize,
}

/// The output artifact: cleaned companies plus their statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseReport {
    pub companies: Vec<LicenseRecord>,
    pub average_ro_count: f64,
    pub average_oli_count: f64,
    pub average_total_count: f64,
    pub average_ro_percentage: f64,
    pub total_companies: usize,
}

impl LicenseReport {
    pub fn new(companies: Vec<LicenseRecord>, stats: CompanyStatistics) -> Self {
        Self {
            companies,
            average_ro_count: stats.average_ro_count,
            average_oli_count: stats.average_oli_count,
            average_total_count: stats.average_total_count,
            average_ro_percentage: stats.average_ro_percentage,
            total_companies: stats.total_companies,
        }
    }

    pub fn statistics(&self) -> CompanyStatistics {
        CompanyStatistics {
            average_ro_count: self.average_ro_count,
            average_oli_count: self.average_oli_count,
            average_total_count: self.average_total_count,
            average_ro_percentage: self.average_ro_percentage,
            total_companies: self.total_companies,
        }
    }
}
