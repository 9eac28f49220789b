use std::path::PathBuf;

use chrono::NaiveDate;
use core_types::Granularity;
use serde::Deserialize;

/// The root configuration structure for the application.
///
/// Every field has a default, so the configuration file is optional and may
/// be partial; command-line flags override whatever is configured here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataSettings,
    pub report: ReportSettings,
}

/// Where the order data lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Path to the order CSV.
    pub path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/orders.csv"),
        }
    }
}

/// Default report parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Bucket width for the sales series ("week" or "month").
    pub granularity: Granularity,
    /// Materialize zero-total buckets between the first and last observed one.
    pub dense_fill: bool,
    /// Start of the default date range; the earliest order date when unset.
    pub start_date: Option<NaiveDate>,
    /// End of the default date range; the latest order date when unset.
    pub end_date: Option<NaiveDate>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            granularity: Granularity::Week,
            dense_fill: false,
            start_date: None,
            end_date: None,
        }
    }
}
