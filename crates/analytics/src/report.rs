use chrono::NaiveDate;
use core_types::{Granularity, TimeBucket};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Parameters for a single report run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportQuery {
    /// Start of the inclusive order-date range.
    pub start_date: NaiveDate,
    /// End of the inclusive order-date range.
    pub end_date: NaiveDate,
    /// Bucket width for the sales series.
    pub granularity: Granularity,
    /// Materialize zero-total buckets between the first and last observed
    /// bucket of the sales series.
    pub dense_fill: bool,
}

/// One point of the revenue time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesPoint {
    pub bucket: TimeBucket,
    pub total: Decimal,
}

/// A key (menu item or category) with its order count and share of the
/// filtered total, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyCount {
    pub key: String,
    pub count: u64,
    pub share_pct: f64,
}

/// A dense (bucket x category) matrix.
///
/// The bucket axis is the union of buckets observed for any category, in
/// ascending order; the category axis is the union of observed categories in
/// first-encounter order. Cells for unobserved combinations hold the zero
/// value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedTable<T> {
    pub buckets: Vec<TimeBucket>,
    pub categories: Vec<String>,
    /// Indexed as `cells[bucket_idx][category_idx]`.
    pub cells: Vec<Vec<T>>,
}

impl<T> GroupedTable<T> {
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn value(&self, bucket_idx: usize, category_idx: usize) -> Option<&T> {
        self.cells.get(bucket_idx)?.get(category_idx)
    }
}

/// Mean service duration for one (day, category) group.
///
/// For the weekly view, `day` is the Monday starting the week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyRow {
    pub day: NaiveDate,
    pub category: String,
    pub mean_minutes: f64,
}

/// The rows of one latency view, plus the count of anomalous records
/// (serve time before order time) that were excluded from the means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    /// Ordered by day ascending, then first-encountered category.
    pub rows: Vec<LatencyRow>,
    pub anomalies: usize,
}

/// The full result bundle of one report run.
///
/// This struct is the final output of the `ReportEngine` and the data
/// transfer object consumed by the presentation layer. Nothing in it
/// persists past the request that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReport {
    pub report_id: Uuid,
    pub records_in_range: usize,

    // I. Revenue over time (query granularity).
    pub sales_series: Vec<SalesPoint>,

    // II. Popularity.
    pub popularity: Vec<KeyCount>,
    pub category_share: Vec<KeyCount>,

    // III. Category comparisons, fixed to month buckets.
    pub category_orders_by_month: GroupedTable<u64>,
    pub category_sales_by_month: GroupedTable<Decimal>,

    // IV. Service latency.
    pub weekly_latency: LatencySummary,
    pub daily_latency: LatencySummary,
    /// `None` when the filtered range produced no valid latency rows.
    pub max_latency_day: Option<LatencyRow>,
}
