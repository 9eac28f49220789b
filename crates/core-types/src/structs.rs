use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::Granularity;

/// A single order transaction.
///
/// `order_date` is the primary filtering key. It should agree with
/// `order_time.date()`, but the two are treated as independently
/// authoritative; ingestion does not reconcile them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_date: NaiveDate,
    pub order_time: NaiveDateTime,
    /// Must be >= `order_time` for a valid record; earlier serve times are
    /// data-quality anomalies handled by the latency analyzer.
    pub serve_time: NaiveDateTime,
    pub menu_item: String,
    /// Open set of category labels (e.g. "Food", "Drink").
    pub category: String,
    /// Non-negative order amount.
    pub price: Decimal,
}

/// An immutable, validated in-memory collection of order records.
///
/// Constructed once from input data and never mutated; a reload replaces the
/// store wholesale. Every downstream view is a pure function of this store
/// plus query parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordStore {
    records: Vec<OrderRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<OrderRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The (earliest, latest) order date in the store, or `None` when empty.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.order_date).min()?;
        let max = self.records.iter().map(|r| r.order_date).max()?;
        Some((min, max))
    }
}

/// A fixed-width calendar interval used to group records.
///
/// Buckets are totally ordered by their start date. Two dates in the same
/// calendar week (Monday start) or calendar month always map to the
/// identical bucket, including across year boundaries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TimeBucket {
    // Field order matters: the derived ordering compares `start` first.
    start: NaiveDate,
    granularity: Granularity,
}

impl TimeBucket {
    /// The bucket containing `date` at the given granularity.
    pub fn containing(date: NaiveDate, granularity: Granularity) -> Self {
        let start = match granularity {
            Granularity::Week => {
                date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
            }
            Granularity::Month => first_of_month(date.year(), date.month()),
        };
        Self { start, granularity }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// The immediately following bucket at the same granularity.
    pub fn next(&self) -> Self {
        let start = match self.granularity {
            Granularity::Week => self.start + Duration::days(7),
            Granularity::Month => {
                let (year, month) = if self.start.month() == 12 {
                    (self.start.year() + 1, 1)
                } else {
                    (self.start.year(), self.start.month() + 1)
                };
                first_of_month(year, month)
            }
        };
        Self {
            start,
            granularity: self.granularity,
        }
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("the first of a month is a valid date")
}
