use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use core_types::{Granularity, OrderRecord, TimeBucket};
use indexmap::IndexMap;

use crate::error::AnalyticsError;
use crate::report::{LatencyRow, LatencySummary};

/// Order-to-serve duration in fractional minutes.
///
/// Returns `None` for anomalous records whose serve time precedes the order
/// time; including those as negative durations would corrupt the means, so
/// they are excluded and counted separately.
pub fn duration_minutes(record: &OrderRecord) -> Option<f64> {
    let delta = record.serve_time - record.order_time;
    if delta < Duration::zero() {
        return None;
    }
    Some(delta.num_milliseconds() as f64 / 60_000.0)
}

/// Mean service duration per (week, category), keyed by the Monday starting
/// each week of the order time.
pub fn mean_duration_by_week(records: &[OrderRecord]) -> LatencySummary {
    mean_duration_by(records, |date| {
        TimeBucket::containing(date, Granularity::Week).start()
    })
}

/// Mean service duration per (calendar day, category) of the order time.
pub fn mean_duration_by_day(records: &[OrderRecord]) -> LatencySummary {
    mean_duration_by(records, |date| date)
}

fn mean_duration_by<F>(records: &[OrderRecord], day_key: F) -> LatencySummary
where
    F: Fn(NaiveDate) -> NaiveDate,
{
    // Day groups sort ascending; categories keep per-day encounter order.
    let mut groups: BTreeMap<NaiveDate, IndexMap<String, (f64, u64)>> = BTreeMap::new();
    let mut anomalies = 0;

    for record in records {
        match duration_minutes(record) {
            None => anomalies += 1,
            Some(minutes) => {
                let day = day_key(record.order_time.date());
                let (sum, count) = groups
                    .entry(day)
                    .or_default()
                    .entry(record.category.clone())
                    .or_insert((0.0, 0));
                *sum += minutes;
                *count += 1;
            }
        }
    }

    let rows = groups
        .into_iter()
        .flat_map(|(day, by_category)| {
            by_category
                .into_iter()
                .map(move |(category, (sum, count))| LatencyRow {
                    day,
                    category,
                    mean_minutes: sum / count as f64,
                })
        })
        .collect();

    LatencySummary { rows, anomalies }
}

/// The single row with the greatest mean duration.
///
/// The input rows are expected in summary order (day ascending, category by
/// first encounter); a strictly-greater scan then breaks ties in favor of
/// the earliest day and first category.
pub fn max_duration_day(rows: &[LatencyRow]) -> Result<LatencyRow, AnalyticsError> {
    let mut best: Option<&LatencyRow> = None;
    for row in rows {
        if best.is_none_or(|b| row.mean_minutes > b.mean_minutes) {
            best = Some(row);
        }
    }
    best.cloned().ok_or_else(|| {
        AnalyticsError::EmptyInput("max duration lookup requires at least one row".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn at(date: NaiveDate, h: u32, min: u32, s: u32) -> NaiveDateTime {
        date.and_hms_opt(h, min, s).unwrap()
    }

    fn record(
        date: NaiveDate,
        category: &str,
        order_time: NaiveDateTime,
        serve_time: NaiveDateTime,
    ) -> OrderRecord {
        OrderRecord {
            order_date: date,
            order_time,
            serve_time,
            menu_item: "item".to_string(),
            category: category.to_string(),
            price: Decimal::from(10),
        }
    }

    #[test]
    fn duration_is_fractional_minutes() {
        let date = d(2023, 1, 2);
        let r = record(date, "Food", at(date, 12, 0, 0), at(date, 12, 15, 30));
        assert_eq!(duration_minutes(&r), Some(15.5));
    }

    #[test]
    fn negative_duration_is_anomalous() {
        let date = d(2023, 1, 2);
        let r = record(date, "Food", at(date, 12, 15, 0), at(date, 12, 0, 0));
        assert_eq!(duration_minutes(&r), None);
    }

    #[test]
    fn anomalous_records_are_excluded_from_means_and_counted() {
        let date = d(2023, 1, 2);
        let records = vec![
            record(date, "Food", at(date, 12, 0, 0), at(date, 12, 10, 0)),
            record(date, "Food", at(date, 12, 0, 0), at(date, 11, 50, 0)),
        ];
        let summary = mean_duration_by_day(&records);
        assert_eq!(summary.anomalies, 1);
        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].mean_minutes, 10.0);
    }

    #[test]
    fn weekly_view_groups_by_monday_of_order_time() {
        // Wednesday and Friday of the same week fold into Monday 2023-01-02.
        let wed = d(2023, 1, 4);
        let fri = d(2023, 1, 6);
        let records = vec![
            record(wed, "Food", at(wed, 12, 0, 0), at(wed, 12, 10, 0)),
            record(fri, "Food", at(fri, 12, 0, 0), at(fri, 12, 20, 0)),
        ];
        let summary = mean_duration_by_week(&records);
        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].day, d(2023, 1, 2));
        assert_eq!(summary.rows[0].mean_minutes, 15.0);
    }

    #[test]
    fn daily_view_keeps_days_and_categories_separate() {
        let mon = d(2023, 1, 2);
        let tue = d(2023, 1, 3);
        let records = vec![
            record(mon, "Drink", at(mon, 9, 0, 0), at(mon, 9, 5, 0)),
            record(mon, "Food", at(mon, 12, 0, 0), at(mon, 12, 20, 0)),
            record(tue, "Food", at(tue, 12, 0, 0), at(tue, 12, 30, 0)),
        ];
        let summary = mean_duration_by_day(&records);
        let keys: Vec<_> = summary
            .rows
            .iter()
            .map(|r| (r.day, r.category.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![(mon, "Drink"), (mon, "Food"), (tue, "Food")]
        );
    }

    #[test]
    fn max_duration_tie_breaks_on_earliest_day() {
        let rows = vec![
            LatencyRow {
                day: d(2023, 1, 2),
                category: "A".to_string(),
                mean_minutes: 10.0,
            },
            LatencyRow {
                day: d(2023, 1, 3),
                category: "B".to_string(),
                mean_minutes: 25.0,
            },
            LatencyRow {
                day: d(2023, 1, 4),
                category: "A".to_string(),
                mean_minutes: 25.0,
            },
        ];
        let max = max_duration_day(&rows).unwrap();
        assert_eq!(max.day, d(2023, 1, 3));
        assert_eq!(max.category, "B");
        assert_eq!(max.mean_minutes, 25.0);
    }

    #[test]
    fn max_duration_on_empty_input_is_an_error() {
        let result = max_duration_day(&[]);
        assert!(matches!(result, Err(AnalyticsError::EmptyInput(_))));
    }
}
