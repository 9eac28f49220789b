use chrono::NaiveDate;
use core_types::OrderRecord;

/// Selects the records whose `order_date` falls within the inclusive
/// `[start, end]` range, preserving the original record order.
///
/// An inverted range (`start > end`) is a zero-length query, not an error:
/// it yields an empty subset.
pub fn filter_range(records: &[OrderRecord], start: NaiveDate, end: NaiveDate) -> Vec<OrderRecord> {
    if start > end {
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| r.order_date >= start && r.order_date <= end)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn record(date: NaiveDate, item: &str) -> OrderRecord {
        OrderRecord {
            order_date: date,
            order_time: date.and_hms_opt(12, 0, 0).unwrap(),
            serve_time: date.and_hms_opt(12, 5, 0).unwrap(),
            menu_item: item.to_string(),
            category: "Food".to_string(),
            price: Decimal::from(10),
        }
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let records = vec![
            record(d(2023, 1, 1), "a"),
            record(d(2023, 1, 2), "b"),
            record(d(2023, 1, 3), "c"),
            record(d(2023, 1, 4), "d"),
        ];
        let subset = filter_range(&records, d(2023, 1, 2), d(2023, 1, 3));
        let items: Vec<_> = subset.iter().map(|r| r.menu_item.as_str()).collect();
        assert_eq!(items, vec!["b", "c"]);
    }

    #[test]
    fn inverted_range_yields_empty_subset_not_error() {
        let records = vec![record(d(2023, 1, 2), "a")];
        assert!(filter_range(&records, d(2023, 2, 1), d(2023, 1, 1)).is_empty());
    }

    #[test]
    fn original_order_is_preserved() {
        let records = vec![
            record(d(2023, 1, 3), "late"),
            record(d(2023, 1, 1), "early"),
            record(d(2023, 1, 2), "middle"),
        ];
        let subset = filter_range(&records, d(2023, 1, 1), d(2023, 1, 3));
        let items: Vec<_> = subset.iter().map(|r| r.menu_item.as_str()).collect();
        assert_eq!(items, vec!["late", "early", "middle"]);
    }
}
