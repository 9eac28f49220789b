//! CSV ingestion for order records.
//!
//! Reads the tabular order file (`Date, Order Time, Serve Time, Menu,
//! Category, Price`) into a validated, immutable [`RecordStore`]. A record
//! missing a required field or carrying an unparseable timestamp or price is
//! reported as a [`IngestError::MalformedRecord`] with its row number, never
//! silently dropped. A serve time earlier than the order time is NOT a load
//! error; that anomaly is the latency analyzer's policy to handle.

use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use core_types::{OrderRecord, RecordStore};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

pub mod error;

pub use error::IngestError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Raw row shape as it appears in the CSV, before validation.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Order Time")]
    order_time: String,
    #[serde(rename = "Serve Time")]
    serve_time: String,
    #[serde(rename = "Menu")]
    menu: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Price")]
    price: String,
}

impl CsvRow {
    fn into_record(self, row: usize) -> Result<OrderRecord, IngestError> {
        let malformed = |reason: String| IngestError::MalformedRecord { row, reason };

        let order_date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
            .map_err(|e| malformed(format!("unparseable date '{}': {e}", self.date)))?;
        let order_time = NaiveDateTime::parse_from_str(&self.order_time, TIMESTAMP_FORMAT)
            .map_err(|e| malformed(format!("unparseable order time '{}': {e}", self.order_time)))?;
        let serve_time = NaiveDateTime::parse_from_str(&self.serve_time, TIMESTAMP_FORMAT)
            .map_err(|e| malformed(format!("unparseable serve time '{}': {e}", self.serve_time)))?;
        let price: Decimal = self
            .price
            .trim()
            .parse()
            .map_err(|e| malformed(format!("unparseable price '{}': {e}", self.price)))?;

        if self.menu.trim().is_empty() {
            return Err(malformed("empty menu item".to_string()));
        }
        if price.is_sign_negative() {
            return Err(malformed(format!("negative price '{}'", self.price)));
        }

        Ok(OrderRecord {
            order_date,
            order_time,
            serve_time,
            menu_item: self.menu,
            category: self.category,
            price,
        })
    }
}

/// Loads and validates the order CSV at `path`.
pub fn load_records(path: impl AsRef<Path>) -> Result<RecordStore, IngestError> {
    let path = path.as_ref();
    info!(path = %path.display(), "reading order data");
    let reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    load_inner(reader)
}

/// Loads and validates order CSV from any reader; used by callers that hold
/// the data in memory (and by tests).
pub fn load_from_reader<R: Read>(reader: R) -> Result<RecordStore, IngestError> {
    load_inner(ReaderBuilder::new().has_headers(true).from_reader(reader))
}

fn load_inner<R: Read>(mut reader: csv::Reader<R>) -> Result<RecordStore, IngestError> {
    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<CsvRow>().enumerate() {
        // Row numbers are 1-based and the header occupies row 1.
        let row = idx + 2;
        let raw = result.map_err(|e| IngestError::MalformedRecord {
            row,
            reason: e.to_string(),
        })?;
        records.push(raw.into_record(row)?);
    }
    info!(records = records.len(), "loaded order records");
    Ok(RecordStore::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str = "Date,Order Time,Serve Time,Menu,Category,Price\n";

    fn load(body: &str) -> Result<RecordStore, IngestError> {
        load_from_reader(format!("{HEADER}{body}").as_bytes())
    }

    #[test]
    fn well_formed_rows_load_into_the_store() {
        let store = load(
            "2023-01-02,2023-01-02 12:00:00,2023-01-02 12:15:30,Burger,Food,12.50\n\
             2023-01-03,2023-01-03 09:30:00,2023-01-03 09:34:00,Cola,Drink,3.00\n",
        )
        .unwrap();
        assert_eq!(store.len(), 2);
        let first = &store.records()[0];
        assert_eq!(first.menu_item, "Burger");
        assert_eq!(first.price, dec!(12.50));
        assert_eq!(
            first.order_date,
            NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
        );
    }

    #[test]
    fn unparseable_price_is_reported_with_row_number() {
        let err = load("2023-01-02,2023-01-02 12:00:00,2023-01-02 12:15:00,Burger,Food,twelve\n")
            .unwrap_err();
        match err {
            IngestError::MalformedRecord { row, reason } => {
                assert_eq!(row, 2);
                assert!(reason.contains("price"));
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_timestamp_is_rejected() {
        let err = load("2023-01-02,noon,2023-01-02 12:15:00,Burger,Food,12.50\n").unwrap_err();
        assert!(matches!(err, IngestError::MalformedRecord { row: 2, .. }));
    }

    #[test]
    fn empty_menu_item_is_rejected() {
        let err = load("2023-01-02,2023-01-02 12:00:00,2023-01-02 12:15:00, ,Food,12.50\n")
            .unwrap_err();
        assert!(matches!(err, IngestError::MalformedRecord { row: 2, .. }));
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = load("2023-01-02,2023-01-02 12:00:00,2023-01-02 12:15:00,Burger,Food,-5\n")
            .unwrap_err();
        assert!(matches!(err, IngestError::MalformedRecord { row: 2, .. }));
    }

    #[test]
    fn missing_field_is_rejected_not_skipped() {
        let err = load("2023-01-02,2023-01-02 12:00:00,2023-01-02 12:15:00,Burger,Food\n")
            .unwrap_err();
        assert!(matches!(err, IngestError::MalformedRecord { row: 2, .. }));
    }

    #[test]
    fn serve_before_order_loads_fine() {
        // The anomaly is a latency-analysis policy, not a load error.
        let store = load("2023-01-02,2023-01-02 12:00:00,2023-01-02 11:50:00,Burger,Food,12.50\n")
            .unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn second_bad_row_reports_row_three() {
        let err = load(
            "2023-01-02,2023-01-02 12:00:00,2023-01-02 12:15:00,Burger,Food,12.50\n\
             2023-01-03,2023-01-03 12:00:00,2023-01-03 12:15:00,Cola,Drink,oops\n",
        )
        .unwrap_err();
        assert!(matches!(err, IngestError::MalformedRecord { row: 3, .. }));
    }
}
