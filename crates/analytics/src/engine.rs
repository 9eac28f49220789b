use core_types::{Granularity, OrderRecord};
use uuid::Uuid;

use crate::aggregate::{count_by_key, grouped_count, grouped_sum, sum_by_bucket};
use crate::error::AnalyticsError;
use crate::filter::filter_range;
use crate::latency::{max_duration_day, mean_duration_by_day, mean_duration_by_week};
use crate::report::{OrderReport, ReportQuery};

/// A stateless calculator that derives every analytical view from a record
/// set and a query.
///
/// Inputs are immutable, outputs are freshly allocated per call, so
/// concurrent callers are independently safe without locking.
#[derive(Debug, Default)]
pub struct ReportEngine {}

impl ReportEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every report view over the records that fall inside the query's
    /// date range.
    ///
    /// A range containing no records is a valid no-op query: the result has
    /// empty series and `max_latency_day: None`. Only the standalone
    /// `max_duration_day` operation treats empty input as an error.
    pub fn run(
        &self,
        records: &[OrderRecord],
        query: &ReportQuery,
    ) -> Result<OrderReport, AnalyticsError> {
        let in_range = filter_range(records, query.start_date, query.end_date);
        tracing::debug!(
            records = in_range.len(),
            granularity = %query.granularity,
            "running report over filtered subset"
        );

        let sales_series = sum_by_bucket(&in_range, query.granularity, query.dense_fill);
        let popularity = count_by_key(&in_range, |r| r.menu_item.as_str());
        let category_share = count_by_key(&in_range, |r| r.category.as_str());

        // The category comparison views are month-bucketed regardless of the
        // query granularity; the sales series alone follows the query.
        let category_orders_by_month =
            grouped_count(&in_range, Granularity::Month, |r| r.category.as_str());
        let category_sales_by_month =
            grouped_sum(&in_range, Granularity::Month, |r| r.category.as_str());

        let weekly_latency = mean_duration_by_week(&in_range);
        let daily_latency = mean_duration_by_day(&in_range);
        let max_latency_day = max_duration_day(&daily_latency.rows).ok();

        Ok(OrderReport {
            report_id: Uuid::new_v4(),
            records_in_range: in_range.len(),
            sales_series,
            popularity,
            category_share,
            category_orders_by_month,
            category_sales_by_month,
            weekly_latency,
            daily_latency,
            max_latency_day,
        })
    }
}
