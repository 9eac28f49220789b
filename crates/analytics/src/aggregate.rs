use std::collections::{BTreeMap, BTreeSet};

use core_types::{Granularity, OrderRecord, TimeBucket};
use indexmap::{IndexMap, IndexSet};
use rust_decimal::Decimal;

use crate::report::{GroupedTable, KeyCount, SalesPoint};

/// Sums order prices per time bucket, ascending by bucket start.
///
/// Buckets with no records in range are omitted unless `dense_fill` is set,
/// in which case every bucket between the first and last observed one is
/// materialized with a zero total.
pub fn sum_by_bucket(
    records: &[OrderRecord],
    granularity: Granularity,
    dense_fill: bool,
) -> Vec<SalesPoint> {
    let mut totals: BTreeMap<TimeBucket, Decimal> = BTreeMap::new();
    for record in records {
        let bucket = TimeBucket::containing(record.order_date, granularity);
        *totals.entry(bucket).or_insert(Decimal::ZERO) += record.price;
    }

    if dense_fill {
        let bounds = totals
            .keys()
            .next()
            .copied()
            .zip(totals.keys().next_back().copied());
        if let Some((first, last)) = bounds {
            let mut cursor = first;
            while cursor < last {
                cursor = cursor.next();
                totals.entry(cursor).or_insert(Decimal::ZERO);
            }
        }
    }

    totals
        .into_iter()
        .map(|(bucket, total)| SalesPoint { bucket, total })
        .collect()
}

/// Counts records per key and derives each key's percentage of the total,
/// ranked by count descending.
///
/// The sort is stable, so keys with equal counts keep their first-encounter
/// order, which makes "most popular" lookups reproducible for a given input
/// order. A zero-record input reports no rows and, by policy, percentages of
/// 0 rather than NaN.
pub fn count_by_key<F>(records: &[OrderRecord], key_fn: F) -> Vec<KeyCount>
where
    F: Fn(&OrderRecord) -> &str,
{
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for record in records {
        *counts.entry(key_fn(record).to_string()).or_insert(0) += 1;
    }

    let total = records.len();
    let mut rows: Vec<KeyCount> = counts
        .into_iter()
        .map(|(key, count)| KeyCount {
            key,
            count,
            share_pct: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            },
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Sums order prices into a dense (bucket x category) matrix.
pub fn grouped_sum<F>(
    records: &[OrderRecord],
    granularity: Granularity,
    key_fn: F,
) -> GroupedTable<Decimal>
where
    F: Fn(&OrderRecord) -> &str,
{
    grouped_table(records, granularity, key_fn, Decimal::ZERO, |cell, record| {
        *cell += record.price
    })
}

/// Counts orders into a dense (bucket x category) matrix.
pub fn grouped_count<F>(
    records: &[OrderRecord],
    granularity: Granularity,
    key_fn: F,
) -> GroupedTable<u64>
where
    F: Fn(&OrderRecord) -> &str,
{
    grouped_table(records, granularity, key_fn, 0, |cell, _| *cell += 1)
}

/// Shared walk for the grouped views.
///
/// The bucket axis is the sorted union of buckets observed for any category;
/// the category axis is the union of observed categories in first-encounter
/// order. Unobserved combinations keep the `zero` value, so consumers get a
/// complete matrix for stacked comparisons.
fn grouped_table<T, F, A>(
    records: &[OrderRecord],
    granularity: Granularity,
    key_fn: F,
    zero: T,
    accumulate: A,
) -> GroupedTable<T>
where
    T: Clone,
    F: Fn(&OrderRecord) -> &str,
    A: Fn(&mut T, &OrderRecord),
{
    let mut bucket_set: BTreeSet<TimeBucket> = BTreeSet::new();
    let mut categories: IndexSet<String> = IndexSet::new();
    for record in records {
        bucket_set.insert(TimeBucket::containing(record.order_date, granularity));
        categories.insert(key_fn(record).to_string());
    }

    let buckets: Vec<TimeBucket> = bucket_set.into_iter().collect();
    let mut cells = vec![vec![zero; categories.len()]; buckets.len()];

    for record in records {
        let bucket = TimeBucket::containing(record.order_date, granularity);
        let bucket_idx = buckets
            .binary_search(&bucket)
            .expect("every record's bucket was collected in the first pass");
        let category_idx = categories
            .get_index_of(key_fn(record))
            .expect("every record's category was collected in the first pass");
        accumulate(&mut cells[bucket_idx][category_idx], record);
    }

    GroupedTable {
        buckets,
        categories: categories.into_iter().collect(),
        cells,
    }
}
