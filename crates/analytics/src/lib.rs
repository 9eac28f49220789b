//! # Brasserie Analytics Engine
//!
//! This crate turns a flat set of order records into time-bucketed,
//! category-partitioned summaries: revenue over time, item and category
//! popularity, and order-to-serve latency trends.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   ingestion, configuration, or presentation. It depends only on
//!   `core-types` (Layer 0).
//! - **Stateless Calculation:** The `ReportEngine` takes an immutable record
//!   slice plus query parameters and produces a fresh `OrderReport`. No
//!   state survives a call, so correctness follows from purity rather than
//!   cache coherence.
//!
//! ## Public API
//!
//! - `ReportEngine`: runs every view for one query.
//! - `OrderReport` and its row types: the result bundle handed to the
//!   presentation layer.
//! - The individual operations (`filter_range`, `sum_by_bucket`,
//!   `count_by_key`, `grouped_sum`, `grouped_count`, the latency views,
//!   `format_price`) for callers that need a single view.
//! - `AnalyticsError`: the specific error types returned from this crate.

// Declare the modules that constitute this crate.
pub mod aggregate;
pub mod engine;
pub mod error;
pub mod filter;
pub mod format;
pub mod latency;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use aggregate::{count_by_key, grouped_count, grouped_sum, sum_by_bucket};
pub use engine::ReportEngine;
pub use error::AnalyticsError;
pub use filter::filter_range;
pub use format::format_price;
pub use latency::{duration_minutes, max_duration_day, mean_duration_by_day, mean_duration_by_week};
pub use report::{
    GroupedTable, KeyCount, LatencyRow, LatencySummary, OrderReport, ReportQuery, SalesPoint,
};
