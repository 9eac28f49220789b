use std::path::PathBuf;

use analytics::{OrderReport, ReportEngine, ReportQuery, format_price};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::{Config, load_config};
use core_types::{Granularity, RecordStore, TimeBucket};
use ingest::load_records;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Brasserie analytics application.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Load config.toml (optional); flags override its values.
    let config = load_config().context("failed to load configuration")?;

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args, config),
        Commands::Preview(args) => handle_preview(args, config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Order analytics for restaurant sales, popularity and service latency.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full report over a date range and print it as tables.
    Report(ReportArgs),
    /// Print the first rows of the (filtered) dataset.
    Preview(PreviewArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// Path to the order CSV (overrides config.toml).
    #[arg(long)]
    data: Option<PathBuf>,

    /// Start of the inclusive date range (format: YYYY-MM-DD).
    /// Defaults to the earliest order date in the dataset.
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End of the inclusive date range (format: YYYY-MM-DD).
    /// Defaults to the latest order date in the dataset.
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Bucket width for the sales series ("week" or "month").
    #[arg(long)]
    granularity: Option<Granularity>,

    /// Materialize zero-total buckets between the first and last observed one.
    #[arg(long)]
    dense: bool,

    /// Which report section to print: all, sales, popularity, latency.
    #[arg(long, default_value = "all")]
    section: String,

    /// Emit the raw report bundle as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct PreviewArgs {
    /// Path to the order CSV (overrides config.toml).
    #[arg(long)]
    data: Option<PathBuf>,

    /// Start of the inclusive date range (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End of the inclusive date range (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Number of rows to print.
    #[arg(long, default_value_t = 10)]
    limit: usize,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Loads the store and resolves the query's date range from flags, config,
/// and finally the dataset's own span.
fn load_and_resolve(
    data: Option<PathBuf>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    config: &Config,
) -> Result<(RecordStore, NaiveDate, NaiveDate)> {
    let path = data.unwrap_or_else(|| config.data.path.clone());
    let store = load_records(&path)
        .with_context(|| format!("failed to load order data from {}", path.display()))?;

    let (span_start, span_end) = store
        .date_span()
        .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
    let start = from.or(config.report.start_date).unwrap_or(span_start);
    let end = to.or(config.report.end_date).unwrap_or(span_end);
    Ok((store, start, end))
}

fn handle_report(args: ReportArgs, config: Config) -> Result<()> {
    let (store, start, end) = load_and_resolve(args.data, args.from, args.to, &config)?;
    let query = ReportQuery {
        start_date: start,
        end_date: end,
        granularity: args.granularity.unwrap_or(config.report.granularity),
        dense_fill: args.dense || config.report.dense_fill,
    };

    tracing::info!(
        from = %query.start_date,
        to = %query.end_date,
        granularity = %query.granularity,
        "running report"
    );
    let report = ReportEngine::new().run(store.records(), &query)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "\nOrder report {} — {} to {}, {} buckets, {} records",
        report.report_id, query.start_date, query.end_date, query.granularity, report.records_in_range
    );

    match args.section.as_str() {
        "all" => {
            print_sales_section(&report, query.granularity);
            print_popularity_section(&report);
            print_latency_section(&report);
        }
        "sales" => print_sales_section(&report, query.granularity),
        "popularity" => print_popularity_section(&report),
        "latency" => print_latency_section(&report),
        other => {
            println!("Unknown section: {other}");
            println!("Available: all, sales, popularity, latency");
        }
    }

    Ok(())
}

fn handle_preview(args: PreviewArgs, config: Config) -> Result<()> {
    let (store, start, end) = load_and_resolve(args.data, args.from, args.to, &config)?;
    let subset = analytics::filter_range(store.records(), start, end);

    println!("\nDataset preview — {} of {} records", args.limit.min(subset.len()), subset.len());
    let mut table = Table::new();
    table.set_header(vec![
        "Date",
        "Order Time",
        "Serve Time",
        "Menu",
        "Category",
        "Price",
    ]);
    for record in subset.iter().take(args.limit) {
        table.add_row(vec![
            record.order_date.to_string(),
            record.order_time.to_string(),
            record.serve_time.to_string(),
            record.menu_item.clone(),
            record.category.clone(),
            format!("{}", record.price),
        ]);
    }
    println!("{table}");
    Ok(())
}

// ==============================================================================
// Report Rendering
// ==============================================================================

fn print_section_header(title: &str) {
    println!("\n{}", "═".repeat(70));
    println!("  {title}");
    println!("{}", "═".repeat(70));
}

fn bucket_label(bucket: &TimeBucket) -> String {
    match bucket.granularity() {
        Granularity::Week => format!("Week of {}", bucket.start()),
        Granularity::Month => bucket.start().format("%b %Y").to_string(),
    }
}

fn print_sales_section(report: &OrderReport, granularity: Granularity) {
    print_section_header(&format!("Sales Performance Over Time (by {granularity})"));

    let mut table = Table::new();
    table.set_header(vec!["Bucket", "Sales"]);
    for point in &report.sales_series {
        table.add_row(vec![bucket_label(&point.bucket), format_price(point.total)]);
    }
    println!("{table}");

    print_section_header("Overall Sales by Category (monthly)");
    let sales = &report.category_sales_by_month;
    let mut table = Table::new();
    let mut header = vec!["Month".to_string()];
    header.extend(sales.categories.iter().cloned());
    table.set_header(header);
    for (bucket_idx, bucket) in sales.buckets.iter().enumerate() {
        let mut row = vec![bucket_label(bucket)];
        for cell in &sales.cells[bucket_idx] {
            row.push(format_price(*cell));
        }
        table.add_row(row);
    }
    println!("{table}");

    print_section_header("Overall Orders by Category (monthly)");
    let orders = &report.category_orders_by_month;
    let mut table = Table::new();
    let mut header = vec!["Month".to_string()];
    header.extend(orders.categories.iter().cloned());
    table.set_header(header);
    for (bucket_idx, bucket) in orders.buckets.iter().enumerate() {
        let mut row = vec![bucket_label(bucket)];
        for cell in &orders.cells[bucket_idx] {
            row.push(cell.to_string());
        }
        table.add_row(row);
    }
    println!("{table}");
}

fn print_popularity_section(report: &OrderReport) {
    print_section_header("Popular Menu Items");
    let mut table = Table::new();
    table.set_header(vec!["Menu Item", "Orders", "Share"]);
    for row in &report.popularity {
        table.add_row(vec![
            row.key.clone(),
            row.count.to_string(),
            format!("{:.1}%", row.share_pct),
        ]);
    }
    println!("{table}");

    print_section_header("Category Share");
    let mut table = Table::new();
    table.set_header(vec!["Category", "Orders", "Share"]);
    for row in &report.category_share {
        table.add_row(vec![
            row.key.clone(),
            row.count.to_string(),
            format!("{:.1}%", row.share_pct),
        ]);
    }
    println!("{table}");
}

fn print_latency_section(report: &OrderReport) {
    print_section_header("Mean Order-to-Serve Duration per Week");
    let mut table = Table::new();
    table.set_header(vec!["Week of", "Category", "Mean (min)"]);
    for row in &report.weekly_latency.rows {
        table.add_row(vec![
            row.day.to_string(),
            row.category.clone(),
            format!("{:.2}", row.mean_minutes),
        ]);
    }
    println!("{table}");

    print_section_header("Mean Order-to-Serve Duration per Day");
    let mut table = Table::new();
    table.set_header(vec!["Day", "Category", "Mean (min)"]);
    for row in &report.daily_latency.rows {
        table.add_row(vec![
            row.day.to_string(),
            row.category.clone(),
            format!("{:.2}", row.mean_minutes),
        ]);
    }
    println!("{table}");

    match &report.max_latency_day {
        Some(max) => println!(
            "\n  Slowest day: {} ({}) at {:.2} min mean",
            max.day, max.category, max.mean_minutes
        ),
        None => println!("\n  No latency data in the selected range."),
    }
    if report.daily_latency.anomalies > 0 {
        println!(
            "  Excluded {} record(s) with serve time before order time.",
            report.daily_latency.anomalies
        );
    }
}
