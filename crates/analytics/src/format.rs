use rust_decimal::Decimal;

/// Abbreviates a non-negative price for axis labels and summaries.
///
/// Values under 1000 render as whole dollars, values in `[1000, 10000)` as a
/// one-decimal "k" amount, and anything larger as whole "k". Negative input
/// is out of contract.
pub fn format_price(value: Decimal) -> String {
    let thousand = Decimal::from(1000);
    if value < thousand {
        format!("${}", value.round())
    } else if value < Decimal::from(10_000) {
        let mut k = (value / thousand).round_dp(1);
        k.rescale(1);
        format!("${k}k")
    } else {
        format!("${}k", (value / thousand).round())
    }
}
