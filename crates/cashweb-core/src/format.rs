//! Amount and percentage formatting

use cashweb_config::CurrencyConfig;
use cashweb_utils::group_thousands;

/// Fixed-point amount without the currency suffix, e.g. `1234.50`
pub fn format_amount(amount: f64, currency: &CurrencyConfig) -> String {
    // Avoid printing "-0.00"
    let amount = if amount == 0.0 { 0.0 } else { amount };
    let fixed = format!("{:.*}", currency.decimal_places as usize, amount);
    let fixed = if is_negative_zero(&fixed) { fixed[1..].to_string() } else { fixed };
    group_thousands(&fixed, &currency.thousands_separator)
}

/// Amount followed by the currency suffix, e.g. `1234.50 جنيه`
pub fn format_currency(amount: f64, currency: &CurrencyConfig) -> String {
    format!("{} {}", format_amount(amount, currency), currency.suffix)
}

/// Percentage with one decimal, e.g. `71.4%`
pub fn format_percentage(percentage: f64) -> String {
    let fixed = format!("{:.1}", percentage);
    let fixed = if is_negative_zero(&fixed) { fixed[1..].to_string() } else { fixed };
    format!("{}%", fixed)
}

/// Rounding may turn a tiny negative value into "-0.0"
fn is_negative_zero(fixed: &str) -> bool {
    fixed.starts_with('-') && fixed[1..].chars().all(|c| c == '0' || c == '.')
}
