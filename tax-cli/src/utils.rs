use rust_decimal::Decimal;
use tax_core::calculations::common::{rate_as_percent, round_half_up};

/// Formats an amount as dollars and cents with `,` thousands separators.
///
/// Rounds half-up to cents first; `-0.001` prints as `$0.00`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };

    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Formats a fractional rate as a percentage, e.g. `0.205` → `20.50%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{:.2}%", rate_as_percent(rate))
}

/// Formats an optional upper bound, using "∞" for an open-ended band.
pub fn opt_bound_display(bound: Option<Decimal>) -> String {
    bound
        .map(format_currency)
        .unwrap_or_else(|| "∞".to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
