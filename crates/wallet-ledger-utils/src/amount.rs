//! Currency formatting

use rust_decimal::{Decimal, RoundingStrategy};

use crate::format_number;

/// How amounts are rendered for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountStyle {
    pub symbol: String,
    pub decimal_places: u32,
    pub thousands_separator: String,
    pub decimal_separator: String,
    /// Symbol before the digits (`$12.00`) or after (`12.00 $`)
    pub symbol_before: bool,
}

impl Default for AmountStyle {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            decimal_places: 2,
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            symbol_before: true,
        }
    }
}

/// Split |amount| rounded half away from zero into (integer, fraction)
/// digit strings.
fn split_magnitude(amount: f64, places: u32) -> (String, String) {
    let rounded = Decimal::from_f64_retain(amount.abs())
        .map(|d| d.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
        .map(|d| d.to_string())
        .unwrap_or_else(|| format!("{:.*}", places as usize, amount.abs()));

    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (rounded, String::new()),
    };

    let mut frac = frac_part;
    frac.truncate(places as usize);
    while frac.len() < places as usize {
        frac.push('0');
    }
    (int_part, frac)
}

/// Format an amount with the given style.
///
/// Negative amounts get a leading `-` ahead of the symbol. Non-finite
/// amounts render as zero.
pub fn format_amount(amount: f64, style: &AmountStyle) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let (int_part, frac) = split_magnitude(amount, style.decimal_places);

    let mut digits = format_number(int_part, &style.thousands_separator);
    if !frac.is_empty() {
        digits.push_str(&style.decimal_separator);
        digits.push_str(&frac);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    if style.symbol_before {
        format!("{}{}{}", sign, style.symbol, digits)
    } else {
        format!("{}{} {}", sign, digits, style.symbol)
    }
}

/// `$1,234.56` / `-$1,234.56`; non-finite amounts render as `$0.00`
pub fn safe_format_amount(amount: f64) -> String {
    format_amount(amount, &AmountStyle::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_format_amount() {
        assert_eq!(safe_format_amount(1234.56), "$1,234.56");
        assert_eq!(safe_format_amount(-1234.56), "-$1,234.56");
        assert_eq!(safe_format_amount(3000.0), "$3,000.00");
        assert_eq!(safe_format_amount(0.0), "$0.00");
        assert_eq!(safe_format_amount(12.5), "$12.50");
        assert_eq!(safe_format_amount(1234567.891), "$1,234,567.89");
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(safe_format_amount(f64::NAN), "$0.00");
        assert_eq!(safe_format_amount(f64::INFINITY), "$0.00");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(safe_format_amount(0.125), "$0.13");
        assert_eq!(safe_format_amount(-2.5), "-$2.50");
    }

    #[test]
    fn test_custom_style() {
        let style = AmountStyle {
            symbol: "€".to_string(),
            decimal_places: 0,
            thousands_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            symbol_before: false,
        };
        assert_eq!(format_amount(1234.6, &style), "1.235 €");
        assert_eq!(format_amount(-50.0, &style), "-50 €");
    }
}
