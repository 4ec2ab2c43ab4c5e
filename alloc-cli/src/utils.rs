use alloc_core::calculations::common::round_half_up;
use rust_decimal::Decimal;

/// Inserts `,` every three digits of a plain run of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Formats dollars the `en-US` way: `$1,234.56`, `-$1,234.56`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let plain = format!("{:.2}", rounded.abs());
    let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Formats a percent with two decimals: `12.50%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", round_half_up(value))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(100000)), "$100,000.00");
    }

    #[test]
    fn format_currency_small_values() {
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(999.999)), "$1,000.00");
        assert_eq!(format_currency(dec!(12.3)), "$12.30");
    }

    #[test]
    fn format_currency_negative_puts_sign_before_dollar() {
        assert_eq!(format_currency(dec!(-1200)), "-$1,200.00");
    }

    #[test]
    fn format_currency_negative_that_rounds_to_zero_has_no_sign() {
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn format_percent_uses_two_decimals() {
        assert_eq!(format_percent(dec!(23)), "23.00%");
        assert_eq!(format_percent(dec!(30.6666666)), "30.67%");
    }
}
