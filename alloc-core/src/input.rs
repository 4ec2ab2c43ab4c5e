use rust_decimal::Decimal;

/// Normalizes user input for decimal parsing: trims whitespace, drops a
/// leading `$`, a trailing `%` and comma thousands separators.
fn normalize_amount_input(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);
    trimmed.trim().replace(',', "")
}

/// Parses a user-entered number into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"100,000"`) and exponent
/// notation (`"1e5"`). Empty input and anything that does not parse become
/// zero; bad input is logged, never returned as an error.
pub fn parse_amount(s: &str) -> Decimal {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    normalized
        .parse()
        .or_else(|_| Decimal::from_scientific(&normalized))
        .unwrap_or_else(|e| {
            tracing::warn!(input = %s, "invalid amount, using 0: {}", e);
            Decimal::ZERO
        })
}
