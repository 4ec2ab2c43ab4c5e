//! Percent-of-gross ⇄ dollar conversions.
//!
//! Both functions are total: a non-positive salary has no meaningful percent
//! denominator, so [`dollars_to_percent`] returns zero instead of dividing.

use rust_decimal::Decimal;

/// `percent / 100 × gross`.
pub fn percent_to_dollars(
    percent: Decimal,
    gross_annual_salary: Decimal,
) -> Decimal {
    percent / Decimal::ONE_HUNDRED * gross_annual_salary
}

/// `dollars / gross × 100`, or zero when `gross <= 0`.
///
/// A quotient too large for `Decimal` saturates at `Decimal::MAX` (or `MIN`
/// for negative dollars); callers bound percents to 100 anyway.
pub fn dollars_to_percent(
    dollars: Decimal,
    gross_annual_salary: Decimal,
) -> Decimal {
    if gross_annual_salary <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    dollars
        .checked_div(gross_annual_salary)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if dollars.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::{prop_assert, proptest};
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn percent_to_dollars_scales_by_salary() {
        assert_eq!(percent_to_dollars(dec!(25), dec!(100000)), dec!(25000));
        assert_eq!(percent_to_dollars(dec!(0.5), dec!(60000)), dec!(300));
    }

    #[test]
    fn percent_to_dollars_at_zero_salary_is_zero() {
        assert_eq!(percent_to_dollars(dec!(40), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn dollars_to_percent_matches_cap_examples() {
        assert_eq!(dollars_to_percent(dec!(23000), dec!(100000)), dec!(23));
        assert_eq!(dollars_to_percent(dec!(13000), dec!(50000)), dec!(26));
    }

    #[test]
    fn dollars_to_percent_is_zero_without_salary() {
        assert_eq!(dollars_to_percent(dec!(23000), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(dollars_to_percent(dec!(23000), dec!(-1)), Decimal::ZERO);
    }

    #[test]
    fn dollars_to_percent_saturates_for_tiny_salary() {
        let tiny = Decimal::new(1, 28);

        assert_eq!(dollars_to_percent(dec!(23000), tiny), Decimal::MAX);
        assert_eq!(dollars_to_percent(dec!(-23000), tiny), Decimal::MIN);
    }

    proptest! {
        #[test]
        fn prop_percent_round_trips_through_dollars(
            percent_bp in 0u32..=10_000,
            salary_cents in 1u64..100_000_000_000,
        ) {
            let percent = Decimal::new(i64::from(percent_bp), 2);
            let salary = Decimal::new(salary_cents as i64, 2);

            let back = dollars_to_percent(percent_to_dollars(percent, salary), salary);

            prop_assert!((back - percent).abs() <= dec!(0.000000001), "{percent} -> {back}");
        }

        #[test]
        fn prop_dollars_to_percent_is_zero_for_non_positive_salary(
            dollars in -1_000_000_000i64..1_000_000_000,
            salary in -1_000_000i64..=0,
        ) {
            prop_assert!(
                dollars_to_percent(Decimal::from(dollars), Decimal::from(salary)).is_zero()
            );
        }
    }
}
