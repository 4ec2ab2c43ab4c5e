use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Annual IRS contribution caps for one tax year, in dollars.
///
/// The 401(k) cap is shared by traditional and Roth elective deferrals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrsLimits {
    pub tax_year: i32,
    pub combined_401k: Decimal,
    pub hsa_individual: Decimal,
    pub hsa_family: Decimal,
    pub roth_ira: Decimal,
}

impl IrsLimits {
    /// Tax years with built-in limits, oldest first.
    pub const SUPPORTED_YEARS: [i32; 2] = [2024, 2025];

    /// Year used when none is configured.
    pub const DEFAULT_TAX_YEAR: i32 = 2024;

    pub fn for_year(tax_year: i32) -> Option<Self> {
        match tax_year {
            2024 => Some(Self::year_2024()),
            2025 => Some(Self::year_2025()),
            _ => None,
        }
    }

    fn year_2024() -> Self {
        Self {
            tax_year: 2024,
            combined_401k: Decimal::from(23_000),
            hsa_individual: Decimal::from(4_150),
            hsa_family: Decimal::from(8_300),
            roth_ira: Decimal::from(7_000),
        }
    }

    fn year_2025() -> Self {
        Self {
            tax_year: 2025,
            combined_401k: Decimal::from(23_500),
            hsa_individual: Decimal::from(4_300),
            hsa_family: Decimal::from(8_550),
            roth_ira: Decimal::from(7_000),
        }
    }
}

/// The [`IrsLimits::DEFAULT_TAX_YEAR`] table.
impl Default for IrsLimits {
    fn default() -> Self {
        Self::year_2024()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_is_the_default_year_table() {
        assert_eq!(
            Some(IrsLimits::default()),
            IrsLimits::for_year(IrsLimits::DEFAULT_TAX_YEAR)
        );
        assert_eq!(IrsLimits::default().combined_401k, dec!(23000));
    }

    #[test]
    fn for_year_2025_raises_401k_and_hsa_caps() {
        let limits = IrsLimits::for_year(2025).unwrap();

        assert_eq!(limits.combined_401k, dec!(23500));
        assert_eq!(limits.hsa_individual, dec!(4300));
        assert_eq!(limits.hsa_family, dec!(8550));
        assert_eq!(limits.roth_ira, dec!(7000));
    }

    #[test]
    fn for_year_returns_none_for_unknown_year() {
        assert_eq!(IrsLimits::for_year(1999), None);
    }

    #[test]
    fn every_supported_year_resolves() {
        for year in IrsLimits::SUPPORTED_YEARS {
            assert_eq!(IrsLimits::for_year(year).map(|l| l.tax_year), Some(year));
        }
    }
}
