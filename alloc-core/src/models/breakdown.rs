use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Amounts subtracted from gross pay before the tax rate is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreTaxDeductions {
    pub traditional_401k: Decimal,
    pub hsa: Decimal,
    /// Monthly premium × 12.
    pub health_insurance: Decimal,
    pub total: Decimal,
}

/// Amounts taken out of after-tax income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTaxDeductions {
    pub roth_401k: Decimal,
    pub roth_ira: Decimal,
    pub emergency_fund: Decimal,
    pub taxable_brokerage: Decimal,
    pub total: Decimal,
}

/// The full tax waterfall derived from one allocation state.
///
/// All amounts are annual dollars unless the field name says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub gross_annual: Decimal,
    pub gross_monthly: Decimal,
    pub pre_tax: PreTaxDeductions,
    /// Never negative.
    pub taxable_income: Decimal,
    pub estimated_taxes: Decimal,
    pub after_tax_income: Decimal,
    pub post_tax: PostTaxDeductions,
    /// Negative when post-tax allocations exceed after-tax income.
    pub take_home_annual: Decimal,
    pub take_home_monthly: Decimal,
    pub total_savings_annual: Decimal,
    /// Total savings as a percent of gross.
    pub savings_rate: Decimal,
}

impl Breakdown {
    pub fn is_take_home_negative(&self) -> bool {
        self.take_home_annual.is_sign_negative() && !self.take_home_annual.is_zero()
    }
}
