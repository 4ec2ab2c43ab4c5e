//! Tax-waterfall breakdown of an allocation state.
//!
//! # Waterfall
//!
//! | Step | Value |
//! |------|-------|
//! | 1    | Each allocation percent → dollars |
//! | 2    | Pre-tax = traditional 401(k) + HSA + premium × 12 |
//! | 3    | Taxable income = gross − pre-tax (minimum 0) |
//! | 4    | Estimated taxes = taxable income × effective rate |
//! | 5    | After-tax income = taxable income − estimated taxes |
//! | 6    | Post-tax = Roth 401(k) + Roth IRA + emergency fund + brokerage |
//! | 7    | Take-home = after-tax income − post-tax (may be negative) |
//! | 8    | Total savings = all six allocations |
//! | 9    | Savings rate = total savings ÷ gross (0 without a salary) |
//!
//! Dollar amounts are rounded half-up to cents at each step.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use alloc_core::{AllocationState, BreakdownCalculator};
//!
//! let state = AllocationState::new(dec!(100000), dec!(22));
//! let breakdown = BreakdownCalculator::new(&state).calculate();
//!
//! assert_eq!(breakdown.take_home_annual, dec!(78000.00));
//! assert_eq!(breakdown.savings_rate, dec!(0));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{floor_at_zero, round_half_up};
use crate::models::{
    AllocationKind, AllocationState, Breakdown, PostTaxDeductions, PreTaxDeductions,
};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

#[derive(Debug, Clone, Copy)]
pub struct BreakdownCalculator<'a> {
    state: &'a AllocationState,
}

impl<'a> BreakdownCalculator<'a> {
    pub fn new(state: &'a AllocationState) -> Self {
        Self { state }
    }

    /// Computes the full breakdown. Total over every state, including a zero
    /// salary.
    pub fn calculate(&self) -> Breakdown {
        let gross_annual = self.state.gross_annual_salary();

        // Steps 1 and 2
        let pre_tax = self.pre_tax_deductions();

        // Step 3
        let taxable_income = self.taxable_income(gross_annual, pre_tax.total);

        // Step 4
        let estimated_taxes = self.estimated_taxes(taxable_income);

        // Step 5
        let after_tax_income = round_half_up(taxable_income - estimated_taxes);

        // Step 6
        let post_tax = self.post_tax_deductions();

        // Step 7
        let take_home_annual = round_half_up(after_tax_income - post_tax.total);
        if take_home_annual < Decimal::ZERO {
            debug!(
                take_home_annual = %take_home_annual,
                "post-tax allocations exceed after-tax income"
            );
        }

        // Steps 8 and 9
        let total_savings_annual = self.total_savings(&pre_tax, &post_tax);
        let savings_rate = self.savings_rate(total_savings_annual, gross_annual);

        Breakdown {
            gross_annual,
            gross_monthly: round_half_up(gross_annual / MONTHS_PER_YEAR),
            pre_tax,
            taxable_income,
            estimated_taxes,
            after_tax_income,
            post_tax,
            take_home_annual,
            take_home_monthly: round_half_up(take_home_annual / MONTHS_PER_YEAR),
            total_savings_annual,
            savings_rate,
        }
    }

    fn dollars(
        &self,
        kind: AllocationKind,
    ) -> Decimal {
        round_half_up(self.state.allocation_dollars(kind))
    }

    fn pre_tax_deductions(&self) -> PreTaxDeductions {
        let traditional_401k = self.dollars(AllocationKind::Traditional401k);
        let hsa = self.dollars(AllocationKind::Hsa);
        let health_insurance =
            round_half_up(self.state.health_insurance_premium() * MONTHS_PER_YEAR);

        PreTaxDeductions {
            traditional_401k,
            hsa,
            health_insurance,
            total: traditional_401k + hsa + health_insurance,
        }
    }

    fn post_tax_deductions(&self) -> PostTaxDeductions {
        let roth_401k = self.dollars(AllocationKind::Roth401k);
        let roth_ira = self.dollars(AllocationKind::RothIra);
        let emergency_fund = self.dollars(AllocationKind::EmergencyFund);
        let taxable_brokerage = self.dollars(AllocationKind::TaxableBrokerage);

        PostTaxDeductions {
            roth_401k,
            roth_ira,
            emergency_fund,
            taxable_brokerage,
            total: roth_401k + roth_ira + emergency_fund + taxable_brokerage,
        }
    }

    fn taxable_income(
        &self,
        gross_annual: Decimal,
        total_pre_tax: Decimal,
    ) -> Decimal {
        floor_at_zero(round_half_up(gross_annual - total_pre_tax))
    }

    fn estimated_taxes(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        round_half_up(taxable_income * self.state.effective_tax_rate() / Decimal::ONE_HUNDRED)
    }

    /// Premiums are a deduction, not savings, so they are left out.
    fn total_savings(
        &self,
        pre_tax: &PreTaxDeductions,
        post_tax: &PostTaxDeductions,
    ) -> Decimal {
        pre_tax.traditional_401k + pre_tax.hsa + post_tax.total
    }

    fn savings_rate(
        &self,
        total_savings: Decimal,
        gross_annual: Decimal,
    ) -> Decimal {
        if gross_annual <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        total_savings / gross_annual * Decimal::ONE_HUNDRED
    }
}
